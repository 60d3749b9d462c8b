//! Canonical diff model: files, hunks, and diff lines.
//!
//! Every inbound diff format is normalized into these types. They are built
//! fresh per request, never mutated after construction, and carry no
//! back-references.

use serde::{Deserialize, Serialize};

/// Path placeholder for the missing side of an added or deleted file.
pub const DEV_NULL: &str = "/dev/null";

/// The kind of a line in a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffLineKind {
    /// Line is unchanged (context).
    Context,
    /// Line exists only in the new version.
    Added,
    /// Line exists only in the old version.
    Removed,
}

impl DiffLineKind {
    /// The unified-diff marker for this kind (`+`, `-`, or a space).
    pub fn marker(self) -> char {
        match self {
            DiffLineKind::Added => '+',
            DiffLineKind::Removed => '-',
            DiffLineKind::Context => ' ',
        }
    }
}

/// A single line in a diff hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    /// The kind of change.
    pub kind: DiffLineKind,
    /// The content of the line (without the leading +/-/space marker).
    pub text: String,
}

impl DiffLine {
    pub fn context(text: impl Into<String>) -> Self {
        Self {
            kind: DiffLineKind::Context,
            text: text.into(),
        }
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self {
            kind: DiffLineKind::Added,
            text: text.into(),
        }
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self {
            kind: DiffLineKind::Removed,
            text: text.into(),
        }
    }
}

/// A contiguous hunk within a file diff.
///
/// The spans are advisory: they come from the source payload's hunk header
/// and are used only when rendering range annotations. They are never
/// re-derived from `lines.len()` because source payloads may omit or
/// mis-report them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hunk {
    /// Starting line in the source file.
    pub source_start: u32,
    /// Advisory number of source lines covered by this hunk.
    pub source_span: u32,
    /// Starting line in the destination file.
    pub dest_start: u32,
    /// Advisory number of destination lines covered by this hunk.
    pub dest_span: u32,
    /// Optional trailing hunk-header text (e.g., enclosing function name).
    pub context_label: Option<String>,
    /// The lines in this hunk, in input order.
    pub lines: Vec<DiffLine>,
}

/// A diff for a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDiff {
    /// Path of the source file (`/dev/null` for newly added files).
    pub source_path: String,
    /// Path of the destination file (`/dev/null` for deleted files).
    pub dest_path: String,
    /// The hunks in this diff.
    pub hunks: Vec<Hunk>,
}

impl FileDiff {
    /// The path to show for this file: the destination path when present,
    /// the source path for deletions, `"Unknown file"` when neither side
    /// names a real file.
    pub fn display_path(&self) -> &str {
        if !self.dest_path.is_empty() && self.dest_path != DEV_NULL {
            &self.dest_path
        } else if !self.source_path.is_empty() && self.source_path != DEV_NULL {
            &self.source_path
        } else {
            "Unknown file"
        }
    }

    /// Total number of added lines across all hunks.
    pub fn added_lines(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == DiffLineKind::Added)
            .count()
    }

    /// Total number of removed lines across all hunks.
    pub fn removed_lines(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == DiffLineKind::Removed)
            .count()
    }
}

/// The normalized, format-independent representation of a changeset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanonicalDiff {
    /// The changed files, in input order.
    pub files: Vec<FileDiff>,
}

impl CanonicalDiff {
    /// Whether the model contains at least one added or removed line.
    ///
    /// Context-only content does not count as a change.
    pub fn has_changes(&self) -> bool {
        self.files
            .iter()
            .any(|f| f.added_lines() > 0 || f.removed_lines() > 0)
    }
}
