//! Review output types: change statistics, rendered reviews, and PR metadata.

use serde::{Deserialize, Serialize};

/// Aggregate change statistics over a canonical diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Number of added lines across all files.
    pub added_lines: usize,
    /// Number of removed lines across all files.
    pub removed_lines: usize,
    /// Number of changed files (counted once each, even with zero hunks).
    pub modified_files: usize,
}

/// The result of normalizing one diff payload: rendered markdown plus a
/// change flag and statistics.
///
/// When `has_changes` is `false`, `markdown` holds the diagnostic fallback
/// block (cause note + raw payload dump) instead of per-file diff sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedReview {
    /// Markdown rendering of the changes, or the diagnostic fallback.
    pub markdown: String,
    /// Whether at least one added or removed line was found.
    pub has_changes: bool,
    /// Change statistics (all zeroes on the fallback path).
    pub stats: DiffStats,
}

/// Pull-request metadata supplied by the hosting service.
///
/// Purely descriptive; absent or blank fields render as the literal `N/A`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
}

/// The final artifact handed to the content-generation collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewPrompt {
    /// Assembled text: metadata block followed by the rendered changes.
    pub text: String,
    /// Carried through from [`RenderedReview`].
    pub has_changes: bool,
    /// Carried through from [`RenderedReview`].
    pub stats: DiffStats,
}
