//! Change statistics over the canonical model.

use crate::models::diff::{CanonicalDiff, DiffLineKind};
use crate::models::review::DiffStats;

/// Tally added/removed lines and changed files.
///
/// `modified_files` counts file entries, not hunks; a file with zero hunks
/// still counts once.
pub fn collect(model: &CanonicalDiff) -> DiffStats {
    let mut stats = DiffStats {
        modified_files: model.files.len(),
        ..DiffStats::default()
    };

    for line in model
        .files
        .iter()
        .flat_map(|f| &f.hunks)
        .flat_map(|h| &h.lines)
    {
        match line.kind {
            DiffLineKind::Added => stats.added_lines += 1,
            DiffLineKind::Removed => stats.removed_lines += 1,
            DiffLineKind::Context => {}
        }
    }

    stats
}
