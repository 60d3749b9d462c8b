//! Review prompt assembly.
//!
//! Combines the normalized diff rendering with pull-request metadata into
//! the text handed to the content-generation collaborator. No model calls
//! happen here; this module only assembles text.

use serde_json::Value;

use crate::models::review::{PrMetadata, RenderedReview, ReviewPrompt};
use crate::pipeline;

/// Rendered in place of metadata fields that are absent or blank.
const MISSING_FIELD: &str = "N/A";

/// Assemble the final review prompt from a rendered review and PR metadata.
///
/// When the pipeline could not recognize any changes, the rendered text is
/// the diagnostic fallback and is included verbatim so the downstream model
/// can still reason about the raw payload.
pub fn build_review_prompt(review: &RenderedReview, meta: &PrMetadata) -> String {
    format!(
        "## Pull request\n\n\
         Title: {}\n\
         Description: {}\n\
         Author: {}\n\n\
         ## Code changes\n\n\
         {}",
        field_or_na(&meta.title),
        field_or_na(&meta.description),
        field_or_na(&meta.author),
        review.markdown,
    )
}

/// One-call entry point: normalize a raw diff payload and assemble the
/// prompt in a single step.
pub fn assemble_review_prompt(payload: &Value, meta: &PrMetadata) -> ReviewPrompt {
    let review = pipeline::normalize(payload);
    ReviewPrompt {
        text: build_review_prompt(&review, meta),
        has_changes: review.has_changes,
        stats: review.stats,
    }
}

fn field_or_na(field: &Option<String>) -> &str {
    match field.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => MISSING_FIELD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::review::DiffStats;
    use serde_json::json;

    fn sample_review() -> RenderedReview {
        RenderedReview {
            markdown: "### x.txt\n\n```diff\n+new\n```\n".into(),
            has_changes: true,
            stats: DiffStats {
                added_lines: 1,
                removed_lines: 0,
                modified_files: 1,
            },
        }
    }

    #[test]
    fn metadata_block_precedes_changes() {
        let meta = PrMetadata {
            title: Some("Add feature".into()),
            description: Some("Implements the thing".into()),
            author: Some("mira".into()),
        };
        let text = build_review_prompt(&sample_review(), &meta);
        assert!(text.starts_with("## Pull request\n\nTitle: Add feature\n"));
        assert!(text.contains("Description: Implements the thing\n"));
        assert!(text.contains("Author: mira\n"));
        assert!(text.ends_with("## Code changes\n\n### x.txt\n\n```diff\n+new\n```\n"));
    }

    #[test]
    fn missing_metadata_renders_na() {
        let meta = PrMetadata::default();
        let text = build_review_prompt(&sample_review(), &meta);
        assert!(text.contains("Title: N/A\n"));
        assert!(text.contains("Description: N/A\n"));
        assert!(text.contains("Author: N/A\n"));
    }

    #[test]
    fn blank_metadata_renders_na() {
        let meta = PrMetadata {
            title: Some("   ".into()),
            description: Some(String::new()),
            author: None,
        };
        let text = build_review_prompt(&sample_review(), &meta);
        assert!(text.contains("Title: N/A\n"));
        assert!(text.contains("Description: N/A\n"));
    }

    #[test]
    fn assemble_carries_flags_and_stats() {
        let payload = json!("--- a/x.txt\n+++ b/x.txt\n@@ -1,1 +1,2 @@\n-old\n+new\n+extra\n");
        let prompt = assemble_review_prompt(&payload, &PrMetadata::default());
        assert!(prompt.has_changes);
        assert_eq!(prompt.stats.added_lines, 2);
        assert_eq!(prompt.stats.removed_lines, 1);
        assert!(prompt.text.contains("### x.txt"));
    }

    #[test]
    fn assemble_includes_diagnostic_text_verbatim() {
        let prompt = assemble_review_prompt(&json!({}), &PrMetadata::default());
        assert!(!prompt.has_changes);
        assert!(prompt.text.contains("Could not interpret the diff payload"));
        assert!(prompt.text.contains("{}"));
    }
}
