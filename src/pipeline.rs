//! Diff normalization pipeline.
//!
//! An ordered chain of strategies turns whatever the hosting service hands
//! us — unified-diff text, a hosted structured payload, a legacy structured
//! payload, or something unrecognizable — into a [`RenderedReview`]. The
//! chain commits to the first strategy that produces actual changes and is
//! guaranteed to terminate with a diagnostic dump, so normalization never
//! fails the caller.

use serde_json::Value;
use tracing::debug;

use crate::diff::{hosted, legacy, parser, stats};
use crate::models::diff::CanonicalDiff;
use crate::models::review::{DiffStats, RenderedReview};
use crate::output::markdown;

/// The shape of an inbound diff payload, decided once at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// A unified-diff text block.
    UnifiedText,
    /// The hosted API's file → hunk → segment shape (`{diffs: [...]}`).
    Hosted,
    /// The older flat-line shape (`{values: [...]}`).
    Legacy,
    /// None of the known shapes; only the raw dump applies.
    Unknown,
}

/// Classify a payload without converting it.
pub fn detect(payload: &Value) -> PayloadKind {
    if payload.is_string() {
        PayloadKind::UnifiedText
    } else if payload.get("diffs").is_some_and(Value::is_array) {
        PayloadKind::Hosted
    } else if payload.get("values").is_some_and(Value::is_array) {
        PayloadKind::Legacy
    } else {
        PayloadKind::Unknown
    }
}

/// One normalization strategy: `Some` when it handled the payload,
/// `None` when the next strategy should be tried.
type Strategy = fn(&Value) -> Option<RenderedReview>;

/// Strategies in priority order. The converters only claim a payload when
/// they found actual changes; the two raw arms are the terminal diagnostic
/// branch and never claim changes, so the last entry accepts everything.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("unified-text", try_unified_text),
    ("hosted", try_hosted),
    ("legacy", try_legacy),
    ("raw-string", try_raw_string),
    ("raw-json", try_raw_json),
];

/// Normalize a diff payload into rendered markdown plus statistics.
///
/// Never fails: unparseable or unrecognized input ends in the diagnostic
/// fallback (`has_changes == false`) rather than an error.
pub fn normalize(payload: &Value) -> RenderedReview {
    for (name, strategy) in STRATEGIES {
        if let Some(review) = strategy(payload) {
            debug!(
                strategy = *name,
                has_changes = review.has_changes,
                files = review.stats.modified_files,
                "diff payload normalized"
            );
            return review;
        }
    }

    // Unreachable in practice (the raw-json arm accepts every payload),
    // kept so the chain is total.
    diagnostic_review(pretty_dump(payload))
}

/// Normalize a payload whose format the caller already knows, skipping the
/// defensive chain and running only the matching strategy.
///
/// Shares `normalize`'s guarantee: when the strategy does not produce
/// changes (or `kind` is [`PayloadKind::Unknown`]), the result is the
/// diagnostic dump rather than an error.
pub fn normalize_as(kind: PayloadKind, payload: &Value) -> RenderedReview {
    let review = match kind {
        PayloadKind::UnifiedText => try_unified_text(payload),
        PayloadKind::Hosted => try_hosted(payload),
        PayloadKind::Legacy => try_legacy(payload),
        PayloadKind::Unknown => None,
    };

    match review {
        Some(review) => {
            debug!(
                kind = ?kind,
                files = review.stats.modified_files,
                "diff payload normalized"
            );
            review
        }
        None => {
            let dump = match payload.as_str() {
                Some(text) => text.to_string(),
                None => pretty_dump(payload),
            };
            diagnostic_review(dump)
        }
    }
}

/// Build the review for a model that contains changes; `None` otherwise.
fn review_from_model(model: &CanonicalDiff) -> Option<RenderedReview> {
    if !model.has_changes() {
        return None;
    }
    Some(RenderedReview {
        markdown: markdown::render(model),
        has_changes: true,
        stats: stats::collect(model),
    })
}

fn try_unified_text(payload: &Value) -> Option<RenderedReview> {
    let text = payload.as_str()?;
    // A parse error means this payload is not usable unified text; the
    // raw-string arm will still dump it further down the chain.
    let model = parser::parse_unified_diff(text).ok()?;
    review_from_model(&model)
}

fn try_hosted(payload: &Value) -> Option<RenderedReview> {
    review_from_model(&hosted::convert(payload)?)
}

fn try_legacy(payload: &Value) -> Option<RenderedReview> {
    review_from_model(&legacy::convert(payload)?)
}

fn try_raw_string(payload: &Value) -> Option<RenderedReview> {
    let text = payload.as_str()?;
    Some(diagnostic_review(text.to_string()))
}

fn try_raw_json(payload: &Value) -> Option<RenderedReview> {
    Some(diagnostic_review(pretty_dump(payload)))
}

fn pretty_dump(payload: &Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}

/// The pipeline's fail-safe: a note on likely causes plus the raw payload,
/// so the downstream model (or a human) can still inspect what arrived.
fn diagnostic_review(dump: String) -> RenderedReview {
    let markdown = format!(
        "### Could not interpret the diff payload\n\n\
         No changes were recognized. Possible causes:\n\n\
         - the diff structure differs from what this pipeline expects\n\
         - the changes are in binary or very large files\n\
         - diff generation on the hosting side may be faulty\n\n\
         Raw payload:\n\n\
         ```\n{dump}\n```\n"
    );
    RenderedReview {
        markdown,
        has_changes: false,
        stats: DiffStats::default(),
    }
}
