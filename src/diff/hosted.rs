//! Hosted-API structured diff converter.
//!
//! The hosting API returns a nested file → hunk → segment → line shape
//! where each segment carries one change type for all of its lines. The
//! converter synthesizes unified-diff text from that shape and delegates to
//! the unified parser, so both inputs flow through one code path.

use serde::Deserialize;
use serde_json::Value;

use crate::models::diff::{CanonicalDiff, DEV_NULL};

/// Typed view of the hosted payload. Every collection defaults to empty so
/// a partially malformed payload degrades instead of erroring.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HostedPayload {
    diffs: Vec<HostedFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HostedFile {
    source: Option<HostedPathRef>,
    destination: Option<HostedPathRef>,
    hunks: Vec<HostedHunk>,
}

/// A path reference: the API wraps paths in an object whose `toString`
/// field carries the rendered path.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HostedPathRef {
    #[serde(rename = "toString")]
    to_string: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HostedHunk {
    #[serde(rename = "sourceLine")]
    source_line: u32,
    #[serde(rename = "sourceSpan")]
    source_span: u32,
    #[serde(rename = "destinationLine")]
    destination_line: u32,
    #[serde(rename = "destinationSpan")]
    destination_span: u32,
    segments: Vec<HostedSegment>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HostedSegment {
    #[serde(rename = "type")]
    kind: Option<String>,
    lines: Vec<HostedLine>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HostedLine {
    line: Option<String>,
}

/// Convert a hosted payload into the canonical model.
///
/// Returns `None` when the payload does not carry a `diffs` array, cannot
/// be deserialized, or the synthesized text contains no hunk lines.
pub fn convert(payload: &Value) -> Option<CanonicalDiff> {
    let text = synthesize_unified_text(payload)?;
    super::parser::parse_unified_diff(&text).ok()
}

/// Synthesize unified-diff text from a hosted payload.
///
/// The segment type is the sole source of truth for line kind: `ADDED` and
/// `REMOVED` map to `+`/`-`, anything else (including a missing type)
/// emits context lines.
pub fn synthesize_unified_text(payload: &Value) -> Option<String> {
    if !payload.get("diffs")?.is_array() {
        return None;
    }
    let payload = HostedPayload::deserialize(payload).ok()?;

    let mut out = String::new();
    let mut hunk_lines = 0usize;

    for file in &payload.diffs {
        out.push_str(&format!(
            "--- {}\n+++ {}\n",
            path_or_dev_null(&file.source),
            path_or_dev_null(&file.destination),
        ));

        for hunk in &file.hunks {
            out.push_str(&format!(
                "@@ -{},{} +{},{} @@\n",
                hunk.source_line, hunk.source_span, hunk.destination_line, hunk.destination_span,
            ));

            for segment in &hunk.segments {
                let marker = match segment.kind.as_deref() {
                    Some("ADDED") => '+',
                    Some("REMOVED") => '-',
                    _ => ' ',
                };
                for line in &segment.lines {
                    // A payload line may embed newlines; every physical
                    // line must carry the segment marker so marker counts
                    // stay in step with the emitted text.
                    for piece in line.line.as_deref().unwrap_or_default().split('\n') {
                        out.push(marker);
                        out.push_str(piece.strip_suffix('\r').unwrap_or(piece));
                        out.push('\n');
                        hunk_lines += 1;
                    }
                }
            }
        }
    }

    if hunk_lines == 0 {
        return None;
    }
    Some(out)
}

fn path_or_dev_null(path: &Option<HostedPathRef>) -> &str {
    path.as_ref()
        .and_then(|p| p.to_string.as_deref())
        .filter(|p| !p.is_empty())
        .unwrap_or(DEV_NULL)
}
