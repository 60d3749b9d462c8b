//! Legacy structured diff converter.
//!
//! The older API shape (`{values: [...]}`) carries a flat line list per
//! hunk and no reliable range information, so it is converted straight into
//! the canonical model instead of round-tripping through unified text.
//!
//! Field probing is part of this format's contract, not guesswork: the
//! file path is resolved from an ordered candidate list, and each line is
//! matched against the known sub-shapes in a fixed priority order.

use serde_json::Value;

use crate::models::diff::{CanonicalDiff, DiffLine, DiffLineKind, FileDiff, Hunk};

/// Ordered path-field candidates; the first that yields a non-empty string
/// wins. Each candidate may be a plain string or an object carrying a
/// `toString` string field.
const PATH_FIELDS: &[&str] = &["srcPath", "path", "source"];

/// Convert a legacy payload into the canonical model.
///
/// Returns `None` when the payload does not carry a `values` array.
pub fn convert(payload: &Value) -> Option<CanonicalDiff> {
    let values = payload.get("values")?.as_array()?;

    let files = values.iter().map(convert_file).collect();
    Some(CanonicalDiff { files })
}

fn convert_file(entry: &Value) -> FileDiff {
    let path = resolve_path(entry).unwrap_or_default();

    let hunks = entry
        .get("hunks")
        .and_then(Value::as_array)
        .map(|hunks| hunks.iter().map(convert_hunk).collect())
        .unwrap_or_default();

    FileDiff {
        source_path: path.clone(),
        dest_path: path,
        hunks,
    }
}

fn resolve_path(entry: &Value) -> Option<String> {
    PATH_FIELDS
        .iter()
        .find_map(|field| path_candidate(entry.get(field)?))
}

fn path_candidate(value: &Value) -> Option<String> {
    let path = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("toString").and_then(Value::as_str)?,
        _ => return None,
    };
    (!path.is_empty()).then(|| path.to_string())
}

fn convert_hunk(hunk: &Value) -> Hunk {
    let source_start = u32_field(hunk, "oldLine");
    let dest_start = u32_field(hunk, "newLine");

    let mut lines: Vec<DiffLine> = Vec::new();
    if let Some(raw_lines) = hunk.get("lines").and_then(Value::as_array) {
        for raw in raw_lines {
            convert_line(raw, &mut lines);
        }
    } else if let Some(content) = hunk.get("content").and_then(Value::as_str) {
        // No line list at all: keep the whole block as opaque context.
        lines.push(DiffLine::context(content));
    }

    Hunk {
        source_start,
        source_span: 0, // this format carries no span information
        dest_start,
        dest_span: 0,
        context_label: None,
        lines,
    }
}

/// Convert one legacy line value, appending one or two canonical lines.
///
/// Sub-shapes in priority order: `{left, right}` → removed then added;
/// `left` only → removed; `right` only → added; `{content, type}` → kind
/// from `type`; plain string → context. Anything else is dropped.
fn convert_line(raw: &Value, out: &mut Vec<DiffLine>) {
    if let Value::String(text) = raw {
        out.push(DiffLine::context(text));
        return;
    }
    let Some(obj) = raw.as_object() else {
        return;
    };

    let left = obj.get("left").and_then(Value::as_str);
    let right = obj.get("right").and_then(Value::as_str);
    match (left, right) {
        (Some(left), Some(right)) => {
            out.push(DiffLine::removed(left));
            out.push(DiffLine::added(right));
        }
        (Some(left), None) => out.push(DiffLine::removed(left)),
        (None, Some(right)) => out.push(DiffLine::added(right)),
        (None, None) => {
            if let Some(content) = obj.get("content").and_then(Value::as_str) {
                let kind = match obj.get("type").and_then(Value::as_str) {
                    Some("ADDED") => DiffLineKind::Added,
                    Some("REMOVED") => DiffLineKind::Removed,
                    _ => DiffLineKind::Context,
                };
                out.push(DiffLine {
                    kind,
                    text: content.to_string(),
                });
            }
        }
    }
}

fn u32_field(value: &Value, field: &str) -> u32 {
    value
        .get(field)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}
