//! Markdown renderer: grouped per-file sections with fenced diff blocks.
//!
//! Rendering is a pure projection of the canonical model: no mutation, and
//! the same input always produces byte-identical output.

use std::fmt::Write;

use crate::models::diff::{CanonicalDiff, FileDiff};

/// Render a canonical diff as markdown.
///
/// One `###` section per file, one annotated fenced `diff` block per hunk,
/// files separated by a horizontal rule.
pub fn render(model: &CanonicalDiff) -> String {
    let sections: Vec<String> = model.files.iter().map(render_file).collect();
    sections.join("\n---\n")
}

fn render_file(file: &FileDiff) -> String {
    let mut out = String::new();
    // Infallible: fmt::Write on String never errors.
    let _ = writeln!(out, "### {}", file.display_path());

    for hunk in &file.hunks {
        let _ = writeln!(
            out,
            "\nLines {}-{} → {}-{}\n",
            hunk.source_start,
            range_end(hunk.source_start, hunk.source_span),
            hunk.dest_start,
            range_end(hunk.dest_start, hunk.dest_span),
        );
        out.push_str("```diff\n");
        for line in &hunk.lines {
            out.push(line.kind.marker());
            out.push_str(&line.text);
            out.push('\n');
        }
        out.push_str("```\n");
    }

    out
}

/// Inclusive end of a rendered range. A zero span (formats that carry no
/// span information) collapses the range to its start line.
fn range_end(start: u32, span: u32) -> u32 {
    start.saturating_add(span.saturating_sub(1))
}
