//! Unified diff format parser.
//!
//! Parses unified-diff text (as produced by `git diff` or synthesized by
//! the hosted-format converter) into a [`CanonicalDiff`].

use crate::diff::DiffError;
use crate::models::diff::{CanonicalDiff, DiffLine, FileDiff, Hunk};

/// Parse a unified diff string into the canonical model.
///
/// File sections are anchored on `--- <path>` / `+++ <path>` header pairs;
/// `diff --git`, `index`, and mode lines between sections are skipped as
/// preamble. A `--- ` line only opens a section when the very next line is
/// a `+++ ` line — anywhere else it is hunk content (a removed line whose
/// text begins `-- `, e.g. an SQL comment). Returns an error only for a
/// malformed `@@` hunk header.
pub fn parse_unified_diff(input: &str) -> Result<CanonicalDiff, DiffError> {
    let lines: Vec<&str> = input.lines().collect();
    let mut files: Vec<FileDiff> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some((source, dest)) = file_header(&lines, i) else {
            i += 1;
            continue;
        };
        i += 2;

        let mut hunks: Vec<Hunk> = Vec::new();
        while i < lines.len() {
            if lines[i].starts_with("@@") {
                let (hunk, next) = parse_hunk(&lines, i)?;
                hunks.push(hunk);
                i = next;
            } else if file_header(&lines, i).is_some() || lines[i].starts_with("diff --git ") {
                break;
            } else {
                // Extended header lines (index, modes) or trailing noise.
                i += 1;
            }
        }

        files.push(FileDiff {
            source_path: clean_header_path(source),
            dest_path: clean_header_path(dest),
            hunks,
        });
    }

    Ok(CanonicalDiff { files })
}

/// The `--- a/...` / `+++ b/...` pair opening a file section at `i`, if
/// one starts there.
fn file_header<'a>(lines: &[&'a str], i: usize) -> Option<(&'a str, &'a str)> {
    let source = lines.get(i)?.strip_prefix("--- ")?;
    let dest = lines.get(i + 1)?.strip_prefix("+++ ")?;
    Some((source, dest))
}

/// Normalize a `---`/`+++` header path: drop the timestamp suffix and the
/// single-character git prefix (`a/`, `b/`, or mnemonic variants).
fn clean_header_path(raw: &str) -> String {
    let path = raw.split('\t').next().unwrap_or(raw).trim();
    strip_git_prefix(path).to_string()
}

/// Strip a single-character git diff prefix (`a/`, `b/`, `c/`, `w/`, `i/`, `o/`).
fn strip_git_prefix(path: &str) -> &str {
    if path.len() >= 2 {
        let bytes = path.as_bytes();
        if bytes[1] == b'/' && matches!(bytes[0], b'a' | b'b' | b'c' | b'w' | b'i' | b'o') {
            return &path[2..];
        }
    }
    path
}

/// Parse a single hunk starting at the `@@` line at index `i`. Returns the
/// hunk and the index of the first line after it.
fn parse_hunk(lines: &[&str], mut i: usize) -> Result<(Hunk, usize), DiffError> {
    let header_line = lines[i];
    let (source_start, source_span, dest_start, dest_span, context_label) =
        parse_hunk_header(header_line)
            .ok_or_else(|| DiffError::ParseError(format!("bad hunk header: {header_line}")))?;
    i += 1;

    let mut hunk_lines: Vec<DiffLine> = Vec::new();
    while i < lines.len() {
        let line = lines[i];
        if line.starts_with("@@")
            || line.starts_with("diff --git ")
            || file_header(lines, i).is_some()
        {
            break;
        }

        if let Some(text) = line.strip_prefix('+') {
            hunk_lines.push(DiffLine::added(text));
        } else if let Some(text) = line.strip_prefix('-') {
            hunk_lines.push(DiffLine::removed(text));
        } else if line.starts_with('\\') {
            // "\ No newline at end of file"
        } else {
            // Context, with or without the leading space.
            hunk_lines.push(DiffLine::context(line.strip_prefix(' ').unwrap_or(line)));
        }
        i += 1;
    }

    Ok((
        Hunk {
            source_start,
            source_span,
            dest_start,
            dest_span,
            context_label,
            lines: hunk_lines,
        },
        i,
    ))
}

/// Parse a `@@ -start,span +start,span @@ label` line.
fn parse_hunk_header(line: &str) -> Option<(u32, u32, u32, u32, Option<String>)> {
    let line = line.strip_prefix("@@ ")?;
    let end = line.find(" @@")?;
    let range_part = &line[..end];
    let label = {
        let rest = line[end + 3..].trim();
        (!rest.is_empty()).then(|| rest.to_string())
    };

    let (source, dest) = range_part.split_once(' ')?;
    let (source_start, source_span) = parse_range(source.strip_prefix('-')?)?;
    let (dest_start, dest_span) = parse_range(dest.strip_prefix('+')?)?;

    Some((source_start, source_span, dest_start, dest_span, label))
}

/// Parse "start,span" or "start" (span defaults to 1).
fn parse_range(s: &str) -> Option<(u32, u32)> {
    if let Some((start, span)) = s.split_once(',') {
        Some((start.parse().ok()?, span.parse().ok()?))
    } else {
        Some((s.parse().ok()?, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::diff::DiffLineKind;

    const SAMPLE_DIFF: &str = "--- a/x.txt\n+++ b/x.txt\n@@ -1,1 +1,2 @@\n-old\n+new\n+extra\n";

    #[test]
    fn parse_simple_diff() {
        let model = parse_unified_diff(SAMPLE_DIFF).unwrap();
        assert_eq!(model.files.len(), 1);

        let file = &model.files[0];
        assert_eq!(file.source_path, "x.txt");
        assert_eq!(file.dest_path, "x.txt");
        assert_eq!(file.hunks.len(), 1);

        let hunk = &file.hunks[0];
        assert_eq!(hunk.source_start, 1);
        assert_eq!(hunk.source_span, 1);
        assert_eq!(hunk.dest_start, 1);
        assert_eq!(hunk.dest_span, 2);
        assert_eq!(hunk.lines.len(), 3);
        assert_eq!(hunk.lines[0].kind, DiffLineKind::Removed);
        assert_eq!(hunk.lines[0].text, "old");
        assert_eq!(hunk.lines[1].kind, DiffLineKind::Added);
        assert_eq!(hunk.lines[1].text, "new");
        assert_eq!(hunk.lines[2].kind, DiffLineKind::Added);
        assert_eq!(hunk.lines[2].text, "extra");
    }

    #[test]
    fn parse_multiple_files() {
        let diff = "--- a/a.rs\n+++ b/a.rs\n@@ -1,3 +1,3 @@\n fn a() {\n-    1\n+    2\n }\n\
                    --- a/b.rs\n+++ b/b.rs\n@@ -1,3 +1,3 @@\n fn b() {\n-    3\n+    4\n }\n";
        let model = parse_unified_diff(diff).unwrap();
        assert_eq!(model.files.len(), 2);
        assert_eq!(model.files[0].dest_path, "a.rs");
        assert_eq!(model.files[1].dest_path, "b.rs");
    }

    #[test]
    fn parse_git_diff_output_with_preamble() {
        let diff = "diff --git a/src/main.rs b/src/main.rs\n\
                    index 1234567..abcdefg 100644\n\
                    --- a/src/main.rs\n\
                    +++ b/src/main.rs\n\
                    @@ -1,2 +1,2 @@\n\
                    -old line\n\
                    +new line\n";
        let model = parse_unified_diff(diff).unwrap();
        assert_eq!(model.files.len(), 1);
        assert_eq!(model.files[0].dest_path, "src/main.rs");
        assert_eq!(model.files[0].hunks[0].lines.len(), 2);
    }

    #[test]
    fn parse_new_file_keeps_dev_null() {
        let diff = "--- /dev/null\n+++ b/new.rs\n@@ -0,0 +1,2 @@\n+fn hello() {}\n+\n";
        let model = parse_unified_diff(diff).unwrap();
        let file = &model.files[0];
        assert_eq!(file.source_path, "/dev/null");
        assert_eq!(file.dest_path, "new.rs");
        assert_eq!(file.added_lines(), 2);
    }

    #[test]
    fn parse_hunk_label() {
        let diff = "--- a/lib.rs\n+++ b/lib.rs\n@@ -10,3 +10,4 @@ fn some_function() {\n     let x = 1;\n+    let y = 2;\n";
        let model = parse_unified_diff(diff).unwrap();
        let hunk = &model.files[0].hunks[0];
        assert_eq!(hunk.context_label.as_deref(), Some("fn some_function() {"));
    }

    #[test]
    fn parse_range_without_span() {
        let diff = "--- a/f\n+++ b/f\n@@ -1 +1 @@\n-a\n+b\n";
        let model = parse_unified_diff(diff).unwrap();
        let hunk = &model.files[0].hunks[0];
        assert_eq!((hunk.source_start, hunk.source_span), (1, 1));
        assert_eq!((hunk.dest_start, hunk.dest_span), (1, 1));
    }

    #[test]
    fn malformed_hunk_header_errors() {
        let diff = "--- a/f\n+++ b/f\n@@ not a range @@\n+x\n";
        assert!(parse_unified_diff(diff).is_err());
    }

    #[test]
    fn header_timestamps_are_dropped() {
        let diff = "--- a/f.txt\t2024-01-01 00:00:00\n+++ b/f.txt\t2024-01-02 00:00:00\n@@ -1,1 +1,1 @@\n-a\n+b\n";
        let model = parse_unified_diff(diff).unwrap();
        assert_eq!(model.files[0].source_path, "f.txt");
        assert_eq!(model.files[0].dest_path, "f.txt");
    }

    #[test]
    fn no_newline_marker_is_skipped() {
        let diff = "--- a/t.rs\n+++ b/t.rs\n@@ -1,2 +1,2 @@\n-old\n+new\n\\ No newline at end of file\n";
        let model = parse_unified_diff(diff).unwrap();
        assert_eq!(model.files[0].hunks[0].lines.len(), 2);
    }

    #[test]
    fn empty_line_is_empty_context() {
        let diff = "--- a/t.rs\n+++ b/t.rs\n@@ -1,3 +1,4 @@\n fn a() {\n\n+    new_line();\n }\n";
        let model = parse_unified_diff(diff).unwrap();
        let hunk = &model.files[0].hunks[0];
        assert_eq!(hunk.lines.len(), 4);
        assert_eq!(hunk.lines[1].kind, DiffLineKind::Context);
        assert_eq!(hunk.lines[1].text, "");
    }

    #[test]
    fn parse_empty_input() {
        let model = parse_unified_diff("").unwrap();
        assert!(model.files.is_empty());
    }

    #[test]
    fn non_diff_text_yields_no_files() {
        let model = parse_unified_diff("just some prose\nwith two lines\n").unwrap();
        assert!(model.files.is_empty());
    }

    #[test]
    fn mnemonic_prefixes_are_stripped() {
        let diff = "--- i/db.rs\n+++ w/db.rs\n@@ -1,1 +1,1 @@\n-a\n+b\n";
        let model = parse_unified_diff(diff).unwrap();
        assert_eq!(model.files[0].source_path, "db.rs");
        assert_eq!(model.files[0].dest_path, "db.rs");
    }

    #[test]
    fn removed_dash_comment_is_not_a_section_header() {
        // Removing an SQL comment produces a body line starting "--- ";
        // it must stay a Removed line, not open a new file section.
        let diff = "--- a/q.sql\n+++ b/q.sql\n@@ -1,2 +1,1 @@\n--- drop me\n select 1;\n";
        let model = parse_unified_diff(diff).unwrap();
        assert_eq!(model.files.len(), 1);

        let hunk = &model.files[0].hunks[0];
        assert_eq!(hunk.lines.len(), 2);
        assert_eq!(hunk.lines[0].kind, DiffLineKind::Removed);
        assert_eq!(hunk.lines[0].text, "-- drop me");
        assert_eq!(hunk.lines[1].kind, DiffLineKind::Context);
        assert_eq!(hunk.lines[1].text, "select 1;");
    }

    #[test]
    fn lone_dashes_line_between_sections_is_skipped() {
        // A stray "--- " line with no "+++ " after it is noise, not a header.
        let diff = "--- not a header\nprose\n--- a/f\n+++ b/f\n@@ -1,1 +1,1 @@\n-a\n+b\n";
        let model = parse_unified_diff(diff).unwrap();
        assert_eq!(model.files.len(), 1);
        assert_eq!(model.files[0].dest_path, "f");
    }
}
