use markup::Element;
use std::fmt::Write;

pub mod fixtures;

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' => {
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// One line per element: `name [attr=value ...] | text`.
pub fn element_snapshot(elements: &[Element<'_>]) -> Vec<String> {
    elements
        .iter()
        .map(|element| {
            let mut line = element.name.clone();
            for (name, value) in element.attributes.iter() {
                let _ = write!(&mut line, " {name}={}", escape_text(value));
            }
            let _ = write!(&mut line, " | {}", escape_text(element.text));
            line
        })
        .collect()
}

/// Human-readable report of the first differing line, with two lines of context.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    const MISSING: &str = "<missing>";
    let max = expected.len().max(actual.len());
    let line = |lines: &[String], i: usize| lines.get(i).map_or(MISSING, String::as_str).to_string();
    let mut out = String::new();

    let mismatch = (0..max).find(|&i| line(expected, i) != line(actual, i));
    match mismatch {
        Some(i) => {
            let start = i.saturating_sub(2);
            let end = (i + 3).min(max);
            let _ = writeln!(
                &mut out,
                "first mismatch at line {} (showing {}..={}):",
                i + 1,
                start + 1,
                end
            );
            for idx in start..end {
                let marker = if idx == i { ">" } else { " " };
                let _ = writeln!(&mut out, "{marker} {:>4}  expected: {}", idx + 1, line(expected, idx));
                let _ = writeln!(&mut out, "{marker} {:>4}    actual: {}", idx + 1, line(actual, idx));
            }
        }
        None if expected.len() != actual.len() => {
            let _ = writeln!(&mut out, "prefix matched but lengths differ");
        }
        None => {}
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

/// Splits composed HTML after every `>` so page diffs point at the offending tag.
pub fn html_lines(html: &str) -> Vec<String> {
    html.split_inclusive('>').map(escape_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_points_at_first_mismatch() {
        let expected = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let actual = vec!["a".to_string(), "x".to_string(), "c".to_string()];
        let report = diff_lines(&expected, &actual);
        assert!(report.contains("first mismatch at line 2"), "{report}");
        assert!(report.contains(">    2  expected: b"), "{report}");
        assert!(report.contains(">    2    actual: x"), "{report}");
    }

    #[test]
    fn diff_reports_missing_lines() {
        let expected = vec!["a".to_string()];
        let actual = vec!["a".to_string(), "b".to_string()];
        let report = diff_lines(&expected, &actual);
        assert!(report.contains("expected: <missing>"), "{report}");
        assert!(report.contains("expected 1 lines, actual 2 lines"), "{report}");
    }

    #[test]
    fn snapshot_lists_attributes_and_text() {
        let found = markup::elements("<p>\n<br class=x></p>");
        assert_eq!(
            element_snapshot(&found),
            vec!["br class=x | <br class=x>", "p | <p>\\n<br class=x></p>"]
        );
    }

    #[test]
    fn html_lines_split_after_tags() {
        assert_eq!(html_lines("<a>b</a>"), vec!["<a>", "b</a>"]);
    }
}
