//! Pattern anchors and the splice helpers built on them.
//!
//! Every helper is a no-op when the value is empty or the anchor is missing.

use regex::{Regex, RegexBuilder};
use std::ops::Range;
use std::sync::LazyLock;

pub static HTML_OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| fixed(r"(?i)<html\b[^>]*>"));
pub static BODY_OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| fixed(r"(?i)<body\b[^>]*>"));
pub static HEAD_CLOSE_TAG: LazyLock<Regex> = LazyLock::new(|| fixed(r"(?i)</head>"));
pub static BODY_CLOSE_TAG: LazyLock<Regex> = LazyLock::new(|| fixed(r"(?i)</body>"));

fn fixed(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("anchor pattern {pattern:?} is invalid: {err}"))
}

/// Opening `<div ...>` tag whose attributes include `id="<id>"` or `id='<id>'`.
///
/// The id is matched literally and case-insensitively. Returns `None` if the pattern cannot be
/// compiled (an id long enough to exceed the regex size limit).
pub fn div_with_id(id: &str) -> Option<Regex> {
    let pattern = format!(
        r#"<div\b.*?\bid\s*=\s*['"]{}['"][^>]*>"#,
        regex::escape(id)
    );
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(regex) => Some(regex),
        Err(err) => {
            log::warn!(target: "page.anchor", "cannot build anchor for node id {id:?}: {err}");
            None
        }
    }
}

/// Byte range of the first match of `pattern` in `source`.
pub fn find_match(source: &str, pattern: &Regex) -> Option<Range<usize>> {
    pattern.find(source).map(|m| m.range())
}

pub fn insert_at(mut source: String, index: usize, value: &str) -> String {
    source.insert_str(index, value);
    source
}

/// Inserts `value` where the first match starts.
pub fn insert_before_match(source: String, pattern: &Regex, value: &str) -> String {
    splice(source, pattern, value, |range| range.start)
}

/// Inserts `value` before the last byte of the first match, i.e. before the `>` of a tag.
pub fn insert_before_match_end(source: String, pattern: &Regex, value: &str) -> String {
    splice(source, pattern, value, |range| range.end - 1)
}

/// Inserts `value` right after the first match.
pub fn insert_after_match(source: String, pattern: &Regex, value: &str) -> String {
    splice(source, pattern, value, |range| range.end)
}

fn splice(
    source: String,
    pattern: &Regex,
    value: &str,
    position: impl FnOnce(Range<usize>) -> usize,
) -> String {
    if value.is_empty() {
        return source;
    }
    match find_match(&source, pattern) {
        Some(range) => {
            let index = position(range);
            insert_at(source, index, value)
        }
        None => {
            log::trace!(target: "page.anchor", "no match for {}; skipping", pattern.as_str());
            source
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_open_tags_case_insensitively() {
        let html = "<!doctype html><HTML lang=en><Body class=x></Body></HTML>";
        assert_eq!(find_match(html, &HTML_OPEN_TAG), Some(15..29));
        assert_eq!(find_match(html, &BODY_OPEN_TAG), Some(29..43));
        assert_eq!(find_match(html, &BODY_CLOSE_TAG), Some(43..50));
        assert_eq!(find_match(html, &HEAD_CLOSE_TAG), None);
    }

    #[test]
    fn open_tag_pattern_needs_a_word_boundary() {
        assert_eq!(find_match("<bodyguard></bodyguard>", &BODY_OPEN_TAG), None);
        assert_eq!(find_match("<html-x><html>", &HTML_OPEN_TAG), Some(0..8));
    }

    #[test]
    fn inserts_before_tag_end() {
        let out = insert_before_match_end("<body class=x>".to_string(), &BODY_OPEN_TAG, " id=y");
        assert_eq!(out, "<body class=x id=y>");
    }

    #[test]
    fn inserts_before_and_after_matches() {
        let out = insert_before_match("<head></head>".to_string(), &HEAD_CLOSE_TAG, "<title>t</title>");
        assert_eq!(out, "<head><title>t</title></head>");
        let root = div_with_id("root").expect("pattern");
        let out = insert_after_match("<div id=\"root\"></div>".to_string(), &root, "X");
        assert_eq!(out, "<div id=\"root\">X</div>");
    }

    #[test]
    fn empty_value_or_missing_anchor_is_a_no_op() {
        let base = "<html><body></body></html>".to_string();
        assert_eq!(insert_before_match(base.clone(), &HEAD_CLOSE_TAG, "x"), base);
        assert_eq!(insert_before_match(base.clone(), &BODY_CLOSE_TAG, ""), base);
    }

    #[test]
    fn div_anchor_accepts_either_quote_and_other_attributes() {
        let root = div_with_id("root").expect("pattern");
        assert_eq!(find_match("<DIV class=a ID='root' hidden>", &root), Some(0..30));
        assert_eq!(find_match("<div data-x=1 id = \"root\">", &root), Some(0..26));
        assert_eq!(find_match("<div id=\"rooted\">", &root), None);
        assert_eq!(find_match("<span id=\"root\">", &root), None);
    }

    #[test]
    fn div_anchor_is_lazy_and_may_span_earlier_divs_on_one_line() {
        let root = div_with_id("root").expect("pattern");
        let html = "<div class=a></div><div id=\"root\">";
        // Leftmost match starts at the first `<div`; the lazy gap stops at the first id hit.
        assert_eq!(find_match(html, &root), Some(0..34));
    }

    #[test]
    fn div_anchor_does_not_cross_newlines() {
        let root = div_with_id("root").expect("pattern");
        let html = "<div class=a></div>\n<div id=\"root\">";
        assert_eq!(find_match(html, &root), Some(20..35));
    }

    #[test]
    fn div_anchor_treats_id_literally() {
        let dotted = div_with_id("a.b").expect("pattern");
        assert_eq!(find_match("<div id=\"axb\">", &dotted), None);
        assert_eq!(find_match("<div id=\"a.b\">", &dotted), Some(0..14));
    }
}
