//! Stack-based element walker.
//!
//! Reports one [`Element`] per closing event, in closing order, without building a tree.
//! Children are therefore reported before their parents.

use crate::tokenizer::tokenize;
use crate::types::{Attributes, Element, Span, Token};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Report elements still open at end of input (innermost first, text running to the end
    /// of input). When false they are dropped silently. Defaults to true.
    pub flush_open_at_eof: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self::flushing()
    }
}

impl WalkerConfig {
    pub fn flushing() -> Self {
        Self {
            flush_open_at_eof: true,
        }
    }

    /// Drops elements still open at end of input instead of reporting them.
    pub fn dropping() -> Self {
        Self {
            flush_open_at_eof: false,
        }
    }
}

/// Open-tag stack entry.
#[derive(Debug)]
struct OpenTag {
    name: String,
    attributes: Attributes,
    span: Span,
}

pub fn walk<'a>(html: &'a str, visit: impl FnMut(Element<'a>)) {
    walk_with_config(html, &WalkerConfig::default(), visit);
}

pub fn walk_with_config<'a>(
    html: &'a str,
    config: &WalkerConfig,
    mut visit: impl FnMut(Element<'a>),
) {
    let mut stack: Vec<OpenTag> = Vec::new();

    for token in tokenize(html) {
        match token {
            Token::StartTag {
                name,
                attributes,
                span,
                ..
            } => stack.push(OpenTag {
                name,
                attributes,
                span,
            }),
            Token::EndTag { name, span } => {
                if !stack.iter().any(|tag| tag.name == name) {
                    log::trace!(
                        target: "markup.walker",
                        "ignoring unmatched </{name}> at {}",
                        span.start
                    );
                    continue;
                }
                while let Some(tag) = stack.pop() {
                    let matched = tag.name == name;
                    // Equal spans mean the tokenizer opened and closed the element in one go.
                    let end = if tag.span == span {
                        tag.span.end
                    } else {
                        span.end
                    };
                    if !matched {
                        log::trace!(
                            target: "markup.walker",
                            "<{}> at {} implicitly closed by </{name}>",
                            tag.name,
                            tag.span.start
                        );
                    }
                    let element_span = Span::new(tag.span.start, end);
                    visit(Element {
                        name: tag.name,
                        attributes: tag.attributes,
                        text: element_span.slice(html),
                        span: element_span,
                    });
                    if matched {
                        break;
                    }
                }
            }
            Token::Text(_) | Token::Comment(_) | Token::Doctype(_) => {}
        }
    }

    if stack.is_empty() {
        return;
    }
    if !config.flush_open_at_eof {
        log::trace!(
            target: "markup.walker",
            "dropping {} unterminated element(s) at end of input",
            stack.len()
        );
        return;
    }
    while let Some(tag) = stack.pop() {
        let element_span = Span::new(tag.span.start, html.len());
        visit(Element {
            name: tag.name,
            attributes: tag.attributes,
            text: element_span.slice(html),
            span: element_span,
        });
    }
}

/// Collects every element [`walk`] reports.
pub fn elements(html: &str) -> Vec<Element<'_>> {
    let mut out = Vec::new();
    walk(html, |element| out.push(element));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_and_texts(html: &str, config: &WalkerConfig) -> Vec<(String, String)> {
        let mut out = Vec::new();
        walk_with_config(html, config, |element| {
            out.push((element.name, element.text.to_string()))
        });
        out
    }

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(n, t)| (n.to_string(), t.to_string()))
            .collect()
    }

    #[test]
    fn reports_children_before_parents() {
        let got = names_and_texts("<ul><li>a</li><li>b</li></ul>", &WalkerConfig::default());
        assert_eq!(
            got,
            pairs(&[
                ("li", "<li>a</li>"),
                ("li", "<li>b</li>"),
                ("ul", "<ul><li>a</li><li>b</li></ul>"),
            ])
        );
    }

    #[test]
    fn self_closing_text_is_the_opening_tag() {
        let got = names_and_texts("<p>x<br/>y<input name=q></p>", &WalkerConfig::default());
        assert_eq!(
            got,
            pairs(&[
                ("br", "<br/>"),
                ("input", "<input name=q>"),
                ("p", "<p>x<br/>y<input name=q></p>"),
            ])
        );
    }

    #[test]
    fn unrelated_closer_implicitly_closes_open_elements() {
        let got = names_and_texts("<body><p>a<div>b</div></body>", &WalkerConfig::default());
        assert_eq!(
            got,
            pairs(&[
                ("div", "<div>b</div>"),
                ("p", "<p>a<div>b</div></body>"),
                ("body", "<body><p>a<div>b</div></body>"),
            ])
        );
    }

    #[test]
    fn unmatched_closer_is_ignored() {
        let got = names_and_texts("<div>a</span>b</div>", &WalkerConfig::default());
        assert_eq!(got, pairs(&[("div", "<div>a</span>b</div>")]));
    }

    #[test]
    fn unterminated_elements_are_flushed_by_default() {
        let got = names_and_texts("<p>a<div>b</div>", &WalkerConfig::default());
        assert_eq!(got, pairs(&[("div", "<div>b</div>"), ("p", "<p>a<div>b</div>")]));
        let names: Vec<_> = elements("<p>a<div>b</div>").iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, ["div", "p"]);
    }

    #[test]
    fn unterminated_elements_can_be_dropped() {
        let got = names_and_texts("<p>a<div>b</div>", &WalkerConfig::dropping());
        assert_eq!(got, pairs(&[("div", "<div>b</div>")]));
    }

    #[test]
    fn nested_unterminated_elements_flush_innermost_first() {
        let got = names_and_texts("<main><p>a<div>b</div>", &WalkerConfig::flushing());
        assert_eq!(
            got,
            pairs(&[
                ("div", "<div>b</div>"),
                ("p", "<p>a<div>b</div>"),
                ("main", "<main><p>a<div>b</div>"),
            ])
        );
    }

    #[test]
    fn element_spans_match_text() {
        let html = "<html><head><meta charset=utf-8></head></html>";
        for element in elements(html) {
            assert_eq!(element.span.slice(html), element.text);
        }
    }

    #[test]
    fn attributes_travel_with_the_element() {
        let found = elements("<div><script src=\"/a.js\" defer></script></div>");
        assert_eq!(found[0].name, "script");
        assert_eq!(found[0].attributes.get("src"), Some("/a.js"));
        assert_eq!(found[0].attributes.get("defer"), Some(""));
        assert!(found[1].attributes.is_empty());
    }

    #[test]
    fn count_matches_complete_pairs_plus_void_tags() {
        let html = "<html><head><title>t</title><link rel=icon href=/f.ico></head>\
                    <body><div><img src=a.png><p>x</p></div></body></html>";
        // html head title link body div img p
        assert_eq!(elements(html).len(), 8);
    }
}
