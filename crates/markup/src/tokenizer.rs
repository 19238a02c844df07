//! Span-preserving HTML tokenizer.
//!
//! Produces just enough structure for the walker: tag names, decoded attributes and exact
//! byte spans. Text, comments and doctypes are reported as bare spans. No entity decoding
//! happens outside attribute values and no tree-construction rules are applied.
//!
//! Known limitations (intentional):
//! - Tag/attribute names are restricted to ASCII `[A-Za-z0-9:_-]`.
//! - Raw-text close-tag scanning accepts only ASCII whitespace before `>`.
//! - Start tags never implicitly close other elements (`<p><p>` nests).
use crate::entities::decode_attribute_value;
use crate::types::{Attributes, Span, Token};
use memchr::memchr;

const COMMENT_START: &[u8] = b"<!--";
const COMMENT_END: &str = "-->";
const DOCTYPE_START: &[u8] = b"<!doctype";

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':'
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_rawtext_element(name: &str) -> bool {
    matches!(name, "script" | "style" | "textarea" | "title")
}

/// Finds `</name` followed by optional ASCII whitespace and `>`, case-insensitively.
/// Returns the close tag's span relative to `haystack`.
// Only attempts matches at ASCII `<`, which never occurs inside a UTF-8 continuation byte.
fn find_rawtext_close_tag(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let hay = haystack.as_bytes();
    let len = hay.len();
    let name = name.as_bytes();
    let n = name.len() + 2;
    let mut i = 0;
    while i + n <= len {
        let rel = memchr(b'<', &hay[i..])?;
        i += rel;
        if i + n > len {
            return None;
        }
        if hay[i + 1] == b'/' && starts_with_ignore_ascii_case_at(hay, i + 2, name) {
            let mut k = i + n;
            while k < len && hay[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && hay[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

/// Position just past the next `>` at or after `from`, or the input length.
fn skip_past_gt(bytes: &[u8], from: usize) -> usize {
    match memchr(b'>', &bytes[from..]) {
        Some(rel) => from + rel + 1,
        None => bytes.len(),
    }
}

struct StartTag {
    name: String,
    attributes: Attributes,
    explicit_self_close: bool,
    /// Index just past the closing `>`.
    end: usize,
}

/// Parses the start tag whose name begins at `i + 1`. Returns `None` when the input ends
/// before the tag's `>`.
fn parse_start_tag(input: &str, i: usize) -> Option<StartTag> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let name_start = i + 1;
    let mut k = name_start;
    while k < len && is_name_char(bytes[k]) {
        k += 1;
    }
    let name = input[name_start..k].to_ascii_lowercase();
    let mut attributes = Attributes::new();

    let skip_whitespace = |k: &mut usize| {
        while *k < len && bytes[*k].is_ascii_whitespace() {
            *k += 1;
        }
    };

    loop {
        skip_whitespace(&mut k);
        if k >= len {
            return None;
        }
        match bytes[k] {
            b'>' => {
                return Some(StartTag {
                    name,
                    attributes,
                    explicit_self_close: false,
                    end: k + 1,
                });
            }
            b'/' if k + 1 < len && bytes[k + 1] == b'>' => {
                return Some(StartTag {
                    name,
                    attributes,
                    explicit_self_close: true,
                    end: k + 2,
                });
            }
            b'/' => {
                k += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = k;
        while k < len && is_name_char(bytes[k]) {
            k += 1;
        }
        if attr_start == k {
            // Stray byte such as a lone quote; skip it.
            k += 1;
            continue;
        }
        let attr_name = input[attr_start..k].to_ascii_lowercase();

        skip_whitespace(&mut k);
        let mut value = String::new();
        if k < len && bytes[k] == b'=' {
            k += 1;
            skip_whitespace(&mut k);
            if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                k += 1;
                let value_start = k;
                k = match memchr(quote, &bytes[k..]) {
                    Some(rel) => k + rel,
                    None => return None,
                };
                value = decode_attribute_value(&input[value_start..k]).into_owned();
                k += 1;
            } else {
                let value_start = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                        break;
                    }
                    k += 1;
                }
                value = decode_attribute_value(&input[value_start..k]).into_owned();
            }
        }
        attributes.insert_if_absent(attr_name, value);
    }
}

/// Tokenizes `input` in a single forward pass.
///
/// Self-closing elements (void elements, and `.../>` tags other than raw-text ones) produce a `StartTag` immediately
/// followed by an `EndTag` carrying the same span. A raw-text element that is never closed
/// swallows the rest of the input as text and gets no `EndTag`.
pub fn tokenize(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut out = Vec::new();
    let mut i = 0;
    // Invariant: every span endpoint is either 0, len, or adjacent to an ASCII structural
    // byte, so all spans are UTF-8 boundaries.
    while i < len {
        if bytes[i] != b'<' {
            let start = i;
            i = memchr(b'<', &bytes[i..]).map_or(len, |rel| i + rel);
            out.push(Token::Text(Span::new(start, i)));
            continue;
        }

        if starts_with_ignore_ascii_case_at(bytes, i, COMMENT_START) {
            let body_start = i + COMMENT_START.len();
            let end = input[body_start..]
                .find(COMMENT_END)
                .map_or(len, |rel| body_start + rel + COMMENT_END.len());
            out.push(Token::Comment(Span::new(i, end)));
            i = end;
            continue;
        }

        let next = bytes.get(i + 1).copied();
        match next {
            Some(b'!') | Some(b'?') => {
                let end = skip_past_gt(bytes, i);
                let span = Span::new(i, end);
                if starts_with_ignore_ascii_case_at(bytes, i, DOCTYPE_START) {
                    out.push(Token::Doctype(span));
                } else {
                    out.push(Token::Comment(span));
                }
                i = end;
            }
            Some(b'/') => {
                let name_start = i + 2;
                if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
                    // Bogus end tag like `</ x>` or `</>`: not a closer.
                    let end = skip_past_gt(bytes, i);
                    out.push(Token::Comment(Span::new(i, end)));
                    i = end;
                    continue;
                }
                let mut j = name_start;
                while j < len && is_name_char(bytes[j]) {
                    j += 1;
                }
                let name = input[name_start..j].to_ascii_lowercase();
                let end = skip_past_gt(bytes, j);
                out.push(Token::EndTag {
                    name,
                    span: Span::new(i, end),
                });
                i = end;
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let Some(tag) = parse_start_tag(input, i) else {
                    // Truncated tag at end of input.
                    out.push(Token::Text(Span::new(i, len)));
                    break;
                };
                let span = Span::new(i, tag.end);
                // `/>` is ignored on raw-text elements: `<script/>` still opens a script.
                let rawtext = is_rawtext_element(&tag.name);
                let self_closing =
                    is_void_element(&tag.name) || (tag.explicit_self_close && !rawtext);
                let name = tag.name;
                i = tag.end;

                if self_closing {
                    out.push(Token::StartTag {
                        name: name.clone(),
                        attributes: tag.attributes,
                        self_closing,
                        span,
                    });
                    out.push(Token::EndTag { name, span });
                    continue;
                }

                out.push(Token::StartTag {
                    name: name.clone(),
                    attributes: tag.attributes,
                    self_closing,
                    span,
                });
                if !rawtext {
                    continue;
                }
                match find_rawtext_close_tag(&input[i..], &name) {
                    Some((rel_start, rel_end)) => {
                        if rel_start > 0 {
                            out.push(Token::Text(Span::new(i, i + rel_start)));
                        }
                        out.push(Token::EndTag {
                            name,
                            span: Span::new(i + rel_start, i + rel_end),
                        });
                        i += rel_end;
                    }
                    None => {
                        if i < len {
                            out.push(Token::Text(Span::new(i, len)));
                        }
                        break;
                    }
                }
            }
            _ => {
                // `<` that does not start markup is text.
                let start = i;
                i = memchr(b'<', &bytes[i + 1..]).map_or(len, |rel| i + 1 + rel);
                out.push(Token::Text(Span::new(start, i)));
            }
        }
    }
    out
}
