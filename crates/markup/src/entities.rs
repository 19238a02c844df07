use memchr::memchr;
use std::borrow::Cow;

/// Named references understood in attribute values. Anything else is left as written.
const NAMED: &[(&[u8], char)] = &[
    (b"&amp;", '&'),
    (b"&lt;", '<'),
    (b"&gt;", '>'),
    (b"&quot;", '"'),
    (b"&apos;", '\''),
    (b"&nbsp;", '\u{00A0}'),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// Decode character references in an attribute value.
///
/// Contract:
/// - Named references from [`NAMED`] decode; unknown names stay verbatim.
/// - Numeric references decode only when semicolon-terminated and naming a valid scalar value.
/// - Values without `&` are borrowed unchanged.
///
/// Dedup keys are built from decoded values, so `src="a.js?x=1&amp;y=2"` and
/// `src="a.js?x=1&y=2"` name the same resource.
pub(crate) fn decode_attribute_value(raw: &str) -> Cow<'_, str> {
    let bytes = raw.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return Cow::Borrowed(raw);
    };

    let mut out = String::with_capacity(raw.len());
    out.push_str(&raw[..first]);
    let mut i = first;
    let mut copy_start = first;

    while i < bytes.len() {
        if bytes[i] != b'&' {
            i += 1;
            continue;
        }
        out.push_str(&raw[copy_start..i]);

        if let Some((len, ch)) = match_named(&bytes[i..]) {
            out.push(ch);
            i += len;
        } else if let Some((len, ch)) = match_numeric(&raw[i..]) {
            out.push(ch);
            i += len;
        } else {
            out.push('&');
            i += 1;
        }
        copy_start = i;
    }

    out.push_str(&raw[copy_start..]);
    Cow::Owned(out)
}

fn match_named(rest: &[u8]) -> Option<(usize, char)> {
    NAMED
        .iter()
        .find(|(name, _)| rest.starts_with(name))
        .map(|(name, ch)| (name.len(), *ch))
}

/// `rest` starts at `&`. Returns the consumed length and decoded char.
fn match_numeric(rest: &str) -> Option<(usize, char)> {
    let bytes = rest.as_bytes();
    if bytes.get(1) != Some(&b'#') {
        return None;
    }
    let (digits_start, radix, max_digits) = match bytes.get(2) {
        Some(b'x') | Some(b'X') => (3, 16, MAX_HEX_DIGITS),
        _ => (2, 10, MAX_DEC_DIGITS),
    };

    // Bounded scan to avoid quadratic behavior on long digit runs.
    let mut j = digits_start;
    while j < bytes.len() && j - digits_start <= max_digits {
        let b = bytes[j];
        if b == b';' {
            if j == digits_start {
                return None;
            }
            let value = u32::from_str_radix(&rest[digits_start..j], radix).ok()?;
            return char::from_u32(value).map(|ch| (j + 1, ch));
        }
        let ok = if radix == 16 {
            b.is_ascii_hexdigit()
        } else {
            b.is_ascii_digit()
        };
        if !ok {
            return None;
        }
        j += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_values_are_borrowed() {
        assert!(matches!(decode_attribute_value("/app.js"), Cow::Borrowed("/app.js")));
        assert!(matches!(decode_attribute_value("120×32"), Cow::Borrowed(_)));
    }

    #[test]
    fn decodes_named_references() {
        assert_eq!(decode_attribute_value("a.js?x=1&amp;y=2"), "a.js?x=1&y=2");
        assert_eq!(decode_attribute_value("&lt;b&gt;"), "<b>");
        assert_eq!(decode_attribute_value("&quot;q&quot; &apos;s&apos;"), "\"q\" 's'");
        assert_eq!(decode_attribute_value("a&nbsp;b"), "a\u{00A0}b");
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(decode_attribute_value("&#215;"), "×");
        assert_eq!(decode_attribute_value("&#xD7;"), "×");
        assert_eq!(decode_attribute_value("&#x10FFFF;"), "\u{10FFFF}");
        assert_eq!(decode_attribute_value("π &amp; σ"), "π & σ");
    }

    #[test]
    fn leaves_unknown_and_malformed_references() {
        let unchanged = [
            "&",
            "&&",
            "&;",
            "&#;",
            "&#x;",
            "&amp",
            "&unknown;",
            "&#xZZ;",
            "&#123",
            "&#xD800;",
            "&#x110000;",
            "&#11141111;",
        ];
        for s in unchanged {
            assert_eq!(decode_attribute_value(s), s, "input {s:?}");
        }
    }

    #[test]
    fn malformed_reference_does_not_swallow_next_one() {
        assert_eq!(decode_attribute_value("&#xZZ;&amp;"), "&#xZZ;&");
    }
}
