//! Shared token and element types.

/// Half-open byte range into the scanned input.
///
/// Invariant: both endpoints sit on UTF-8 char boundaries of the input that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must be <= end");
        Self { start, end }
    }

    pub fn len(self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Slices `source` by this span.
    pub fn slice(self, source: &str) -> &str {
        &source[self.start..self.end]
    }
}

/// Tag attributes in source order. Names are lowercased and unique; the first occurrence of a
/// repeated name wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds `name` unless it is already present. Returns whether the attribute was stored.
    pub fn insert_if_absent(&mut self, name: String, value: String) -> bool {
        if self.contains(&name) {
            return false;
        }
        self.0.push((name, value));
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Like [`Attributes::get`], but treats an empty value as absent.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(k, _)| k == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(Span),
    /// `span` covers the whole opening tag, `<` through `>`.
    StartTag {
        name: String,
        attributes: Attributes,
        self_closing: bool,
        span: Span,
    },
    /// For self-closing elements `span` equals the span of the preceding `StartTag`.
    EndTag { name: String, span: Span },
    Comment(Span),
    Text(Span),
}

impl Token {
    pub fn span(&self) -> Span {
        match self {
            Token::Doctype(span) | Token::Comment(span) | Token::Text(span) => *span,
            Token::StartTag { span, .. } | Token::EndTag { span, .. } => *span,
        }
    }
}

/// One closed element, reported by the walker in closing order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element<'a> {
    /// Lowercased tag name.
    pub name: String,
    pub attributes: Attributes,
    /// Verbatim source text of the element. For self-closing elements this is the opening tag.
    pub text: &'a str,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_keep_first_occurrence() {
        let mut attrs = Attributes::new();
        assert!(attrs.insert_if_absent("id".to_string(), "one".to_string()));
        assert!(!attrs.insert_if_absent("id".to_string(), "two".to_string()));
        assert_eq!(attrs.get("id"), Some("one"));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn get_non_empty_ignores_blank_values() {
        let mut attrs = Attributes::new();
        attrs.insert_if_absent("src".to_string(), String::new());
        assert_eq!(attrs.get("src"), Some(""));
        assert_eq!(attrs.get_non_empty("src"), None);
    }

    #[test]
    fn span_slices_source() {
        let source = "<p>hi</p>";
        assert_eq!(Span::new(3, 5).slice(source), "hi");
        assert_eq!(Span::new(3, 5).len(), 2);
        assert!(Span::new(4, 4).is_empty());
    }
}
