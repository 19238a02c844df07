use std::sync::Arc;

/// A page being assembled around a base HTML template.
///
/// Values are snapshots: every `append_*` call returns a new `Page` and leaves the receiver
/// untouched. The template itself is shared between snapshots and never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    base: Arc<str>,
    head: String,
    body: String,
    html_attributes: String,
    body_attributes: String,
    /// Fragments keyed by element id, in first-insertion order.
    nodes: Vec<(String, String)>,
}

impl Page {
    pub fn new(base: impl Into<Arc<str>>) -> Self {
        Self {
            base: base.into(),
            head: String::new(),
            body: String::new(),
            html_attributes: String::new(),
            body_attributes: String::new(),
            nodes: Vec::new(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Markup inserted before `</head>`.
    pub fn head(&self) -> &str {
        &self.head
    }

    /// Markup inserted before `</body>`.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Attribute text inserted before the `>` of `<html ...>`. Each appended chunk carries its
    /// own leading space.
    pub fn html_attributes(&self) -> &str {
        &self.html_attributes
    }

    /// Attribute text inserted before the `>` of `<body ...>`.
    pub fn body_attributes(&self) -> &str {
        &self.body_attributes
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes.iter().map(|(id, html)| (id.as_str(), html.as_str()))
    }

    pub fn node(&self, id: &str) -> Option<&str> {
        self.nodes
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, html)| html.as_str())
    }

    #[must_use]
    pub fn append_head(&self, html: &str) -> Page {
        Page {
            head: concat(&self.head, html),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn append_body(&self, html: &str) -> Page {
        Page {
            body: concat(&self.body, html),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn append_html_attributes(&self, attributes: &str) -> Page {
        Page {
            html_attributes: join_attributes(&self.html_attributes, attributes),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn append_body_attributes(&self, attributes: &str) -> Page {
        Page {
            body_attributes: join_attributes(&self.body_attributes, attributes),
            ..self.clone()
        }
    }

    /// Appends `html` to the fragment for element `id`. A new id is recorded even when `html`
    /// is empty.
    #[must_use]
    pub fn append_node(&self, id: &str, html: &str) -> Page {
        let mut nodes = self.nodes.clone();
        match nodes.iter_mut().find(|(key, _)| key == id) {
            Some((_, existing)) => existing.push_str(html),
            None => nodes.push((id.to_string(), html.to_string())),
        }
        Page {
            nodes,
            ..self.clone()
        }
    }

    pub fn render(&self) -> String {
        crate::render::render_page(self)
    }
}

fn concat(current: &str, extra: &str) -> String {
    let mut out = String::with_capacity(current.len() + extra.len());
    out.push_str(current);
    out.push_str(extra);
    out
}

fn join_attributes(current: &str, extra: &str) -> String {
    if extra.is_empty() {
        return current.to_string();
    }
    format!("{current} {extra}")
}
