use crate::anchor::{
    BODY_CLOSE_TAG, BODY_OPEN_TAG, HEAD_CLOSE_TAG, HTML_OPEN_TAG, div_with_id, insert_after_match,
    insert_before_match, insert_before_match_end,
};
use crate::page::Page;
use markup::{WalkerConfig, dedupe_resources_with_config};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComposeConfig {
    /// Forwarded to the resource deduplicator's walker.
    pub walker: WalkerConfig,
}

/// Produces the final HTML for `page`.
pub fn render_page(page: &Page) -> String {
    render_page_with_config(page, &ComposeConfig::default())
}

/// Splices the page fragments into its template, in this order:
///
/// 1. html attributes before the `>` of the first `<html ...>`
/// 2. body attributes before the `>` of the first `<body ...>`
/// 3. head markup before the first `</head>`
/// 4. body markup before the first `</body>`
/// 5. duplicate `script`/`link`/`meta` removal over the whole result
/// 6. node fragments right after the first `<div ... id="...">` of each id, in node order
///
/// Missing anchors and empty fragments are skipped.
pub fn render_page_with_config(page: &Page, config: &ComposeConfig) -> String {
    let mut content = page.base().to_string();
    content = insert_before_match_end(content, &HTML_OPEN_TAG, page.html_attributes());
    content = insert_before_match_end(content, &BODY_OPEN_TAG, page.body_attributes());
    content = insert_before_match(content, &HEAD_CLOSE_TAG, page.head());
    content = insert_before_match(content, &BODY_CLOSE_TAG, page.body());

    content = dedupe_resources_with_config(&content, &config.walker);

    for (id, html) in page.nodes() {
        if html.is_empty() {
            continue;
        }
        let Some(anchor) = div_with_id(id) else {
            continue;
        };
        content = insert_after_match(content, &anchor, html);
    }

    log::debug!(
        target: "page.render",
        "rendered {} bytes from a {} byte template",
        content.len(),
        page.base().len()
    );
    content
}
