#![no_main]

use libfuzzer_sys::fuzz_target;
use page::Page;

const TEMPLATE: &str =
    "<!DOCTYPE html><html><head></head><body><div id=\"root\"></div></body></html>";

fuzz_target!(|data: &[u8]| {
    let Ok(fragment) = std::str::from_utf8(data) else {
        return;
    };
    let page = Page::new(TEMPLATE)
        .append_html_attributes(fragment)
        .append_head(fragment)
        .append_body(fragment)
        .append_node("root", fragment);
    let _ = page.render();

    let page = Page::new(fragment).append_head("<meta charset=utf-8>").append_node(fragment, "x");
    let _ = page.render();
});
