#![no_main]

use libfuzzer_sys::fuzz_target;
use markup::{WalkerConfig, dedupe_resources, walk_with_config};

fuzz_target!(|data: &[u8]| {
    let Ok(html) = std::str::from_utf8(data) else {
        return;
    };
    for config in [WalkerConfig::flushing(), WalkerConfig::dropping()] {
        walk_with_config(html, &config, |element| {
            assert_eq!(element.span.slice(html), element.text);
            assert!(element.text.starts_with('<'));
        });
    }
    let once = dedupe_resources(html);
    assert!(once.len() <= html.len());
});
