//! Removal of duplicate `script`, `link` and `meta` tags.
//!
//! Of all elements sharing a [`ResourceKey`], only the one reported last by the walker
//! survives. Earlier copies are removed by exact text: the first occurrence of the earlier
//! element's source text in the current output is cut out. This is textual, not positional,
//! so a verbatim copy of that text appearing earlier (inside a comment, say) is what gets
//! removed.

use crate::types::Element;
use crate::walker::{WalkerConfig, walk_with_config};
use std::collections::HashMap;
use std::fmt;

/// Identifies "the same resource" across tag occurrences.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceKey(String);

impl ResourceKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives the dedup key for `element`, or `None` for elements that are never deduplicated.
///
/// Empty attribute values count as missing.
pub fn resource_key(element: &Element<'_>) -> Option<ResourceKey> {
    let attrs = &element.attributes;
    let key = match element.name.as_str() {
        "script" => format!("script[src={}]", attrs.get_non_empty("src")?),
        "link" => {
            let rel = attrs.get_non_empty("rel");
            let href = attrs.get_non_empty("href");
            if rel.is_none() && href.is_none() {
                return None;
            }
            format!(
                "link[rel={}][href={}]",
                rel.unwrap_or_default(),
                href.unwrap_or_default()
            )
        }
        "meta" => {
            if attrs.get_non_empty("charset").is_some() {
                "meta[charset]".to_string()
            } else {
                format!("meta[name={}]", attrs.get_non_empty("name")?)
            }
        }
        _ => return None,
    };
    Some(ResourceKey(key))
}

pub fn dedupe_resources(html: &str) -> String {
    dedupe_resources_with_config(html, &WalkerConfig::default())
}

pub fn dedupe_resources_with_config(html: &str, config: &WalkerConfig) -> String {
    let mut last_seen: HashMap<ResourceKey, &str> = HashMap::new();
    let mut result = html.to_string();

    walk_with_config(html, config, |element| {
        let Some(key) = resource_key(&element) else {
            return;
        };
        let Some(previous) = last_seen.insert(key.clone(), element.text) else {
            return;
        };
        match result.find(previous) {
            Some(index) => {
                log::debug!(
                    target: "markup.dedup",
                    "removing earlier {key} ({} bytes at {index})",
                    previous.len()
                );
                result.replace_range(index..index + previous.len(), "");
            }
            None => {
                log::trace!(
                    target: "markup.dedup",
                    "earlier {key} no longer present in output"
                );
            }
        }
    });

    result
}
