//! Tag-level HTML scanning: a span-preserving tokenizer, a stack-based element walker and a
//! textual deduplicator for `script`/`link`/`meta` resources.

pub mod dedup;
pub mod walker;

mod entities;
mod tokenizer;
mod types;

pub use crate::dedup::{ResourceKey, dedupe_resources, dedupe_resources_with_config, resource_key};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Attributes, Element, Span, Token};
pub use crate::walker::{WalkerConfig, elements, walk, walk_with_config};
