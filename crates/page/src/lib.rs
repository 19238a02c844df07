//! Page composition: immutable page snapshots and the renderer that splices their fragments
//! into a base HTML template.

pub mod anchor;
pub mod page;
pub mod render;

pub use crate::page::Page;
pub use crate::render::{ComposeConfig, render_page, render_page_with_config};
pub use markup::WalkerConfig;
