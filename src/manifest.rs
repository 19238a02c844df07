//! TOML description of a page to compose.
//!
//! ```toml
//! base = "template.html"          # or: base_html = "<html>...</html>"
//! html_attributes = ['lang="en"']
//! body_attributes = ['class="app"']
//! head = ['<meta charset="utf-8">']
//! body = ['<script src="/app.js"></script>']
//!
//! [[nodes]]
//! id = "root"
//! html = "<p>server rendered</p>"
//!
//! [walker]
//! flush_open_at_eof = false         # default: true
//! ```

use anyhow::{Context, Result, bail};
use page::{ComposeConfig, Page, WalkerConfig};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Template path, relative to the manifest.
    base: Option<PathBuf>,
    /// Inline template.
    base_html: Option<String>,
    #[serde(default)]
    html_attributes: Vec<String>,
    #[serde(default)]
    body_attributes: Vec<String>,
    #[serde(default)]
    head: Vec<String>,
    #[serde(default)]
    body: Vec<String>,
    #[serde(default)]
    nodes: Vec<NodeEntry>,
    #[serde(default)]
    walker: WalkerSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeEntry {
    id: String,
    html: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct WalkerSection {
    flush_open_at_eof: Option<bool>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid manifest {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reads the template named by the manifest. `root` is the manifest's directory.
    pub fn template(&self, root: &Path) -> Result<String> {
        match (&self.base, &self.base_html) {
            (Some(_), Some(_)) => bail!("set either `base` or `base_html`, not both"),
            (None, None) => bail!("missing template: set `base` or `base_html`"),
            (None, Some(html)) => Ok(html.clone()),
            (Some(rel), None) => {
                let path = root.join(rel);
                fs::read_to_string(&path)
                    .with_context(|| format!("failed to read template {}", path.display()))
            }
        }
    }

    /// Applies every fragment, in file order, to a fresh page over `template`.
    pub fn build_page(&self, template: String) -> Page {
        let mut page = Page::new(template);
        for attrs in &self.html_attributes {
            page = page.append_html_attributes(attrs);
        }
        for attrs in &self.body_attributes {
            page = page.append_body_attributes(attrs);
        }
        for html in &self.head {
            page = page.append_head(html);
        }
        for html in &self.body {
            page = page.append_body(html);
        }
        for node in &self.nodes {
            page = page.append_node(&node.id, &node.html);
        }
        page
    }

    pub fn compose_config(&self) -> ComposeConfig {
        let mut walker = WalkerConfig::default();
        if let Some(flush) = self.walker.flush_open_at_eof {
            walker.flush_open_at_eof = flush;
        }
        ComposeConfig { walker }
    }
}
