use anyhow::{Context, Result, bail};
use mimalloc::MiMalloc;
use std::fs;
use std::path::{Path, PathBuf};

mod manifest;

use crate::manifest::Manifest;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: compositor <manifest.toml> [--out <file>]";

struct Args {
    manifest: PathBuf,
    out: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut manifest = None;
    let mut out = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" | "-o" => {
                let Some(path) = args.next() else {
                    bail!("--out needs a path\n{USAGE}");
                };
                out = Some(PathBuf::from(path));
            }
            "--help" | "-h" => bail!("{USAGE}"),
            _ if manifest.is_none() => manifest = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument {arg:?}\n{USAGE}"),
        }
    }
    let Some(manifest) = manifest else {
        bail!("{USAGE}");
    };
    Ok(Args { manifest, out })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args(std::env::args().skip(1))?;

    let manifest = Manifest::load(&args.manifest)?;
    let root = args.manifest.parent().unwrap_or(Path::new("."));
    let template = manifest.template(root)?;
    let page = manifest.build_page(template);
    let html = page::render_page_with_config(&page, &manifest.compose_config());

    match args.out {
        Some(path) => {
            fs::write(&path, &html).with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {} bytes to {}", html.len(), path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_manifest_and_out() {
        let parsed = args(&["page.toml", "--out", "index.html"]).expect("valid args");
        assert_eq!(parsed.manifest, PathBuf::from("page.toml"));
        assert_eq!(parsed.out, Some(PathBuf::from("index.html")));
    }

    #[test]
    fn rejects_missing_or_extra_arguments() {
        assert!(args(&[]).is_err());
        assert!(args(&["a.toml", "b.toml"]).is_err());
        assert!(args(&["a.toml", "--out"]).is_err());
    }
}
