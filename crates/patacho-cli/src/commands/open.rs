use anyhow::Result;

use patacho_core::links::{open_external, LinkDirectory, LinkKind};
use patacho_core::AppConfig;

pub fn run(config: &AppConfig, kind: &str, index: usize) -> Result<()> {
    let directory = LinkDirectory::from_config(&config.links)?;
    let kind: LinkKind = kind.parse()?;
    let link = directory.get(kind, index)?;

    println!("Opening {} ({})", link.label, link.url);
    open_external(link);
    Ok(())
}
