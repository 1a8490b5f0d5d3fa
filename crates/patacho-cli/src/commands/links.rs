use anyhow::Result;

use patacho_core::links::{LinkDirectory, LinkKind};
use patacho_core::AppConfig;

pub fn run(config: &AppConfig, kind: Option<&str>) -> Result<()> {
    let directory = LinkDirectory::from_config(&config.links)?;
    let kind = kind.map(str::parse::<LinkKind>).transpose()?;

    let links: Vec<_> = directory
        .all()
        .iter()
        .filter(|link| kind.map_or(true, |k| link.kind == k))
        .collect();

    if links.is_empty() {
        println!("No links configured.");
        return Ok(());
    }

    let mut current = None;
    let mut index = 0;
    for link in links {
        if current != Some(link.kind) {
            if current.is_some() {
                println!();
            }
            println!("{}:", link.kind);
            current = Some(link.kind);
            index = 0;
        }
        println!("  [{}] {}", index, link.label);
        println!("      {}", link.url);
        index += 1;
    }

    Ok(())
}
