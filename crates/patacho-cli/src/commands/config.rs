use anyhow::Result;

use patacho_core::AppConfig;

/// Print the effective configuration, after file and environment overrides
pub fn run(config: &AppConfig) -> Result<()> {
    println!("# {}", AppConfig::config_path().display());
    print!("{}", config.to_toml()?);
    Ok(())
}
