//! Initialize .habit-heroes.toml configuration

use anyhow::Result;
use habit_heroes_core::config::CONFIG_FILENAME;
use habit_heroes_core::HeroesConfig;
use std::path::Path;

pub fn run(path: Option<&Path>) -> Result<()> {
    let target_path = path.unwrap_or_else(|| Path::new("."));
    let config_path = target_path.join(CONFIG_FILENAME);

    if config_path.exists() {
        println!("⚠️  {CONFIG_FILENAME} already exists at {:?}", config_path);
        return Ok(());
    }

    let config = HeroesConfig::default();
    config.save(&config_path)?;

    println!("✅ Created {CONFIG_FILENAME} at {:?}", config_path);
    println!("\nAdjust the free-tier limits, then run:");
    println!("  habit-heroes status --user user.json");

    Ok(())
}
