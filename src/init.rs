use anyhow::{Context, Result};
use std::fs;

use crate::paths::paths;

/// CLI command: write a starter `config.toml` under the opg home.
///
/// The template is embedded at compile time from `assets/config.toml`
/// using [`include_str!`], so the shipped binary needs no extra files.
/// An existing config is never overwritten.
///
/// # Errors
/// Returns an error if the home directory or the config file cannot be
/// created.
pub fn cmd_init() -> Result<()> {
    let p = paths()?;
    if p.config.exists() {
        eprintln!("config already exists: {}", p.config.display());
        return Ok(());
    }

    fs::create_dir_all(&p.home)
        .with_context(|| format!("failed to create {}", p.home.display()))?;
    fs::write(&p.config, include_str!("../assets/config.toml"))
        .with_context(|| format!("failed to write {}", p.config.display()))?;

    println!("wrote {}", p.config.display());
    println!("edit [repository].url, then run `opg collect`");
    Ok(())
}
