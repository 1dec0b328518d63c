use anyhow::Result;
use std::{env, path::PathBuf};

/// Well-known locations under the opg home directory.
#[derive(Clone)]
pub struct Paths {
    pub home: PathBuf,
    pub repo: PathBuf,
    pub config: PathBuf,
}

/// Resolve the opg home directory.
///
/// `$XDG_CONFIG_HOME/.opg` when `XDG_CONFIG_HOME` is set, otherwise
/// `$HOME/.config/.opg`.
pub fn opg_home() -> Result<PathBuf> {
    let xdg = env::var_os("XDG_CONFIG_HOME");
    let base = xdg
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env::var_os("HOME").unwrap_or_default()).join(".config"));
    Ok(base.join(".opg"))
}

pub fn paths() -> Result<Paths> {
    let home = opg_home()?;
    Ok(Paths {
        repo: home.join("repo"),
        config: home.join("config.toml"),
        home,
    })
}
