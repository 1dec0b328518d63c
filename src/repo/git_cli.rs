use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Invokes the external clone operation.
///
/// Production code uses [`GitCli`]; tests use a recording stub to verify
/// when the clone is (and is not) invoked.
pub trait CloneRunner {
    /// Materialize the repository at `url` into `dest`.
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Backend that shells out to the `git` binary.
pub struct GitCli;

impl CloneRunner for GitCli {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        // stdio is inherited so git's own progress output reaches the
        // user. The exit status is deliberately not inspected; only a
        // failure to spawn git is an error.
        Command::new("git")
            .arg("clone")
            .arg(url)
            .arg(dest)
            .status()
            .with_context(|| format!("git clone {}", url))?;
        Ok(())
    }
}

/// Result of [`ensure_repo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The checkout was missing and has been cloned.
    Cloned,
    /// The checkout directory already existed and was reused as-is.
    Reused,
}

/// Ensure that a checkout exists at `dest`.
///
/// This is a presence check only: an existing directory is reused no matter
/// how stale or incomplete its contents are. A previously interrupted clone
/// is indistinguishable from a good one. When the directory is absent, the
/// clone operation runs exactly once.
///
/// # Errors
/// Returns an error if the clone command cannot be spawned.
pub fn ensure_repo(runner: &dyn CloneRunner, url: &str, dest: &Path) -> Result<AcquireOutcome> {
    if dest.exists() {
        return Ok(AcquireOutcome::Reused);
    }
    runner.clone_repo(url, dest)?;
    Ok(AcquireOutcome::Cloned)
}
