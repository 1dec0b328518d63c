use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::ProgressBar;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::collect::collect_policies;
use crate::config::{Config, load_config};
use crate::dataset::write_dataset;
use crate::generate::OpenAiClient;
use crate::paths::{Paths, paths};
use crate::progress::{err_style, ok_style, spinner_style};
use crate::repo::{AcquireOutcome, GitCli, ensure_repo};

/// CLI command: acquisition only.
///
/// Clones the configured repository unless the checkout directory already
/// exists, in which case it is reused as-is (presence check only, no
/// freshness check).
pub fn cmd_sync() -> Result<()> {
    let p = paths()?;
    let cfg = load_config(&p)?;
    sync_repo(&cfg, &p)?;
    Ok(())
}

/// CLI command: acquisition, collection, and dataset serialization.
pub fn cmd_collect() -> Result<()> {
    let p = paths()?;
    let cfg = load_config(&p)?;
    collect_and_save(&cfg, &p)?;
    Ok(())
}

/// CLI command: generation only.
///
/// A failed generation prints a diagnostic and still exits zero; the
/// process aborts only on config/setup failures.
pub fn cmd_generate(prompt: &str) -> Result<()> {
    let p = paths()?;
    let cfg = load_config(&p)?;
    run_generation(&cfg, prompt);
    Ok(())
}

/// CLI command: the full pipeline.
///
/// Flow is strictly sync → collect → save → generate; each step blocks
/// until complete. `prompt` falls back to the configured default when not
/// given. Generation failures do not fail the run (the dataset has already
/// been written by then); every earlier failure aborts with an error.
pub fn cmd_run(prompt: Option<&str>) -> Result<()> {
    let p = paths()?;
    let cfg = load_config(&p)?;

    collect_and_save(&cfg, &p)?;

    let prompt = prompt.unwrap_or(&cfg.openai.prompt);
    run_generation(&cfg, prompt);
    Ok(())
}

/// Ensure the policy checkout exists, cloning it if missing.
///
/// Two opg processes running at once can race on this presence check (and
/// later on the dataset write); nothing guards against that.
fn sync_repo(cfg: &Config, p: &Paths) -> Result<PathBuf> {
    let dest = cfg.repo_dir(p);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    match ensure_repo(&GitCli, &cfg.repository.url, &dest)? {
        AcquireOutcome::Cloned => {
            println!("cloned {} into {}", cfg.repository.url, dest.display());
        }
        AcquireOutcome::Reused => {
            println!("checkout already exists at {}", dest.display());
        }
    }
    Ok(dest)
}

/// Scan the checkout and write the dataset file.
fn collect_and_save(cfg: &Config, p: &Paths) -> Result<()> {
    let dir = sync_repo(cfg, p)?;
    let records = collect_policies(&dir, &cfg.dataset.compliance_standard)?;
    write_dataset(&records, &cfg.dataset.output)?;
    println!(
        "saved {} policies to {}",
        records.len(),
        cfg.dataset.output.display()
    );
    Ok(())
}

/// Run one generation request with a progress spinner.
///
/// On success the policy text is printed under a colored heading; on any
/// failure the spinner line shows the classified error and execution
/// continues. The caller cannot crash here.
fn run_generation(cfg: &Config, prompt: &str) {
    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message("generating policy…");

    let result = OpenAiClient::from_config(&cfg.openai).and_then(|c| c.complete(prompt));

    match result {
        Ok(text) => {
            pb.set_style(ok_style());
            pb.finish_with_message("policy generated");
            println!();
            println!("{}", "Generated Policy:".green().bold());
            println!("{}", text);
        }
        Err(e) => {
            pb.set_style(err_style());
            pb.finish_with_message(format!("generating policy (error: {})", e));
        }
    }
}
