use anyhow::Result;

use crate::config::load_config;
use crate::dataset::read_dataset;
use crate::paths::paths;

/// CLI command: print a human-readable summary of the collected dataset.
///
/// Each record is displayed with its service name, compliance tag, and
/// policy size:
///
/// ```text
/// - ec2 [NIST] (42 lines)
/// - s3 [NIST] (17 lines)
/// ```
///
/// # Errors
/// Returns an error if the config cannot be loaded, or if the dataset file
/// is missing or cannot be parsed.
pub fn cmd_list() -> Result<()> {
    let p = paths()?;
    let cfg = load_config(&p)?;

    let records = read_dataset(&cfg.dataset.output)?;
    if records.is_empty() {
        eprintln!("no policies in {}", cfg.dataset.output.display());
        return Ok(());
    }
    for r in &records {
        println!(
            "- {} [{}] ({} lines)",
            r.service,
            r.compliance_standard,
            r.policy.lines().count()
        );
    }
    Ok(())
}
