use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File-name suffix identifying a policy file.
pub const POLICY_SUFFIX: &str = ".rego";

/// One collected policy file.
///
/// Field declaration order here is the field order in the serialized
/// dataset, so reordering fields changes the on-disk format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRecord {
    /// Service identifier derived from the file name (prefix before the
    /// first `.`).
    pub service: String,
    /// Verbatim text content of the policy file.
    pub policy: String,
    /// Compliance tag, uniform across all records of one run.
    pub compliance_standard: String,
}

/// Collect policy records from the immediate entries of `dir`.
///
/// - Non-recursive: subdirectories are not descended into.
/// - Records appear in directory listing order, which is platform dependent
///   and not sorted.
/// - Only entries whose name ends with [`POLICY_SUFFIX`] are considered;
///   `ec2.config.rego` yields the service `"ec2"`.
/// - Every record carries the same `standard` tag.
///
/// # Errors
/// Returns an error if `dir` cannot be listed or any matching entry cannot
/// be read as UTF-8 text. There is no per-file recovery; one bad file fails
/// the whole collection.
pub fn collect_policies(dir: &Path, standard: &str) -> Result<Vec<PolicyRecord>> {
    let rd = fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?;

    let mut records = Vec::new();
    for ent in rd {
        let ent = ent?;
        let name = ent.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !name.ends_with(POLICY_SUFFIX) {
            continue;
        }

        let path = ent.path();
        let policy = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        records.push(PolicyRecord {
            service: service_name(name).to_string(),
            policy,
            compliance_standard: standard.to_string(),
        });
    }
    Ok(records)
}

/// Service identifier for a policy file name: everything before the first `.`.
fn service_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn services(mut records: Vec<PolicyRecord>) -> Vec<String> {
        records.sort_by(|a, b| a.service.cmp(&b.service));
        records.into_iter().map(|r| r.service).collect()
    }

    #[test]
    fn service_name_stops_at_first_dot() {
        assert_eq!(service_name("a.rego"), "a");
        assert_eq!(service_name("b.config.rego"), "b");
        assert_eq!(service_name("noext"), "noext");
    }

    #[test]
    fn collects_only_rego_files() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("a.rego"), "package a").unwrap();
        fs::write(td.path().join("b.config.rego"), "package b").unwrap();
        fs::write(td.path().join("c.txt"), "not a policy").unwrap();

        let records = collect_policies(td.path(), "NIST").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(services(records), vec!["a", "b"]);
    }

    #[test]
    fn records_carry_content_and_uniform_standard() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("ec2.rego"), "package ec2\n\ndeny := false\n").unwrap();
        fs::write(td.path().join("s3.rego"), "package s3\n").unwrap();

        let records = collect_policies(td.path(), "CIS").unwrap();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.compliance_standard == "CIS"));
        let ec2 = records.iter().find(|r| r.service == "ec2").unwrap();
        assert_eq!(ec2.policy, "package ec2\n\ndeny := false\n");
    }

    #[test]
    fn scan_is_not_recursive() {
        let td = tempdir().unwrap();
        let sub = td.path().join("nested");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("hidden.rego"), "package hidden").unwrap();
        fs::write(td.path().join("top.rego"), "package top").unwrap();

        let records = collect_policies(td.path(), "NIST").unwrap();

        assert_eq!(services(records), vec!["top"]);
    }

    #[test]
    fn empty_directory_yields_empty_dataset() {
        let td = tempdir().unwrap();
        let records = collect_policies(td.path(), "NIST").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let td = tempdir().unwrap();
        let missing = td.path().join("no_such_dir");
        assert!(collect_policies(&missing, "NIST").is_err());
    }

    #[test]
    fn unreadable_policy_fails_the_whole_collection() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("good.rego"), "package good").unwrap();
        // Invalid UTF-8 makes read_to_string fail.
        fs::write(td.path().join("bad.rego"), [0xff, 0xfe, 0x00]).unwrap();

        assert!(collect_policies(td.path(), "NIST").is_err());
    }
}
