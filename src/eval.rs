use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::Command;

/// Query evaluated when none is given on the command line.
pub const DEFAULT_QUERY: &str = "data";

/// Build the argument vector for `opa eval -i <input> -d <data> <query>`.
///
/// Kept separate from the subprocess call so the command shape is
/// unit-testable without an `opa` binary installed.
pub fn opa_eval_args(input: &Path, data: &Path, query: &str) -> Vec<String> {
    vec![
        "eval".to_string(),
        "-i".to_string(),
        input.display().to_string(),
        "-d".to_string(),
        data.display().to_string(),
        query.to_string(),
    ]
}

/// CLI command: evaluate a query against an input document and a policy
/// file by shelling out to the `opa` binary, printing opa's stdout.
///
/// # Errors
/// - Returns an error if `opa` cannot be spawned (e.g. not installed).
/// - Returns an error carrying opa's stderr if the evaluation exits
///   nonzero.
pub fn cmd_eval(input: &Path, data: &Path, query: &str) -> Result<()> {
    let out = Command::new("opa")
        .args(opa_eval_args(input, data, query))
        .output()
        .context("failed to run opa (is it installed and on PATH?)")?;

    if !out.status.success() {
        bail!(
            "opa eval failed: {}",
            String::from_utf8_lossy(&out.stderr).trim()
        );
    }

    print!("{}", String::from_utf8_lossy(&out.stdout));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_match_the_opa_eval_shape() {
        let got = opa_eval_args(
            Path::new("plan.json"),
            Path::new("policy.rego"),
            "data.gcp.deny",
        );
        assert_eq!(
            got,
            vec!["eval", "-i", "plan.json", "-d", "policy.rego", "data.gcp.deny"]
        );
    }

    #[test]
    fn default_query_selects_the_whole_document() {
        let got = opa_eval_args(Path::new("i.json"), Path::new("d.rego"), DEFAULT_QUERY);
        assert_eq!(got.last().map(String::as_str), Some("data"));
    }
}
