use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

use crate::collect::PolicyRecord;

/// Serialize `records` to `path` as a pretty-printed JSON array.
///
/// Output uses four-space indentation and the struct declaration order of
/// [`PolicyRecord`] fields, so serializing equal inputs is byte-identical.
/// A trailing newline terminates the file.
///
/// The target is overwritten unconditionally and written in place. There is
/// no temp-file-and-rename step: a crash mid-write leaves a truncated file.
///
/// # Errors
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_dataset(records: &[PolicyRecord], path: &Path) -> Result<()> {
    let mut buf = Vec::new();
    let fmt = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    records
        .serialize(&mut ser)
        .context("failed to serialize dataset")?;
    buf.push(b'\n');

    fs::write(path, &buf).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Read a dataset previously written by [`write_dataset`].
///
/// # Errors
/// Returns an error if the file is missing or is not a valid record array.
pub fn read_dataset(path: &Path) -> Result<Vec<PolicyRecord>> {
    let txt = fs::read_to_string(path)
        .with_context(|| format!("dataset not found: {}", path.display()))?;
    let records =
        serde_json::from_str(&txt).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(records)
}
