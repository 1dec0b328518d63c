//! Policy collection layer.
//!
//! Scans a checkout for `.rego` files and turns each one into a
//! [`PolicyRecord`] ready for dataset serialization.

mod fs_scan;

pub use fs_scan::{POLICY_SUFFIX, PolicyRecord, collect_policies};
