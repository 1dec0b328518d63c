//! Repository acquisition layer.
//!
//! This module wraps the actual backend implementation (`git_cli`) and
//! re-exports the stable public API. The clone invocation sits behind the
//! [`CloneRunner`] trait so tests can substitute the external command with
//! a recording stub.

mod git_cli;

pub use git_cli::{AcquireOutcome, CloneRunner, GitCli, ensure_repo};
