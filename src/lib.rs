//! Crate entry point for **opg**.
//!
//! This library provides the internal implementation for the `opg` CLI.
//! Each submodule encapsulates one stage of the pipeline (repository
//! acquisition, policy collection, dataset serialization, generation) or
//! one ambient concern (config, paths, progress styles).
//! The `pub use` re-exports make selected commands and types accessible
//! directly from the crate root.

mod collect;
mod config;
mod dataset;
mod eval;
mod generate;
mod init;
mod list;
mod paths;
mod progress;
mod repo;
mod run;

/// Re-export commonly used types and commands so they can be accessed from `opg::*`.
pub use collect::{POLICY_SUFFIX, PolicyRecord, collect_policies};
pub use config::{Config, Dataset, OpenAi, Repository, load_config};
pub use dataset::{read_dataset, write_dataset};
pub use eval::{DEFAULT_QUERY, cmd_eval};
pub use generate::{GenerateError, OpenAiClient, generate_policy};
pub use init::cmd_init;
pub use list::cmd_list;
pub use paths::{Paths, opg_home, paths};
pub use repo::{AcquireOutcome, CloneRunner, GitCli, ensure_repo};
pub use run::{cmd_collect, cmd_generate, cmd_run, cmd_sync};
