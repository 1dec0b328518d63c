//! # opg
//!
//! **opg** builds a JSON dataset from a repository of OPA `.rego` policies
//! and synthesizes new policies through an OpenAI-compatible
//! chat-completion endpoint.
//!
//! Features:
//! - `opg sync` clones the policy repository if it is not checked out yet
//! - `opg collect` scans the checkout and writes the JSON dataset
//! - `opg list` summarizes the collected dataset
//! - `opg generate` synthesizes a policy from a free-text prompt
//! - `opg run` executes the full pipeline
//! - `opg eval` evaluates a query with the `opa` binary
//! - `opg init` writes a starter `config.toml`
//! - `opg home` prints the opg home directory
//!
//! This CLI is built with [clap](https://docs.rs/clap).

use anyhow::Result;
use clap::{Parser, Subcommand};
use opg::{
    DEFAULT_QUERY, cmd_collect, cmd_eval, cmd_generate, cmd_init, cmd_list, cmd_run, cmd_sync,
    opg_home,
};
use std::path::PathBuf;

/// Command-line interface definition.
///
/// Parsed using `clap` derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "opg",
    version,
    about = "opg - OPA policy dataset builder & generator",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Cmd>,
}

/// Available subcommands.
///
/// Each variant corresponds to a subcommand of `opg`.
#[derive(Subcommand, Debug)]
enum Cmd {
    /// Clone the policy repository if it is not checked out yet
    Sync,
    /// Collect .rego policies and write the JSON dataset
    Collect,
    /// List records in the collected dataset
    List,
    /// Generate a policy from a prompt via the OpenAI API
    Generate {
        /// Free-text description of the policy to generate
        prompt: String,
    },
    /// Run the full pipeline: sync, collect, save, generate
    Run {
        /// Prompt override; defaults to the configured prompt
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Evaluate a query against input and policy files with `opa eval`
    Eval {
        /// Input document (JSON)
        #[arg(short, long)]
        input: PathBuf,
        /// Policy file (.rego)
        #[arg(short, long)]
        data: PathBuf,
        /// Query to evaluate
        #[arg(default_value = DEFAULT_QUERY)]
        query: String,
    },
    /// Write a starter config.toml
    Init,
    /// Print the opg home directory
    Home,
}

/// CLI entry point.
///
/// Parses arguments with `clap` and executes the selected subcommand.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let cmd = cli.cmd.unwrap();

    match cmd {
        Cmd::Sync => cmd_sync(),
        Cmd::Collect => cmd_collect(),
        Cmd::List => cmd_list(),
        Cmd::Generate { prompt } => cmd_generate(&prompt),
        Cmd::Run { prompt } => cmd_run(prompt.as_deref()),
        Cmd::Eval { input, data, query } => cmd_eval(&input, &data, &query),
        Cmd::Init => cmd_init(),
        Cmd::Home => {
            println!("{}", opg_home()?.display());
            Ok(())
        }
    }
}
