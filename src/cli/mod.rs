//! CLI module for ti-auth
//!
//! Subcommands operate on one password read from stdin:
//! - `hash`: derive a new credential token
//! - `verify`: check a password against a stored token
//! - `rehash-check`: report whether a token uses an outdated cost profile
//! - `params`: print the effective cost profile

pub mod hash;
pub mod params;
pub mod verify;

use std::io::BufRead;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;
use crate::domain::CostParameters;
use crate::infrastructure::logging;

/// ti-auth - Argon2id password hashing with self-describing tokens
#[derive(Parser)]
#[command(name = "ti-auth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log filter (overrides config and RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Hash the password read from stdin and print the token
    Hash(hash::HashArgs),

    /// Verify the password read from stdin against a token
    Verify(verify::VerifyArgs),

    /// Report whether a token should be re-hashed with the configured profile
    RehashCheck(verify::RehashCheckArgs),

    /// Print the effective cost profile
    Params(CostArgs),
}

/// Cost profile overrides applied on top of configuration
#[derive(Args, Clone, Debug, Default)]
pub struct CostArgs {
    /// Working memory in KiB
    #[arg(long)]
    pub memory_cost: Option<u32>,

    /// Number of passes
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Number of lanes
    #[arg(long)]
    pub parallelism: Option<u32>,

    /// Salt length in bytes
    #[arg(long)]
    pub salt_length: Option<usize>,

    /// Digest length in bytes
    #[arg(long)]
    pub key_length: Option<usize>,
}

impl CostArgs {
    pub fn apply(&self, base: CostParameters) -> CostParameters {
        let mut params = base;
        if let Some(memory_cost) = self.memory_cost {
            params = params.with_memory_cost(memory_cost);
        }
        if let Some(iterations) = self.iterations {
            params = params.with_iterations(iterations);
        }
        if let Some(parallelism) = self.parallelism {
            params = params.with_parallelism(parallelism);
        }
        if let Some(salt_length) = self.salt_length {
            params = params.with_salt_length(salt_length);
        }
        if let Some(key_length) = self.key_length {
            params = params.with_key_length(key_length);
        }
        params
    }
}

/// Load configuration, install logging and dispatch the subcommand
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    logging::init_logging(&config.logging, cli.log_level.as_deref());

    match cli.command {
        Command::Hash(args) => hash::run(&args, &config),
        Command::Verify(args) => verify::run(&args),
        Command::RehashCheck(args) => verify::run_rehash_check(&args, &config),
        Command::Params(args) => params::run(&args, &config),
    }
}

/// Read one line from `reader`, dropping only the line terminator
pub fn read_password(reader: &mut impl BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("failed to read password from stdin")?;

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }

    Ok(line)
}
