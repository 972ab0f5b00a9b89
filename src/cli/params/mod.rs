//! Params command - prints the effective cost profile

use std::io::Write;
use std::process::ExitCode;

use super::CostArgs;
use crate::config::AppConfig;
use crate::domain::password::{ALGORITHM_ID, CURRENT_VERSION};
use crate::domain::CostParameters;

/// Run the params command
pub fn run(args: &CostArgs, config: &AppConfig) -> anyhow::Result<ExitCode> {
    let params = args.apply(config.hashing_parameters()?);
    params.validate()?;

    describe(&mut std::io::stdout().lock(), &params)?;
    Ok(ExitCode::SUCCESS)
}

fn describe(out: &mut impl Write, params: &CostParameters) -> std::io::Result<()> {
    writeln!(out, "algorithm: {}", ALGORITHM_ID)?;
    writeln!(out, "version: {}", CURRENT_VERSION)?;
    writeln!(out, "memory_cost: {} KiB", params.memory_cost)?;
    writeln!(out, "iterations: {}", params.iterations)?;
    writeln!(out, "parallelism: {}", params.parallelism)?;
    writeln!(out, "salt_length: {}", params.salt_length)?;
    writeln!(out, "key_length: {}", params.key_length)
}
