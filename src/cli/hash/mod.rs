//! Hash command - derives a token for the password on stdin

use std::process::ExitCode;

use clap::Args;
use tracing::info;

use super::{read_password, CostArgs};
use crate::config::AppConfig;
use crate::infrastructure::password::{Argon2Hasher, PasswordHasher};

/// Arguments for the hash command
#[derive(Args, Clone, Debug)]
pub struct HashArgs {
    #[command(flatten)]
    pub cost: CostArgs,
}

/// Run the hash command
pub fn run(args: &HashArgs, config: &AppConfig) -> anyhow::Result<ExitCode> {
    let params = args.cost.apply(config.hashing_parameters()?);
    params.validate()?;
    let password = read_password(&mut std::io::stdin().lock())?;

    let token = Argon2Hasher::new().hash(password.as_bytes(), &params)?;
    info!(
        memory_cost = params.memory_cost,
        iterations = params.iterations,
        parallelism = params.parallelism,
        "Password hashed"
    );

    println!("{}", token);
    Ok(ExitCode::SUCCESS)
}
