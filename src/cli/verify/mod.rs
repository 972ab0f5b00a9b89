//! Verify and rehash-check commands

use std::process::ExitCode;

use clap::Args;
use tracing::info;

use super::{read_password, CostArgs};
use crate::config::AppConfig;
use crate::domain::PasswordHashError;
use crate::infrastructure::password::{Argon2Hasher, PasswordHasher};

const EXIT_MISMATCH: u8 = 1;
const EXIT_BAD_TOKEN: u8 = 2;

/// Arguments for the verify command
#[derive(Args, Clone, Debug)]
pub struct VerifyArgs {
    /// Stored token to verify against
    #[arg(long)]
    pub token: String,
}

/// Arguments for the rehash-check command
#[derive(Args, Clone, Debug)]
pub struct RehashCheckArgs {
    /// Stored token to inspect
    #[arg(long)]
    pub token: String,

    #[command(flatten)]
    pub cost: CostArgs,
}

/// What a command prints and how the process exits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub to_stderr: bool,
    pub exit_code: u8,
}

impl CommandOutput {
    fn stdout(text: impl Into<String>, exit_code: u8) -> Self {
        Self {
            text: text.into(),
            to_stderr: false,
            exit_code,
        }
    }

    fn stderr(text: impl Into<String>, exit_code: u8) -> Self {
        Self {
            text: text.into(),
            to_stderr: true,
            exit_code,
        }
    }

    fn emit(self) -> ExitCode {
        if self.to_stderr {
            eprintln!("{}", self.text);
        } else {
            println!("{}", self.text);
        }
        ExitCode::from(self.exit_code)
    }
}

/// Map a verification result: 0 on match, 1 on mismatch, 2 on an unreadable
/// token. Other errors are passed up.
pub fn verify_output(
    result: Result<bool, PasswordHashError>,
) -> Result<CommandOutput, PasswordHashError> {
    match result {
        Ok(true) => Ok(CommandOutput::stdout("match", 0)),
        Ok(false) => Ok(CommandOutput::stdout("mismatch", EXIT_MISMATCH)),
        Err(e) => token_error_output(e),
    }
}

/// Map a rehash check: prints `rehash` or `current` and exits 0, 2 on an
/// unreadable token
pub fn rehash_check_output(
    result: Result<bool, PasswordHashError>,
) -> Result<CommandOutput, PasswordHashError> {
    match result {
        Ok(true) => Ok(CommandOutput::stdout("rehash", 0)),
        Ok(false) => Ok(CommandOutput::stdout("current", 0)),
        Err(e) => token_error_output(e),
    }
}

fn token_error_output(error: PasswordHashError) -> Result<CommandOutput, PasswordHashError> {
    if error.is_token_error() {
        Ok(CommandOutput::stderr(
            format!("error: {}", error),
            EXIT_BAD_TOKEN,
        ))
    } else {
        Err(error)
    }
}

/// Run the verify command
pub fn run(args: &VerifyArgs) -> anyhow::Result<ExitCode> {
    let password = read_password(&mut std::io::stdin().lock())?;
    let result = Argon2Hasher::new().verify(password.as_bytes(), &args.token);

    Ok(verify_output(result)?.emit())
}

/// Run the rehash-check command
pub fn run_rehash_check(args: &RehashCheckArgs, config: &AppConfig) -> anyhow::Result<ExitCode> {
    let params = args.cost.apply(config.hashing_parameters()?);
    let result = Argon2Hasher::new().needs_rehash(&args.token, &params);

    if let Ok(needed) = result {
        info!(needed, "Checked token cost profile");
    }

    Ok(rehash_check_output(result)?.emit())
}
