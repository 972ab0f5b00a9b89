use std::process::ExitCode;

use clap::Parser;
use ti_auth::cli::{self, Cli};

fn main() -> anyhow::Result<ExitCode> {
    cli::run(Cli::parse())
}
