#![forbid(unsafe_code)]

pub mod adapters;
pub mod app;
pub mod commands;
pub mod domain;
pub mod infrastructure;
pub mod ports;

#[cfg(test)]
mod testing;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use app::AppController;
use commands::{execute, Cli};

/// Entry point of the `jarvis-mobile` binary.
pub async fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let controller = Arc::new(AppController::new(cli.controller_options())?);

    let ok = execute(controller, cli.command).await?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
