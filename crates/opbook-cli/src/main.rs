//! opbook CLI Application
//!
//! Command-line interface for uploading, browsing and searching operation
//! plans.

mod args;
mod cli;
mod renderer;

use std::process::ExitCode;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use cli::Cli;
use log::{debug, info};
use opbook_core::{ErrorKind, PlannerBuilder, PlannerError};
use renderer::TerminalRenderer;

/// Process exit code for a failure, by error family.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<PlannerError>().map(PlannerError::kind) {
        Some(ErrorKind::Validation) => 2,
        Some(ErrorKind::NotFound) => 3,
        Some(ErrorKind::Forbidden) => 4,
        Some(ErrorKind::Parse) => 5,
        Some(ErrorKind::Persistence) => 6,
        Some(ErrorKind::Configuration) => 7,
        None => 1,
    }
}

async fn run(args: Args) -> Result<()> {
    let Args {
        database_file,
        no_color,
        json,
        user_id,
        user_name,
        command,
    } = args;

    let mut builder = PlannerBuilder::new();
    if let Some(path) = database_file {
        builder = builder.with_database_path(path);
    }
    let planner = builder
        .build()
        .await
        .context("Failed to initialize planner")?;

    info!("opbook started with {}", planner.database_path().display());

    Cli::new(planner, TerminalRenderer::new(!no_color))
        .with_user(user_id, user_name)
        .with_json(json)
        .handle_command(command)
        .await
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("{err:?}");
            eprintln!("Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opbook_core::PlanId;

    #[test]
    fn test_exit_codes_follow_error_kind() {
        let not_found = anyhow::Error::new(PlannerError::PlanNotFound {
            id: PlanId::from("x"),
        })
        .context("Failed to show plan x");
        assert_eq!(exit_code(&not_found), 3);

        let forbidden = anyhow::Error::new(PlannerError::forbidden("not yours"));
        assert_eq!(exit_code(&forbidden), 4);

        assert_eq!(exit_code(&anyhow::anyhow!("plain failure")), 1);
    }
}
