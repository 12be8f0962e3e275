//! Command implementations.
//!
//! - [`config`]: settings store
//! - [`jobs`]: job submission and inspection
//! - [`queues`]: job queues
//! - [`definitions`]: job definitions

use std::io::Write;

use batchctl_batch::Client;
use batchctl_core::{Context, Error, Result};
use log::debug;
use serde_json::Value;

use crate::cli::{Cli, Commands};
use crate::output::OutputFormat;
use crate::settings::Settings;

pub mod config;
pub mod definitions;
pub mod jobs;
pub mod queues;

pub use config::ConfigCommand;
pub use definitions::DefinitionsCommand;
pub use jobs::JobsCommand;
pub use queues::QueuesCommand;

/// Load settings and execute one parsed command line.
pub async fn run<W: Write>(cli: Cli, ctx: &Context, writer: &mut W) -> Result<()> {
    let format = OutputFormat::new(cli.json);
    let path = Settings::path(ctx)?;
    let settings = Settings::load(ctx, &path).await?;
    debug!("settings loaded from {}", path.display());

    match cli.command {
        Commands::Config { command } => {
            let cmd = ConfigCommand::new(settings, path);
            cmd.execute(writer, &format, &command).await?;
        }
        Commands::Jobs { command } => {
            let cmd = JobsCommand::new(build_client(ctx, &settings));
            cmd.execute(writer, &format, &command).await?;
        }
        Commands::Queues { command } => {
            let cmd = QueuesCommand::new(build_client(ctx, &settings));
            cmd.execute(writer, &format, &command).await?;
        }
        Commands::Definitions { command } => {
            let cmd = DefinitionsCommand::new(build_client(ctx, &settings));
            cmd.execute(writer, &format, &command).await?;
        }
    }

    Ok(())
}

/// Build the batch client from settings, with the environment filling gaps.
pub fn build_client(ctx: &Context, settings: &Settings) -> Client {
    let client = Client::new(ctx.clone(), settings.to_config(ctx));
    match settings.endpoint() {
        Some(endpoint) => client.with_endpoint(endpoint),
        None => client,
    }
}

/// Parse the JSON text of a structured flag such as `--parameters`.
pub fn parse_json(flag: &str, text: Option<&str>) -> Result<Option<Value>> {
    text.map(|text| {
        serde_json::from_str(text).map_err(|e| {
            Error::invalid_input(format!("--{flag} is not valid JSON: {e}")).with_source(e)
        })
    })
    .transpose()
}
