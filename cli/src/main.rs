//! `batchctl` binary entrypoint.

use std::io;
use std::process::ExitCode;

use batchctl::commands;
use batchctl::Cli;
use batchctl_core::{Context, OsEnv};
use batchctl_file_read_tokio::TokioFileRead;
use batchctl_http_send_reqwest::ReqwestHttpSend;
use clap::Parser;

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);

    let mut stdout = io::stdout().lock();
    match runtime.block_on(commands::run(cli, &ctx, &mut stdout)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
