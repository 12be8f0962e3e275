//! Command line client for the AWS Batch control plane.
//!
//! The binary wires a [`batchctl_core::Context`] backed by tokio and reqwest,
//! loads the [`settings::Settings`] store once and dispatches to one command
//! per invocation.

#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod output;
pub mod settings;

pub use cli::{Cli, Commands};
pub use output::OutputFormat;
pub use settings::Settings;
