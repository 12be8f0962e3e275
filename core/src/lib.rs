//! Core components for batchctl.
//!
//! This crate provides the foundational types and traits that the signer, the
//! transport and the command line are built on.
//!
//! ## Overview
//!
//! - **Context**: holds the implementations for file reading, HTTP sending and
//!   environment access, so every capability can be swapped in tests
//! - **Traits**: credential loading (`ProvideCredential`) and request signing
//!   (`SignRequest`)
//! - **Signer**: coordinates credential loading and request signing
//! - **Error**: the client error taxonomy shared by every crate
//!
//! ## Utilities
//!
//! - [`hash`]: SHA256 and HMAC-SHA256 helpers
//! - [`time`]: timestamp formatting
//! - [`utils`]: secret redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod context;
pub use context::{
    Context, Env, FileRead, HttpSend, NoopEnv, NoopFileRead, NoopHttpSend, OsEnv, StaticEnv,
};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};
mod signer;
pub use signer::Signer;
