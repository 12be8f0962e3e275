//! AWS SigV4 signing for the batch control plane.
//!
//! ## Example
//!
//! ```no_run
//! use batchctl_aws_v4::{Config, ConfigCredentialProvider, RequestSigner};
//! use batchctl_core::{Context, OsEnv, Signer};
//!
//! # async fn example() -> batchctl_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let config = Config::default().from_env(&ctx);
//! let signer = Signer::new(
//!     ctx,
//!     ConfigCredentialProvider::new(config.into()),
//!     RequestSigner::new("batch"),
//! );
//!
//! let (mut parts, _) = http::Request::get("https://batch.us-east-1.amazonaws.com/v1/jobqueues")
//!     .body(())
//!     .expect("request must be valid")
//!     .into_parts();
//! signer.sign(&mut parts, b"").await?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{AWS_QUERY_ENCODE_SET, DEFAULT_REGION, SIGNED_HEADERS, X_AMZ_DATE};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{generate_signing_key, AuthHeaders, RequestSigner};
