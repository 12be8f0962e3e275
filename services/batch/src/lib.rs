//! Client for the AWS Batch control plane.
//!
//! [`Client`] is the transport: it builds the URL, signs the request with
//! [`batchctl_aws_v4::RequestSigner`], sends it through the [`Context`]'s
//! `HttpSend` and maps the response status to [`batchctl_core::ErrorKind`].
//! The resource operations for jobs, queues and job definitions are methods on
//! the same client.
//!
//! ## Example
//!
//! ```no_run
//! use batchctl_aws_v4::Config;
//! use batchctl_batch::{Client, SubmitJobInput};
//! use batchctl_core::Context;
//! use batchctl_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> batchctl_core::Result<()> {
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! let config = Config {
//!     access_key_id: Some("access_key_id".to_string()),
//!     secret_access_key: Some("secret_access_key".to_string()),
//!     region: Some("us-west-2".to_string()),
//! };
//!
//! let client = Client::new(ctx, config);
//! let job = client
//!     .submit_job(&SubmitJobInput::new("my-job", "my-queue", "my-def"))
//!     .await?;
//! println!("submitted {}", job["jobId"]);
//! # Ok(())
//! # }
//! ```
//!
//! [`Context`]: batchctl_core::Context

mod client;
pub use client::Client;

mod envelope;

mod jobs;
pub use jobs::{ListJobsInput, SubmitJobInput};

mod queues;
pub use queues::{CreateQueueInput, UpdateQueueInput};

mod definitions;
pub use definitions::RegisterDefinitionInput;
