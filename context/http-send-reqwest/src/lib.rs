//! reqwest-based HTTP sending for batchctl.
//!
//! Any response that arrives is handed back unchanged, whatever its status;
//! classifying statuses is the transport's job. Failures where no response was
//! received become `ErrorKind::NetworkError`.

use async_trait::async_trait;
use batchctl_core::{Error, HttpSend, Result};
use bytes::Bytes;
use log::debug;
use reqwest::Client;

/// HTTP sender backed by a reqwest client.
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        debug!("sending request: {} {}", parts.method, parts.uri);

        let resp = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await.map_err(map_reqwest_error)?;
        debug!("received response: {status}, {} bytes", body.len());

        let mut builder = http::Response::builder().status(status);
        for (k, v) in headers.iter() {
            builder = builder.header(k, v);
        }

        Ok(builder.body(body)?)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> Error {
    if err.is_builder() {
        return Error::invalid_request(format!("failed to build request: {err}")).with_source(err);
    }

    Error::network_error(format!("no response received: {err}")).with_source(err)
}
