use std::sync::Arc;

use batchctl_aws_v4::{
    Config, ConfigCredentialProvider, Credential, RequestSigner, AWS_QUERY_ENCODE_SET,
};
use batchctl_core::{Context, Error, Result, Signer};
use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use log::{debug, warn};
use percent_encoding::utf8_percent_encode;
use serde::Serialize;
use serde_json::Value;

/// Service name used in the credential scope and the default endpoint.
const SERVICE: &str = "batch";
const APPLICATION_JSON: &str = "application/json";

/// Client sends signed requests to the batch control plane.
///
/// Every call signs with a fresh timestamp and signing key, so a client can be
/// cloned and shared across tasks freely.
#[derive(Debug, Clone)]
pub struct Client {
    signer: Signer<Credential>,
    endpoint: String,
}

impl Client {
    /// Create a client for the region in `config`.
    ///
    /// Credentials are taken from `config` on every request. When they are
    /// missing, each call fails with `ErrorKind::NotConfigured` before anything
    /// goes out.
    pub fn new(ctx: Context, config: Config) -> Self {
        let endpoint = format!("https://{SERVICE}.{}.amazonaws.com", config.region());
        let loader = ConfigCredentialProvider::new(Arc::new(config));
        let signer = Signer::new(ctx, loader, RequestSigner::new(SERVICE));

        Self { signer, endpoint }
    }

    /// Create a client from an existing signer and endpoint.
    pub fn with_signer(signer: Signer<Credential>, endpoint: &str) -> Self {
        Self {
            signer,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Override the endpoint, e.g. to talk to a local emulator.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a bodyless `GET`.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.send(Method::GET, path, query, Bytes::new()).await
    }

    /// Send a `POST` with `body` serialized as JSON.
    ///
    /// The struct is serialized directly so the wire keeps its field order.
    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value> {
        let body = Bytes::from(serde_json::to_vec(body)?);
        self.send(Method::POST, path, &[], body).await
    }

    /// Send one signed request and return the parsed JSON response.
    ///
    /// `body` is signed and sent as is. Nothing is retried.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Bytes,
    ) -> Result<Value> {
        let mut url = format!("{}{}", self.endpoint, path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&encode_query(query));
        }

        let req = Request::builder()
            .method(method)
            .uri(&url)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .header(ACCEPT, APPLICATION_JSON)
            .body(body)?;
        let (mut parts, body) = req.into_parts();
        self.signer.sign(&mut parts, &body).await?;

        debug!("sending {} {}", parts.method, parts.uri);
        let resp = self
            .signer
            .context()
            .http_send(Request::from_parts(parts, body))
            .await?;

        parse_response(resp)
    }
}

fn encode_query(query: &[(&str, &str)]) -> String {
    query
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn parse_response(resp: Response<Bytes>) -> Result<Value> {
    let status = resp.status();
    let body = resp.into_body();

    if status.is_success() {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Object(Default::default()));
        }
        return serde_json::from_slice(&body).map_err(|e| {
            Error::unexpected(format!("failed to parse response body: {e}")).with_source(e)
        });
    }

    let message = error_message(status, &body);
    warn!("request failed with {status}: {message}");

    let err = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::authentication_failed(message),
        StatusCode::NOT_FOUND => Error::not_found(message),
        StatusCode::TOO_MANY_REQUESTS => Error::rate_limited(message),
        _ => Error::api_error(message),
    };
    Err(err.with_status(status))
}

/// Server message from a JSON `message`/`Message` field, else the raw body,
/// else the status reason.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        let message = map
            .get("message")
            .or_else(|| map.get("Message"))
            .and_then(Value::as_str);
        if let Some(message) = message {
            return message.to_string();
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("unknown status")
        .to_string()
}
