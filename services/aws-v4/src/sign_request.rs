use crate::constants::{
    ALGORITHM, AWS4_REQUEST, AWS_QUERY_ENCODE_SET, SIGNED_HEADERS, X_AMZ_DATE,
};
use crate::Credential;
use async_trait::async_trait;
use batchctl_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use batchctl_core::time::{format_date, format_iso8601, now, DateTime};
use batchctl_core::{Context, Error, Result, SignRequest, SigningCredential};
use http::request::Parts;
use http::{header, HeaderValue, Method, Uri};
use log::debug;
use percent_encoding::utf8_percent_encode;
use std::fmt::Write;

/// RequestSigner that implement AWS SigV4 with header based authentication.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The signer is stateless apart from its service name: every call captures its
/// own timestamp and derives its own signing key.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,

    time: Option<DateTime>,
}

/// Header values produced by signing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// Value of the `host` header the signature covers.
    pub host: String,
    /// Value of the `x-amz-date` header: `20150830T123600Z`.
    pub amz_date: String,
    /// Value of the `authorization` header.
    pub authorization: String,
}

impl RequestSigner {
    /// Create a new signer for the given service, e.g. `batch`.
    pub fn new(service: &str) -> Self {
        Self {
            service: service.into(),

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Compute the signing headers for a request without touching it.
    pub fn auth_headers(
        &self,
        method: &Method,
        uri: &Uri,
        body: &[u8],
        cred: &Credential,
    ) -> Result<AuthHeaders> {
        // Captured once, both the header and the scope derive from it.
        let now = self.time.unwrap_or_else(now);
        let amz_date = format_iso8601(now);
        let date_stamp = format_date(now);

        let host = canonical_host(uri)?;
        let payload_hash = hex_sha256(body);

        let creq = canonical_request_string(method, uri, &host, &amz_date, &payload_hash)?;
        debug!("calculated canonical request: {creq}");
        let encoded_req = hex_sha256(creq.as_bytes());

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = format!(
            "{}/{}/{}/{}",
            date_stamp, cred.region, self.service, AWS4_REQUEST
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{ALGORITHM}")?;
            writeln!(f, "{amz_date}")?;
            writeln!(f, "{scope}")?;
            write!(f, "{encoded_req}")?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(
            &cred.secret_access_key,
            &date_stamp,
            &cred.region,
            &self.service,
        );
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let authorization = format!(
            "{ALGORITHM} Credential={}/{}, SignedHeaders={}, Signature={}",
            cred.access_key_id, scope, SIGNED_HEADERS, signature
        );

        Ok(AuthHeaders {
            host,
            amz_date,
            authorization,
        })
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        body: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential.filter(|v| v.is_valid()) else {
            return Err(Error::not_configured(
                "credential is not configured: set accessKeyId and secretAccessKey first",
            ));
        };

        let auth = self.auth_headers(&req.method, &req.uri, body, cred)?;

        req.headers
            .insert(header::HOST, HeaderValue::from_str(&auth.host)?);
        req.headers
            .insert(X_AMZ_DATE, HeaderValue::from_str(&auth.amz_date)?);

        let mut authorization = HeaderValue::from_str(&auth.authorization)?;
        authorization.set_sensitive(true);
        req.headers.insert(header::AUTHORIZATION, authorization);

        Ok(())
    }
}

/// Lowercased authority of the request uri.
fn canonical_host(uri: &Uri) -> Result<String> {
    let authority = uri.authority().ok_or_else(|| {
        Error::invalid_request(format!(
            "request uri {uri} without authority is invalid for signing"
        ))
    })?;

    Ok(authority.as_str().to_ascii_lowercase())
}

/// Build the canonical request.
///
/// ```text
/// GET
/// /v1/jobqueues
/// jobQueues=my-queue
/// host:batch.us-east-1.amazonaws.com
/// x-amz-date:20150830T123600Z
///
/// host;x-amz-date
/// e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855
/// ```
fn canonical_request_string(
    method: &Method,
    uri: &Uri,
    host: &str,
    amz_date: &str,
    payload_hash: &str,
) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    writeln!(f, "{}", method.as_str().to_ascii_uppercase())?;
    // The path is already percent-encoded by the uri, it's used verbatim.
    let path = uri.path();
    writeln!(f, "{}", if path.is_empty() { "/" } else { path })?;
    writeln!(f, "{}", canonical_query_string(uri.query()))?;
    // Header block, same order as SIGNED_HEADERS.
    writeln!(f, "host:{host}")?;
    writeln!(f, "{X_AMZ_DATE}:{amz_date}")?;
    writeln!(f)?;
    writeln!(f, "{SIGNED_HEADERS}")?;
    write!(f, "{payload_hash}")?;

    Ok(f)
}

/// Sort query pairs by name then value and percent-encode them.
///
/// Any query built with [`AWS_QUERY_ENCODE_SET`] is returned unchanged apart
/// from ordering.
fn canonical_query_string(query: Option<&str>) -> String {
    let Some(query) = query.filter(|v| !v.is_empty()) else {
        return String::new();
    };

    let mut pairs = form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| {
            (
                utf8_percent_encode(&k, &AWS_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(&v, &AWS_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect::<Vec<_>>();
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Derive the SigV4 signing key.
///
/// ```text
/// kDate    = HMAC("AWS4" + secret, date_stamp)
/// kRegion  = HMAC(kDate, region)
/// kService = HMAC(kRegion, service)
/// kSigning = HMAC(kService, "aws4_request")
/// ```
///
/// The raw key is returned, not its hex form.
pub fn generate_signing_key(
    secret: &str,
    date_stamp: &str,
    region: &str,
    service: &str,
) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date_stamp.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), AWS4_REQUEST.as_bytes())
}
