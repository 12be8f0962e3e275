use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use batchctl_aws_v4::{Config, Credential, RequestSigner, StaticCredentialProvider};
use batchctl_batch::{
    Client, CreateQueueInput, ListJobsInput, RegisterDefinitionInput, SubmitJobInput,
    UpdateQueueInput,
};
use batchctl_core::time::parse_iso8601;
use batchctl_core::{Context, Error, ErrorKind, HttpSend, Signer};
use bytes::Bytes;
use http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// HttpSend returning a canned response and recording every request.
#[derive(Debug, Clone)]
struct MockHttpSend {
    status: StatusCode,
    body: Bytes,
    requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl MockHttpSend {
    fn new(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: Bytes::from(body.to_string()),
            requests: Arc::default(),
        }
    }

    fn requests(&self) -> Vec<http::Request<Bytes>> {
        std::mem::take(&mut *self.requests.lock().expect("lock must not be poisoned"))
    }

    fn only_request(&self) -> http::Request<Bytes> {
        let mut reqs = self.requests();
        assert_eq!(reqs.len(), 1, "exactly one request must be sent");
        reqs.remove(0)
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(
        &self,
        req: http::Request<Bytes>,
    ) -> batchctl_core::Result<http::Response<Bytes>> {
        self.requests
            .lock()
            .expect("lock must not be poisoned")
            .push(req);
        Ok(http::Response::builder()
            .status(self.status)
            .body(self.body.clone())?)
    }
}

#[derive(Debug)]
struct RefusingHttpSend;

#[async_trait]
impl HttpSend for RefusingHttpSend {
    async fn http_send(
        &self,
        _: http::Request<Bytes>,
    ) -> batchctl_core::Result<http::Response<Bytes>> {
        Err(Error::network_error("connection refused"))
    }
}

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn client_with(http: impl HttpSend) -> Client {
    init();

    let signer: Signer<Credential> = Signer::new(
        Context::new().with_http_send(http),
        StaticCredentialProvider::new(
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY",
            "us-east-1",
        ),
        RequestSigner::new("batch")
            .with_time(parse_iso8601("20150830T123600Z").expect("time must be valid")),
    );
    Client::with_signer(signer, "https://batch.us-east-1.amazonaws.com")
}

fn body_json(req: &http::Request<Bytes>) -> Value {
    serde_json::from_slice(req.body()).expect("request body must be json")
}

#[tokio::test]
async fn test_submit_job_sends_exact_body() -> Result<()> {
    let http = MockHttpSend::new(
        StatusCode::OK,
        r#"{"jobId":"abc","jobName":"my-job","jobArn":"arn:aws:batch:job/abc"}"#,
    );
    let client = client_with(http.clone());

    let resp = client
        .submit_job(&SubmitJobInput::new("my-job", "my-queue", "my-def"))
        .await?;
    assert_eq!(resp["jobId"], "abc");

    let req = http.only_request();
    assert_eq!(req.method(), &Method::POST);
    assert_eq!(
        req.uri().to_string(),
        "https://batch.us-east-1.amazonaws.com/v1/submitjob"
    );
    assert_eq!(
        req.body().as_ref(),
        br#"{"jobName":"my-job","jobQueue":"my-queue","jobDefinition":"my-def"}"#
    );

    let headers = req.headers();
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(headers["accept"], "application/json");
    assert_eq!(headers["x-amz-date"], "20150830T123600Z");
    assert_eq!(
        headers["authorization"].to_str()?,
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/batch/aws4_request, \
         SignedHeaders=host;x-amz-date, \
         Signature=9625d62bd7a7c23b868c6457ac2ba1f5814d5784d6304179323051514c7b1eb8"
    );
    Ok(())
}

#[tokio::test]
async fn test_list_queues_unwraps_envelope() -> Result<()> {
    let http = MockHttpSend::new(StatusCode::OK, r#"{"jobQueues":[{"jobQueueName":"q1"}]}"#);
    let client = client_with(http.clone());

    let queues = client.list_queues().await?;
    assert_eq!(queues, vec![json!({"jobQueueName": "q1"})]);

    let req = http.only_request();
    assert_eq!(req.method(), &Method::GET);
    assert_eq!(req.uri().path(), "/v1/jobqueues");
    assert_eq!(req.uri().query(), None);
    assert!(req.body().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_missing_envelope_is_empty() -> Result<()> {
    let client = client_with(MockHttpSend::new(StatusCode::OK, "{}"));

    assert!(client.list_queues().await?.is_empty());
    assert!(client.list_jobs(&ListJobsInput::default()).await?.is_empty());
    assert!(client.list_definitions(None, None).await?.is_empty());
    assert!(client.describe_jobs(&["abc".to_string()]).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_get_queue() -> Result<()> {
    let http = MockHttpSend::new(
        StatusCode::OK,
        r#"{"jobQueues":[{"jobQueueName":"my-queue"}]}"#,
    );
    let client = client_with(http.clone());

    let queue = client.get_queue("my-queue").await?;
    assert_eq!(queue["jobQueueName"], "my-queue");

    let req = http.only_request();
    assert_eq!(req.uri().query(), Some("jobQueues=my-queue"));
    assert_eq!(
        req.headers()["authorization"].to_str()?,
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/batch/aws4_request, \
         SignedHeaders=host;x-amz-date, \
         Signature=c8bc4208974d529a972489886aea99838e81cfd14f847f65b15d0e451c0336aa"
    );
    Ok(())
}

#[tokio::test]
async fn test_get_queue_not_found_when_empty() {
    let client = client_with(MockHttpSend::new(StatusCode::OK, r#"{"jobQueues":[]}"#));

    let err = client.get_queue("missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_describe_job() -> Result<()> {
    let http = MockHttpSend::new(
        StatusCode::OK,
        r#"{"jobs":[{"jobId":"abc","status":"RUNNING"}]}"#,
    );
    let client = client_with(http.clone());

    let job = client.describe_job("abc").await?;
    assert_eq!(job["status"], "RUNNING");

    let req = http.only_request();
    assert_eq!(req.uri().path(), "/v1/describejobs");
    assert_eq!(body_json(&req), json!({"jobs": ["abc"]}));
    Ok(())
}

#[tokio::test]
async fn test_list_jobs() -> Result<()> {
    let http = MockHttpSend::new(
        StatusCode::OK,
        r#"{"jobSummaryList":[{"jobId":"a"},{"jobId":"b"}]}"#,
    );
    let client = client_with(http.clone());

    let input = ListJobsInput {
        job_queue: Some("my-queue".to_string()),
        job_status: Some("RUNNING".to_string()),
        max_results: None,
    };
    let jobs = client.list_jobs(&input).await?;
    assert_eq!(jobs.len(), 2);

    let req = http.only_request();
    assert_eq!(req.uri().path(), "/v1/listjobs");
    assert_eq!(
        body_json(&req),
        json!({"jobQueue": "my-queue", "jobStatus": "RUNNING"})
    );
    Ok(())
}

#[tokio::test]
async fn test_terminate_job() -> Result<()> {
    let http = MockHttpSend::new(StatusCode::OK, "");
    let client = client_with(http.clone());

    let resp = client.terminate_job("abc", "no longer needed").await?;
    assert_eq!(resp, json!({}));

    let req = http.only_request();
    assert_eq!(req.uri().path(), "/v1/terminatejob");
    assert_eq!(
        body_json(&req),
        json!({"jobId": "abc", "reason": "no longer needed"})
    );
    Ok(())
}

#[tokio::test]
async fn test_queue_mutations() -> Result<()> {
    let http = MockHttpSend::new(StatusCode::OK, r#"{"jobQueueName":"q1"}"#);
    let client = client_with(http.clone());

    client
        .create_queue(&CreateQueueInput {
            job_queue_name: "q1".to_string(),
            state: "ENABLED".to_string(),
            priority: 10,
            compute_environment_order: json!([{"order": 1, "computeEnvironment": "env"}]),
        })
        .await?;
    client
        .update_queue(&UpdateQueueInput {
            job_queue: "q1".to_string(),
            state: Some("DISABLED".to_string()),
            priority: None,
        })
        .await?;

    let reqs = http.requests();
    assert_eq!(reqs.len(), 2);
    assert_eq!(reqs[0].uri().path(), "/v1/createjobqueue");
    assert_eq!(
        reqs[0].body().as_ref(),
        br#"{"jobQueueName":"q1","state":"ENABLED","priority":10,"computeEnvironmentOrder":[{"computeEnvironment":"env","order":1}]}"#
    );
    assert_eq!(reqs[1].uri().path(), "/v1/updatejobqueue");
    assert_eq!(
        body_json(&reqs[1]),
        json!({"jobQueue": "q1", "state": "DISABLED"})
    );
    Ok(())
}

#[tokio::test]
async fn test_definitions() -> Result<()> {
    let http = MockHttpSend::new(
        StatusCode::OK,
        r#"{"jobDefinitions":[{"jobDefinitionName":"my-def","revision":1}]}"#,
    );
    let client = client_with(http.clone());

    let defs = client.list_definitions(Some("my-def"), Some("ACTIVE")).await?;
    assert_eq!(defs.len(), 1);
    let req = http.only_request();
    assert_eq!(req.uri().path(), "/v1/jobdefinitions");
    assert_eq!(
        req.uri().query(),
        Some("jobDefinitionName=my-def&status=ACTIVE")
    );

    client.describe_definition("my-def").await?;
    let req = http.only_request();
    assert_eq!(req.uri().query(), Some("jobDefinitionName=my-def"));

    client
        .register_definition(&RegisterDefinitionInput {
            job_definition_name: "my-def".to_string(),
            definition_type: "container".to_string(),
            container_properties: Some(json!({"image": "busybox"})),
        })
        .await?;
    let req = http.only_request();
    assert_eq!(req.uri().path(), "/v1/registerjobdefinition");
    assert_eq!(
        body_json(&req),
        json!({
            "jobDefinitionName": "my-def",
            "type": "container",
            "containerProperties": {"image": "busybox"},
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_error_status_mapping() {
    for (status, kind) in [
        (StatusCode::FORBIDDEN, ErrorKind::AuthenticationFailed),
        (StatusCode::NOT_FOUND, ErrorKind::NotFound),
        (StatusCode::TOO_MANY_REQUESTS, ErrorKind::RateLimited),
        (StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::ApiError),
    ] {
        let client = client_with(MockHttpSend::new(
            status,
            r#"{"message":"request rejected"}"#,
        ));

        let err = client.list_queues().await.unwrap_err();
        assert_eq!(err.kind(), kind, "status {status}");
        assert_eq!(err.status(), Some(status));
        assert_eq!(err.to_string(), "request rejected");
    }
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    let client = client_with(RefusingHttpSend);

    let err = client.list_queues().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NetworkError);
}

#[tokio::test]
async fn test_missing_credential_sends_nothing() {
    init();

    let http = MockHttpSend::new(StatusCode::OK, "{}");
    let client = Client::new(Context::new().with_http_send(http.clone()), Config::default());

    let err = client.list_queues().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotConfigured);
    assert!(http.requests().is_empty());
}
