use crate::envelope::{first_or_not_found, take_list};
use crate::Client;
use batchctl_core::Result;
use serde::Serialize;
use serde_json::{json, Value};

/// Input of [`Client::submit_job`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitJobInput {
    /// Name of the job.
    pub job_name: String,
    /// Queue the job is submitted to.
    pub job_queue: String,
    /// Job definition, by name, `name:revision` or ARN.
    pub job_definition: String,
    /// Parameter substitutions for the job definition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    /// Overrides for the container the job runs in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_overrides: Option<Value>,
}

impl SubmitJobInput {
    /// Create an input with the required fields only.
    pub fn new(job_name: &str, job_queue: &str, job_definition: &str) -> Self {
        Self {
            job_name: job_name.to_string(),
            job_queue: job_queue.to_string(),
            job_definition: job_definition.to_string(),
            ..Default::default()
        }
    }
}

/// Input of [`Client::list_jobs`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListJobsInput {
    /// Queue to list jobs of.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_queue: Option<String>,
    /// Only list jobs in this status, e.g. `RUNNING`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_status: Option<String>,
    /// Upper bound on the number of results of the single returned page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl Client {
    /// Submit a job, returning the response object (`jobId`, `jobName`, `jobArn`).
    pub async fn submit_job(&self, input: &SubmitJobInput) -> Result<Value> {
        self.post("/v1/submitjob", input).await
    }

    /// Describe jobs by id.
    pub async fn describe_jobs(&self, job_ids: &[String]) -> Result<Vec<Value>> {
        let body = json!({ "jobs": job_ids });
        let resp = self.post("/v1/describejobs", &body).await?;
        take_list(resp, "jobs")
    }

    /// Describe one job, failing with `NotFound` when the server knows no such id.
    pub async fn describe_job(&self, job_id: &str) -> Result<Value> {
        let jobs = self.describe_jobs(&[job_id.to_string()]).await?;
        first_or_not_found(jobs, &format!("job {job_id}"))
    }

    /// List job summaries.
    pub async fn list_jobs(&self, input: &ListJobsInput) -> Result<Vec<Value>> {
        let resp = self.post("/v1/listjobs", input).await?;
        take_list(resp, "jobSummaryList")
    }

    /// Terminate a job.
    pub async fn terminate_job(&self, job_id: &str, reason: &str) -> Result<Value> {
        let body = json!({ "jobId": job_id, "reason": reason });
        self.post("/v1/terminatejob", &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_submit_job_input_skips_none() {
        let input = SubmitJobInput::new("my-job", "my-queue", "my-def");
        assert_eq!(
            serde_json::to_string(&input).expect("must serialize"),
            r#"{"jobName":"my-job","jobQueue":"my-queue","jobDefinition":"my-def"}"#
        );
    }

    #[test]
    fn test_submit_job_input_with_overrides() {
        let input = SubmitJobInput {
            parameters: Some(json!({"inputFile": "s3://bucket/key"})),
            container_overrides: Some(json!({"command": ["echo", "hi"]})),
            ..SubmitJobInput::new("my-job", "my-queue", "my-def")
        };
        assert_eq!(
            serde_json::to_value(&input).expect("must serialize"),
            json!({
                "jobName": "my-job",
                "jobQueue": "my-queue",
                "jobDefinition": "my-def",
                "parameters": {"inputFile": "s3://bucket/key"},
                "containerOverrides": {"command": ["echo", "hi"]},
            })
        );
    }

    #[test]
    fn test_list_jobs_input() {
        assert_eq!(
            serde_json::to_value(ListJobsInput::default()).expect("must serialize"),
            json!({})
        );

        let input = ListJobsInput {
            job_queue: Some("my-queue".to_string()),
            job_status: Some("RUNNING".to_string()),
            max_results: Some(10),
        };
        assert_eq!(
            serde_json::to_value(input).expect("must serialize"),
            json!({"jobQueue": "my-queue", "jobStatus": "RUNNING", "maxResults": 10})
        );
    }
}
