use crate::envelope::{first_or_not_found, take_list};
use crate::Client;
use batchctl_core::Result;
use serde::Serialize;
use serde_json::Value;

/// Input of [`Client::create_queue`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQueueInput {
    /// Name of the new queue.
    pub job_queue_name: String,
    /// `ENABLED` or `DISABLED`.
    pub state: String,
    /// Scheduling priority, higher runs first.
    pub priority: i64,
    /// Ordered compute environments, e.g.
    /// `[{"order": 1, "computeEnvironment": "my-env"}]`.
    pub compute_environment_order: Value,
}

/// Input of [`Client::update_queue`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQueueInput {
    /// Queue to update, by name or ARN.
    pub job_queue: String,
    /// New state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl Client {
    /// List job queues.
    pub async fn list_queues(&self) -> Result<Vec<Value>> {
        let resp = self.get("/v1/jobqueues", &[]).await?;
        take_list(resp, "jobQueues")
    }

    /// Get one job queue by name.
    pub async fn get_queue(&self, name: &str) -> Result<Value> {
        let resp = self.get("/v1/jobqueues", &[("jobQueues", name)]).await?;
        first_or_not_found(take_list(resp, "jobQueues")?, &format!("job queue {name}"))
    }

    /// Create a job queue.
    pub async fn create_queue(&self, input: &CreateQueueInput) -> Result<Value> {
        self.post("/v1/createjobqueue", input).await
    }

    /// Update a job queue.
    pub async fn update_queue(&self, input: &UpdateQueueInput) -> Result<Value> {
        self.post("/v1/updatejobqueue", input).await
    }
}
