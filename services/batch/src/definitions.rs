use crate::envelope::take_list;
use crate::Client;
use batchctl_core::Result;
use serde::Serialize;
use serde_json::Value;

/// Input of [`Client::register_definition`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDefinitionInput {
    /// Name of the job definition.
    pub job_definition_name: String,
    /// Definition type, `container` or `multinode`.
    #[serde(rename = "type")]
    pub definition_type: String,
    /// Container properties of the definition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_properties: Option<Value>,
}

impl Client {
    /// List job definitions, optionally filtered by name and status.
    pub async fn list_definitions(
        &self,
        name: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<Value>> {
        let mut query = Vec::with_capacity(2);
        if let Some(name) = name {
            query.push(("jobDefinitionName", name));
        }
        if let Some(status) = status {
            query.push(("status", status));
        }

        let resp = self.get("/v1/jobdefinitions", &query).await?;
        take_list(resp, "jobDefinitions")
    }

    /// All revisions of the named job definition.
    pub async fn describe_definition(&self, name: &str) -> Result<Vec<Value>> {
        self.list_definitions(Some(name), None).await
    }

    /// Register a job definition.
    pub async fn register_definition(&self, input: &RegisterDefinitionInput) -> Result<Value> {
        self.post("/v1/registerjobdefinition", input).await
    }
}
