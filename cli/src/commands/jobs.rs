//! `jobs` command: submit, list, inspect and terminate jobs.

use std::io::Write;

use batchctl_batch::{Client, ListJobsInput, SubmitJobInput};
use batchctl_core::Result;

use super::parse_json;
use crate::cli::{JobsCommands, ListJobsArgs, SubmitArgs};
use crate::output::{Column, OutputFormat};

const SUBMITTED_FIELDS: [Column; 3] = [
    Column::new("Job ID", "jobId"),
    Column::new("Name", "jobName"),
    Column::new("ARN", "jobArn"),
];

const SUMMARY_COLUMNS: [Column; 5] = [
    Column::new("JOB ID", "jobId"),
    Column::new("NAME", "jobName"),
    Column::new("STATUS", "status"),
    Column::new("CREATED", "createdAt"),
    Column::new("STOPPED", "stoppedAt"),
];

const DETAIL_FIELDS: [Column; 10] = [
    Column::new("Job ID", "jobId"),
    Column::new("Name", "jobName"),
    Column::new("ARN", "jobArn"),
    Column::new("Queue", "jobQueue"),
    Column::new("Definition", "jobDefinition"),
    Column::new("Status", "status"),
    Column::new("Reason", "statusReason"),
    Column::new("Created", "createdAt"),
    Column::new("Started", "startedAt"),
    Column::new("Stopped", "stoppedAt"),
];

const DESCRIBE_COLUMNS: [Column; 5] = [
    Column::new("JOB ID", "jobId"),
    Column::new("NAME", "jobName"),
    Column::new("QUEUE", "jobQueue"),
    Column::new("STATUS", "status"),
    Column::new("REASON", "statusReason"),
];

/// Jobs command executor.
pub struct JobsCommand {
    client: Client,
}

impl JobsCommand {
    /// Create a new jobs command.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Execute a jobs subcommand.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        command: &JobsCommands,
    ) -> Result<()> {
        match command {
            JobsCommands::Submit(args) => {
                let input = submit_input(args)?;
                let resp = self.client.submit_job(&input).await?;
                format.write_object(writer, &resp, &SUBMITTED_FIELDS)?;
            }
            JobsCommands::Get { id } => {
                let job = self.client.describe_job(id).await?;
                format.write_object(writer, &job, &DETAIL_FIELDS)?;
            }
            JobsCommands::List(args) => {
                let jobs = self.client.list_jobs(&list_input(args)).await?;
                format.write_list(writer, &jobs, &SUMMARY_COLUMNS, "jobs")?;
            }
            JobsCommands::Terminate { id, reason } => {
                let resp = self.client.terminate_job(id, reason).await?;
                format.write_message(writer, &format!("Job {id} terminated"), &resp)?;
            }
            JobsCommands::Describe { ids } => {
                let jobs = self.client.describe_jobs(ids).await?;
                format.write_list(writer, &jobs, &DESCRIBE_COLUMNS, "jobs")?;
            }
        }
        Ok(())
    }
}

fn submit_input(args: &SubmitArgs) -> Result<SubmitJobInput> {
    Ok(SubmitJobInput {
        parameters: parse_json("parameters", args.parameters.as_deref())?,
        container_overrides: parse_json(
            "container-overrides",
            args.container_overrides.as_deref(),
        )?,
        ..SubmitJobInput::new(&args.name, &args.queue, &args.definition)
    })
}

fn list_input(args: &ListJobsArgs) -> ListJobsInput {
    ListJobsInput {
        job_queue: args.queue.clone(),
        job_status: args.status.clone(),
        max_results: args.max_results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchctl_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn args() -> SubmitArgs {
        SubmitArgs {
            name: "my-job".to_string(),
            queue: "my-queue".to_string(),
            definition: "my-def".to_string(),
            parameters: None,
            container_overrides: None,
        }
    }

    #[test]
    fn test_submit_input() {
        assert_eq!(
            submit_input(&args()).expect("must build"),
            SubmitJobInput::new("my-job", "my-queue", "my-def")
        );

        let input = submit_input(&SubmitArgs {
            container_overrides: Some(r#"{"vcpus":2}"#.to_string()),
            ..args()
        })
        .expect("must build");
        assert_eq!(input.container_overrides, Some(json!({"vcpus": 2})));
    }

    #[test]
    fn test_submit_input_rejects_malformed_json() {
        let err = submit_input(&SubmitArgs {
            parameters: Some("{oops".to_string()),
            ..args()
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
