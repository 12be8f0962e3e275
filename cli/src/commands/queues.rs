//! `queues` command.

use std::io::Write;

use batchctl_batch::{Client, CreateQueueInput, UpdateQueueInput};
use batchctl_core::{Error, Result};

use super::parse_json;
use crate::cli::{CreateQueueArgs, QueuesCommands};
use crate::output::{Column, OutputFormat};

const QUEUE_COLUMNS: [Column; 4] = [
    Column::new("NAME", "jobQueueName"),
    Column::new("STATE", "state"),
    Column::new("STATUS", "status"),
    Column::new("PRIORITY", "priority"),
];

const QUEUE_FIELDS: [Column; 6] = [
    Column::new("Name", "jobQueueName"),
    Column::new("ARN", "jobQueueArn"),
    Column::new("State", "state"),
    Column::new("Status", "status"),
    Column::new("Reason", "statusReason"),
    Column::new("Priority", "priority"),
];

const MUTATED_FIELDS: [Column; 2] = [
    Column::new("Name", "jobQueueName"),
    Column::new("ARN", "jobQueueArn"),
];

/// Queues command executor.
pub struct QueuesCommand {
    client: Client,
}

impl QueuesCommand {
    /// Create a new queues command.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Execute a queues subcommand.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        command: &QueuesCommands,
    ) -> Result<()> {
        match command {
            QueuesCommands::List => {
                let queues = self.client.list_queues().await?;
                format.write_list(writer, &queues, &QUEUE_COLUMNS, "job queues")?;
            }
            QueuesCommands::Get { name } => {
                let queue = self.client.get_queue(name).await?;
                format.write_object(writer, &queue, &QUEUE_FIELDS)?;
            }
            QueuesCommands::Create(args) => {
                let resp = self.client.create_queue(&create_input(args)?).await?;
                format.write_object(writer, &resp, &MUTATED_FIELDS)?;
            }
            QueuesCommands::Update {
                name,
                state,
                priority,
            } => {
                let input = UpdateQueueInput {
                    job_queue: name.clone(),
                    state: state.clone(),
                    priority: *priority,
                };
                let resp = self.client.update_queue(&input).await?;
                format.write_object(writer, &resp, &MUTATED_FIELDS)?;
            }
        }
        Ok(())
    }
}

fn create_input(args: &CreateQueueArgs) -> Result<CreateQueueInput> {
    let order = parse_json(
        "compute-environment-order",
        Some(args.compute_environment_order.as_str()),
    )?
    .ok_or_else(|| Error::invalid_input("--compute-environment-order is required"))?;

    Ok(CreateQueueInput {
        job_queue_name: args.name.clone(),
        state: args.state.clone(),
        priority: args.priority,
        compute_environment_order: order,
    })
}
