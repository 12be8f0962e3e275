//! `definitions` command.

use std::io::Write;

use batchctl_batch::{Client, RegisterDefinitionInput};
use batchctl_core::Result;

use super::parse_json;
use crate::cli::DefinitionsCommands;
use crate::output::{Column, OutputFormat};

const DEFINITION_COLUMNS: [Column; 4] = [
    Column::new("NAME", "jobDefinitionName"),
    Column::new("REVISION", "revision"),
    Column::new("STATUS", "status"),
    Column::new("TYPE", "type"),
];

const REGISTERED_FIELDS: [Column; 3] = [
    Column::new("Name", "jobDefinitionName"),
    Column::new("ARN", "jobDefinitionArn"),
    Column::new("Revision", "revision"),
];

/// Definitions command executor.
pub struct DefinitionsCommand {
    client: Client,
}

impl DefinitionsCommand {
    /// Create a new definitions command.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Execute a definitions subcommand.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        command: &DefinitionsCommands,
    ) -> Result<()> {
        match command {
            DefinitionsCommands::List { name, status } => {
                let defs = self
                    .client
                    .list_definitions(name.as_deref(), status.as_deref())
                    .await?;
                format.write_list(writer, &defs, &DEFINITION_COLUMNS, "job definitions")?;
            }
            DefinitionsCommands::Register {
                name,
                definition_type,
                container_properties,
            } => {
                let input = RegisterDefinitionInput {
                    job_definition_name: name.clone(),
                    definition_type: definition_type.clone(),
                    container_properties: parse_json(
                        "container-properties",
                        container_properties.as_deref(),
                    )?,
                };
                let resp = self.client.register_definition(&input).await?;
                format.write_object(writer, &resp, &REGISTERED_FIELDS)?;
            }
            DefinitionsCommands::Describe { name } => {
                let defs = self.client.describe_definition(name).await?;
                format.write_list(writer, &defs, &DEFINITION_COLUMNS, "job definitions")?;
            }
        }
        Ok(())
    }
}
