//! Command-line argument parsing with clap.

use clap::{Args, Parser, Subcommand};

/// Manage jobs, queues and job definitions on AWS Batch.
#[derive(Parser, Debug, Clone)]
#[command(name = "batchctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print raw JSON instead of a table.
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Read and write the settings store.
    Config {
        /// Config subcommand to execute.
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Submit, inspect and terminate jobs.
    Jobs {
        /// Jobs subcommand to execute.
        #[command(subcommand)]
        command: JobsCommands,
    },

    /// Manage job queues.
    Queues {
        /// Queues subcommand to execute.
        #[command(subcommand)]
        command: QueuesCommands,
    },

    /// Manage job definitions.
    Definitions {
        /// Definitions subcommand to execute.
        #[command(subcommand)]
        command: DefinitionsCommands,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print one setting.
    Get {
        /// One of accessKeyId, secretAccessKey, region, endpoint.
        key: String,
    },

    /// Store one setting.
    Set {
        /// One of accessKeyId, secretAccessKey, region, endpoint.
        key: String,
        /// Value to store.
        value: String,
    },

    /// Print all settings, secrets redacted.
    List,
}

/// Jobs subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum JobsCommands {
    /// Submit a job.
    Submit(SubmitArgs),

    /// Show one job.
    Get {
        /// Job ID.
        id: String,
    },

    /// List jobs.
    List(ListJobsArgs),

    /// Terminate a job.
    Terminate {
        /// Job ID.
        id: String,

        /// Reason recorded on the job.
        #[arg(long, default_value = "Terminated by batchctl")]
        reason: String,
    },

    /// Describe one or more jobs.
    Describe {
        /// Job IDs.
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Arguments for `jobs submit`.
#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    /// Job name.
    #[arg(long)]
    pub name: String,

    /// Job queue to submit to.
    #[arg(long)]
    pub queue: String,

    /// Job definition, by name, name:revision or ARN.
    #[arg(long)]
    pub definition: String,

    /// Parameter substitutions as a JSON object.
    #[arg(long, value_name = "JSON")]
    pub parameters: Option<String>,

    /// Container overrides as a JSON object.
    #[arg(long, value_name = "JSON")]
    pub container_overrides: Option<String>,
}

/// Arguments for `jobs list`.
#[derive(Args, Debug, Clone)]
pub struct ListJobsArgs {
    /// Job queue to list.
    #[arg(long)]
    pub queue: Option<String>,

    /// Only list jobs in this status, e.g. RUNNING.
    #[arg(long)]
    pub status: Option<String>,

    /// Maximum number of jobs to return.
    #[arg(long)]
    pub max_results: Option<u32>,
}

/// Queues subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum QueuesCommands {
    /// List job queues.
    List,

    /// Show one job queue.
    Get {
        /// Queue name.
        name: String,
    },

    /// Create a job queue.
    Create(CreateQueueArgs),

    /// Update a job queue.
    Update {
        /// Queue name.
        name: String,

        /// New state, ENABLED or DISABLED.
        #[arg(long)]
        state: Option<String>,

        /// New priority.
        #[arg(long)]
        priority: Option<i64>,
    },
}

/// Arguments for `queues create`.
#[derive(Args, Debug, Clone)]
pub struct CreateQueueArgs {
    /// Queue name.
    #[arg(long)]
    pub name: String,

    /// Scheduling priority.
    #[arg(long, default_value_t = 1)]
    pub priority: i64,

    /// Initial state, ENABLED or DISABLED.
    #[arg(long, default_value = "ENABLED")]
    pub state: String,

    /// Compute environments as a JSON array, e.g.
    /// '[{"order":1,"computeEnvironment":"my-env"}]'.
    #[arg(long, value_name = "JSON")]
    pub compute_environment_order: String,
}

/// Definitions subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum DefinitionsCommands {
    /// List job definitions.
    List {
        /// Only list definitions with this name.
        #[arg(long)]
        name: Option<String>,

        /// Only list definitions in this status, ACTIVE or INACTIVE.
        #[arg(long)]
        status: Option<String>,
    },

    /// Register a job definition.
    Register {
        /// Definition name.
        #[arg(long)]
        name: String,

        /// Definition type.
        #[arg(long = "type", default_value = "container")]
        definition_type: String,

        /// Container properties as a JSON object.
        #[arg(long, value_name = "JSON")]
        container_properties: Option<String>,
    },

    /// Show all revisions of a job definition.
    Describe {
        /// Definition name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["batchctl", "config", "set", "region", "eu-west-1"]);
        match cli.command {
            Commands::Config {
                command: ConfigCommands::Set { key, value },
            } => {
                assert_eq!(key, "region");
                assert_eq!(value, "eu-west-1");
            }
            other => panic!("expected config set, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_jobs_submit() {
        let cli = Cli::parse_from([
            "batchctl",
            "jobs",
            "submit",
            "--name",
            "my-job",
            "--queue",
            "my-queue",
            "--definition",
            "my-def",
            "--parameters",
            r#"{"key":"value"}"#,
        ]);
        match cli.command {
            Commands::Jobs {
                command: JobsCommands::Submit(args),
            } => {
                assert_eq!(args.name, "my-job");
                assert_eq!(args.queue, "my-queue");
                assert_eq!(args.definition, "my-def");
                assert_eq!(args.parameters.as_deref(), Some(r#"{"key":"value"}"#));
                assert_eq!(args.container_overrides, None);
            }
            other => panic!("expected jobs submit, got {other:?}"),
        }
    }

    #[test]
    fn cli_json_flag_after_subcommand() {
        let cli = Cli::parse_from(["batchctl", "queues", "list", "--json"]);
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Queues {
                command: QueuesCommands::List
            }
        ));

        let cli = Cli::parse_from(["batchctl", "queues", "list"]);
        assert!(!cli.json);
    }

    #[test]
    fn cli_jobs_describe_requires_ids() {
        assert!(Cli::try_parse_from(["batchctl", "jobs", "describe"]).is_err());

        let cli = Cli::parse_from(["batchctl", "jobs", "describe", "a", "b"]);
        match cli.command {
            Commands::Jobs {
                command: JobsCommands::Describe { ids },
            } => assert_eq!(ids, vec!["a".to_string(), "b".to_string()]),
            other => panic!("expected jobs describe, got {other:?}"),
        }
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["batchctl", "jobs", "terminate", "abc"]);
        match cli.command {
            Commands::Jobs {
                command: JobsCommands::Terminate { id, reason },
            } => {
                assert_eq!(id, "abc");
                assert_eq!(reason, "Terminated by batchctl");
            }
            other => panic!("expected jobs terminate, got {other:?}"),
        }

        let cli = Cli::parse_from(["batchctl", "definitions", "register", "--name", "d"]);
        match cli.command {
            Commands::Definitions {
                command: DefinitionsCommands::Register {
                    definition_type, ..
                },
            } => assert_eq!(definition_type, "container"),
            other => panic!("expected definitions register, got {other:?}"),
        }
    }
}
