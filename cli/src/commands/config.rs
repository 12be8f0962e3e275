//! `config` command: read and write the settings store.

use std::io::Write;
use std::path::PathBuf;

use batchctl_core::utils::Redact;
use batchctl_core::{Error, Result};
use serde_json::{Map, Value};

use crate::cli::ConfigCommands;
use crate::output::{Column, OutputFormat};
use crate::settings::{Settings, KNOWN_KEYS, REGION, SECRET_ACCESS_KEY};

/// Config command executor.
pub struct ConfigCommand {
    settings: Settings,
    path: PathBuf,
}

impl ConfigCommand {
    /// Create a new config command over loaded settings and their file.
    pub fn new(settings: Settings, path: PathBuf) -> Self {
        Self { settings, path }
    }

    /// Execute a config subcommand.
    pub async fn execute<W: Write>(
        mut self,
        writer: &mut W,
        format: &OutputFormat,
        command: &ConfigCommands,
    ) -> Result<()> {
        match command {
            ConfigCommands::Get { key } => {
                let value = self.get(key)?;
                writeln!(writer, "{value}")?;
            }
            ConfigCommands::Set { key, value } => {
                self.settings.set(key, value)?;
                self.settings.save(&self.path).await?;
                writeln!(writer, "Set {key} in {}", self.path.display())?;
            }
            ConfigCommands::List => {
                let fields: Vec<Column> = KNOWN_KEYS.iter().map(|&k| Column::new(k, k)).collect();
                format.write_object(writer, &self.listing(), &fields)?;
            }
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Result<&str> {
        if !KNOWN_KEYS.contains(&key) {
            return Err(Error::invalid_input(format!(
                "unknown setting {key}, expected one of: {}",
                KNOWN_KEYS.join(", ")
            )));
        }
        if key == REGION {
            return Ok(self.settings.region());
        }

        self.settings
            .get(key)
            .ok_or_else(|| Error::not_found(format!("setting {key} is not set")))
    }

    /// Every known key with its display value, the secret redacted.
    fn listing(&self) -> Value {
        let mut map = Map::new();
        for key in KNOWN_KEYS {
            let value = match key {
                REGION => Some(self.settings.region().to_string()),
                SECRET_ACCESS_KEY => self
                    .settings
                    .get(key)
                    .map(|v| Redact::from(v).to_string()),
                _ => self.settings.get(key).map(str::to_string),
            };
            map.insert(key.to_string(), value.map_or(Value::Null, Value::String));
        }
        Value::Object(map)
    }
}
