//! Flat key/value settings persisted as a JSON object.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use batchctl_aws_v4::{Config, DEFAULT_REGION};
use batchctl_core::{Context, Error, ErrorKind, Result};
use log::{debug, warn};

/// Env var overriding the settings file location.
pub const BATCHCTL_CONFIG_FILE: &str = "BATCHCTL_CONFIG_FILE";
/// Settings file used when the env var is unset.
pub const DEFAULT_CONFIG_FILE: &str = "~/.batchctl/config.json";

/// Access key id setting.
pub const ACCESS_KEY_ID: &str = "accessKeyId";
/// Secret access key setting.
pub const SECRET_ACCESS_KEY: &str = "secretAccessKey";
/// Region setting.
pub const REGION: &str = "region";
/// Endpoint override setting.
pub const ENDPOINT: &str = "endpoint";

/// Every key the store accepts, in display order.
pub const KNOWN_KEYS: [&str; 4] = [ACCESS_KEY_ID, SECRET_ACCESS_KEY, REGION, ENDPOINT];

/// Settings loaded once per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Location of the settings file: `$BATCHCTL_CONFIG_FILE` or
    /// `~/.batchctl/config.json`.
    pub fn path(ctx: &Context) -> Result<PathBuf> {
        let path = ctx
            .env_var(BATCHCTL_CONFIG_FILE)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        let expanded = ctx
            .expand_home_dir(&path)
            .ok_or_else(|| Error::config_invalid("home directory not found"))?;
        Ok(PathBuf::from(expanded))
    }

    /// Load settings from `path`. A missing file is an empty store.
    pub async fn load(ctx: &Context, path: &Path) -> Result<Self> {
        let content = match ctx.file_read(&path.to_string_lossy()).await {
            Ok(v) => v,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("settings file {} not found, using empty settings", path.display());
                return Ok(Self::default());
            }
            Err(err) => return Err(err),
        };

        Self::parse(&content).map_err(|err| {
            Error::config_invalid(format!(
                "failed to parse settings file {}: {err}",
                path.display()
            ))
            .with_source(err)
        })
    }

    fn parse(content: &[u8]) -> std::result::Result<Self, serde_json::Error> {
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let values: BTreeMap<String, String> = serde_json::from_slice(content)?;
        for key in values.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
            warn!("ignoring unknown setting {key}");
        }
        Ok(Self { values })
    }

    /// Write the whole store to `path`, creating its parent directory.
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut content = serde_json::to_vec_pretty(&self.values)?;
        content.push(b'\n');
        tokio::fs::write(path, content).await?;
        debug!("settings written to {}", path.display());
        Ok(())
    }

    /// Stored value of `key`, `None` when unset or empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Store `value` under `key`, rejecting unknown keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if !KNOWN_KEYS.contains(&key) {
            return Err(Error::invalid_input(format!(
                "unknown setting {key}, expected one of: {}",
                KNOWN_KEYS.join(", ")
            )));
        }

        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Effective region, falling back to the default.
    pub fn region(&self) -> &str {
        self.get(REGION).unwrap_or(DEFAULT_REGION)
    }

    /// Endpoint override, if any.
    pub fn endpoint(&self) -> Option<&str> {
        self.get(ENDPOINT)
    }

    /// Build the signing config, with the environment filling unset keys.
    pub fn to_config(&self, ctx: &Context) -> Config {
        Config {
            access_key_id: self.get(ACCESS_KEY_ID).map(str::to_string),
            secret_access_key: self.get(SECRET_ACCESS_KEY).map(str::to_string),
            region: self.get(REGION).map(str::to_string),
        }
        .from_env(ctx)
    }
}
