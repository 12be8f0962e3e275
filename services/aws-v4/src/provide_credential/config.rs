use crate::{Config, Credential};
use async_trait::async_trait;
use batchctl_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

/// ConfigCredentialProvider builds the credential from the loaded [`Config`].
///
/// Returns `None` when either key is missing or empty, the signer reports that
/// as not configured before anything is sent.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new `ConfigCredentialProvider` instance.
    pub fn new(cfg: Arc<Config>) -> Self {
        Self { config: cfg }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        let (Some(ak), Some(sk)) = (&self.config.access_key_id, &self.config.secret_access_key)
        else {
            return Ok(None);
        };
        if ak.is_empty() || sk.is_empty() {
            return Ok(None);
        }

        Ok(Some(Credential {
            access_key_id: ak.clone(),
            secret_access_key: sk.clone(),
            region: self.config.region().to_string(),
        }))
    }
}
