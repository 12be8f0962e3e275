use crate::constants::*;
use batchctl_core::utils::Redact;
use batchctl_core::Context;
use std::fmt::{Debug, Formatter};

/// Config for aws services.
///
/// Built once at process start from the settings store and passed explicitly
/// to the credential provider and the transport.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// `region` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`]
    /// - default to [`DEFAULT_REGION`]
    pub region: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(self.access_key_id.as_deref()))
            .field(
                "secret_access_key",
                &Redact::from(self.secret_access_key.as_deref()),
            )
            .field("region", &self.region)
            .finish()
    }
}

impl Config {
    /// Fill the fields that are still unset from env.
    ///
    /// Empty values count as unset on both sides.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        fn fill(field: &mut Option<String>, ctx: &Context, key: &str) {
            if field.as_deref().is_some_and(|v| !v.is_empty()) {
                return;
            }
            if let Some(v) = ctx.env_var(key).filter(|v| !v.is_empty()) {
                *field = Some(v);
            }
        }

        fill(&mut self.access_key_id, ctx, AWS_ACCESS_KEY_ID);
        fill(&mut self.secret_access_key, ctx, AWS_SECRET_ACCESS_KEY);
        fill(&mut self.region, ctx, AWS_REGION);
        self
    }

    /// The region to sign for, falling back to [`DEFAULT_REGION`].
    pub fn region(&self) -> &str {
        match self.region.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => DEFAULT_REGION,
        }
    }
}
