//! Client configuration.

use std::fmt;

use crate::error::{Result, StripeError};

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";
pub const DEFAULT_WEBHOOK_TOLERANCE_SECS: u64 = 300;

/// Credentials and endpoints for `StripeClient` and webhook verification.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub api_base: String,
    /// Pinned `Stripe-Version`; the account default when `None`.
    pub api_version: Option<String>,
    /// Endpoint secret used by `StripeClient::construct_event`.
    pub webhook_secret: Option<String>,
    /// Allowed clock skew for webhook timestamps; `0` disables the check.
    pub webhook_tolerance_secs: u64,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_version: None,
            webhook_secret: None,
            webhook_tolerance_secs: DEFAULT_WEBHOOK_TOLERANCE_SECS,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }

    pub fn with_webhook_tolerance(mut self, secs: u64) -> Self {
        self.webhook_tolerance_secs = secs;
        self
    }

    /// Read `STRIPE_SECRET_KEY` (required), `STRIPE_API_BASE`,
    /// `STRIPE_API_VERSION`, `STRIPE_WEBHOOK_SECRET` and
    /// `STRIPE_WEBHOOK_TOLERANCE`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let api_key = present("STRIPE_SECRET_KEY")
            .ok_or_else(|| StripeError::Config("STRIPE_SECRET_KEY is not set".to_string()))?;
        let mut config = Self::new(api_key);

        if let Some(base) = present("STRIPE_API_BASE") {
            config = config.with_api_base(base);
        }
        config.api_version = present("STRIPE_API_VERSION");
        config.webhook_secret = present("STRIPE_WEBHOOK_SECRET");
        if let Some(raw) = present("STRIPE_WEBHOOK_TOLERANCE") {
            config.webhook_tolerance_secs = raw.parse().map_err(|_| {
                StripeError::Config(format!("STRIPE_WEBHOOK_TOLERANCE is not a number: {raw}"))
            })?;
        }
        Ok(config)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_base", &self.api_base)
            .field("api_version", &self.api_version)
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "[redacted]"))
            .field("webhook_tolerance_secs", &self.webhook_tolerance_secs)
            .finish()
    }
}

// Keep the `sk_test_` / `sk_live_` prefix visible.
fn redact(key: &str) -> String {
    match key.rfind('_') {
        Some(idx) => format!("{}***", &key[..=idx]),
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::new("sk_test_123");
        assert_eq!(config.api_base, "https://api.stripe.com");
        assert_eq!(config.webhook_tolerance_secs, 300);
        assert!(config.api_version.is_none());
    }

    #[test]
    fn api_base_trailing_slash_is_stripped() {
        let config = ClientConfig::new("sk_test_123").with_api_base("http://localhost:12111/");
        assert_eq!(config.api_base, "http://localhost:12111");
    }

    #[test]
    fn missing_secret_key_is_an_error() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, StripeError::Config(msg) if msg.contains("STRIPE_SECRET_KEY")));
    }

    #[test]
    fn reads_every_variable() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("STRIPE_SECRET_KEY", "sk_test_abc"),
            ("STRIPE_API_BASE", "http://localhost:12111"),
            ("STRIPE_API_VERSION", "2024-06-20"),
            ("STRIPE_WEBHOOK_SECRET", "whsec_1"),
            ("STRIPE_WEBHOOK_TOLERANCE", "60"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "sk_test_abc");
        assert_eq!(config.api_base, "http://localhost:12111");
        assert_eq!(config.api_version.as_deref(), Some("2024-06-20"));
        assert_eq!(config.webhook_secret.as_deref(), Some("whsec_1"));
        assert_eq!(config.webhook_tolerance_secs, 60);
    }

    #[test]
    fn bad_tolerance_is_an_error() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("STRIPE_SECRET_KEY", "sk_test_abc"),
            ("STRIPE_WEBHOOK_TOLERANCE", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, StripeError::Config(_)));
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = ClientConfig::new("sk_test_supersecret").with_webhook_secret("whsec_abc");
        let rendered = format!("{config:?}");
        assert!(rendered.contains("sk_test_***"));
        assert!(!rendered.contains("supersecret"));
        assert!(!rendered.contains("whsec_abc"));
    }
}
