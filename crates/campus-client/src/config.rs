//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the client can start with zero
//! configuration for local development.

use std::path::PathBuf;
use std::time::Duration;

use campus_shared::constants::DEFAULT_SPLASH_MS;

/// What `update_user` does when the record's id is unknown to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Fail with `NotFound`; neither registry nor session is written.
    Strict,
    /// Insert the record so the registry and the session stay in step.
    Upsert,
}

impl UpdatePolicy {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "upsert" => Some(Self::Upsert),
            _ => None,
        }
    }
}

/// Whether subscribing charges the student's wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMode {
    /// The price is displayed but nothing is debited.
    Cosmetic,
    /// The price is debited; a short balance fails the subscription.
    Debit,
}

impl PaymentMode {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cosmetic" => Some(Self::Cosmetic),
            "debit" => Some(Self::Debit),
            _ => None,
        }
    }
}

/// Generative-AI backend settings.
#[derive(Clone)]
pub struct GeminiConfig {
    /// Env: `GEMINI_API_KEY`.  `None` disables the assistant.
    pub api_key: Option<String>,
    /// Env: `GEMINI_MODEL`
    pub model: String,
    /// Env: `GEMINI_API_URL`
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Directory holding the persisted store.
    /// Env: `CAMPUS_DATA_DIR`
    /// Default: platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Simulated latency applied to every async command.
    /// Env: `CAMPUS_LATENCY_MS`
    /// Default: `0`
    pub latency: Duration,

    /// How long the splash screen stays up.
    /// Env: `CAMPUS_SPLASH_MS`
    /// Default: `2000`
    pub splash: Duration,

    /// Env: `CAMPUS_UPDATE_POLICY` (strict/upsert)
    /// Default: `upsert`
    pub update_policy: UpdatePolicy,

    /// Env: `CAMPUS_PAYMENT_MODE` (cosmetic/debit)
    /// Default: `cosmetic`
    pub payment_mode: PaymentMode,

    pub gemini: GeminiConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            latency: Duration::ZERO,
            splash: Duration::from_millis(DEFAULT_SPLASH_MS),
            update_policy: UpdatePolicy::Upsert,
            payment_mode: PaymentMode::Cosmetic,
            gemini: GeminiConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = var("CAMPUS_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(val) = var("CAMPUS_LATENCY_MS") {
            match parse_millis(&val) {
                Ok(d) => config.latency = d,
                Err(e) => tracing::warn!(value = %val, error = %e, "Invalid CAMPUS_LATENCY_MS, using default"),
            }
        }

        if let Some(val) = var("CAMPUS_SPLASH_MS") {
            match parse_millis(&val) {
                Ok(d) => config.splash = d,
                Err(e) => tracing::warn!(value = %val, error = %e, "Invalid CAMPUS_SPLASH_MS, using default"),
            }
        }

        if let Some(val) = var("CAMPUS_UPDATE_POLICY") {
            match UpdatePolicy::parse(&val) {
                Some(p) => config.update_policy = p,
                None => tracing::warn!(value = %val, "Invalid CAMPUS_UPDATE_POLICY, using default"),
            }
        }

        if let Some(val) = var("CAMPUS_PAYMENT_MODE") {
            match PaymentMode::parse(&val) {
                Some(m) => config.payment_mode = m,
                None => tracing::warn!(value = %val, "Invalid CAMPUS_PAYMENT_MODE, using default"),
            }
        }

        if let Some(key) = var("GEMINI_API_KEY") {
            if !key.is_empty() {
                config.gemini.api_key = Some(key);
            }
        }

        if let Some(model) = var("GEMINI_MODEL") {
            config.gemini.model = model;
        }

        if let Some(url) = var("GEMINI_API_URL") {
            config.gemini.base_url = url.trim_end_matches('/').to_string();
        }

        config
    }
}

fn parse_millis(s: &str) -> Result<Duration, String> {
    s.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| format!("expected milliseconds: {e}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.latency, Duration::ZERO);
        assert_eq!(config.update_policy, UpdatePolicy::Upsert);
        assert_eq!(config.payment_mode, PaymentMode::Cosmetic);
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn test_overrides_from_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("CAMPUS_LATENCY_MS", "250"),
            ("CAMPUS_UPDATE_POLICY", "Strict"),
            ("CAMPUS_PAYMENT_MODE", "debit"),
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_API_URL", "http://localhost:9000/"),
        ]));
        assert_eq!(config.latency, Duration::from_millis(250));
        assert_eq!(config.update_policy, UpdatePolicy::Strict);
        assert_eq!(config.payment_mode, PaymentMode::Debit);
        assert_eq!(config.gemini.api_key.as_deref(), Some("k"));
        assert_eq!(config.gemini.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("CAMPUS_SPLASH_MS", "soon"),
            ("CAMPUS_PAYMENT_MODE", "card"),
        ]));
        assert_eq!(config.splash, Duration::from_millis(DEFAULT_SPLASH_MS));
        assert_eq!(config.payment_mode, PaymentMode::Cosmetic);
    }

    #[test]
    fn test_api_key_is_redacted_in_debug() {
        let mut config = ClientConfig::default();
        config.gemini.api_key = Some("secret".into());
        assert!(!format!("{config:?}").contains("secret"));
    }
}
