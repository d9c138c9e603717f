//! Configuration for the generative oracle client

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// Gemini oracle configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    /// Enable/disable oracle calls globally
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Base URL of the generative language API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for both discovery and briefs
    #[serde(default = "default_model")]
    pub model: String,

    /// API key (read from env GEMINI_API_KEY or API_KEY if not set)
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Consecutive failures before an operation's circuit opens
    #[serde(default = "default_breaker_failures")]
    pub circuit_breaker_failures: usize,

    /// Seconds an open circuit waits before letting a probe through
    #[serde(default = "default_breaker_reset")]
    pub circuit_breaker_reset_secs: u64,
}

fn default_enabled() -> bool { true }
fn default_base_url() -> String { "https://generativelanguage.googleapis.com".to_string() }
fn default_model() -> String { "gemini-3-flash-preview".to_string() }
fn default_timeout_ms() -> u64 { 30_000 }
fn default_breaker_failures() -> usize { 5 }
fn default_breaker_reset() -> u64 { 30 }

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
            circuit_breaker_failures: default_breaker_failures(),
            circuit_breaker_reset_secs: default_breaker_reset(),
        }
    }
}

impl OracleConfig {
    /// Apply the well-known oracle environment variables on top of this config
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("ORACLE_ENABLED") {
            self.enabled = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("GEMINI_BASE_URL") {
            self.base_url = val;
        }

        if let Ok(val) = std::env::var("GEMINI_MODEL") {
            self.model = val;
        }

        // GEMINI_API_KEY wins over the generic API_KEY
        if self.api_key.is_none() {
            let key = std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("API_KEY"))
                .ok()
                .filter(|k| !k.trim().is_empty());
            if let Some(key) = key {
                self.api_key = Some(SecretString::new(key));
            }
        }

        if let Ok(val) = std::env::var("GEMINI_TIMEOUT_MS") {
            if let Ok(timeout) = val.parse() {
                self.timeout_ms = timeout;
            }
        }

        if let Ok(val) = std::env::var("ORACLE_CIRCUIT_THRESHOLD") {
            if let Ok(threshold) = val.parse() {
                self.circuit_breaker_failures = threshold;
            }
        }

        if let Ok(val) = std::env::var("ORACLE_CIRCUIT_COOLDOWN_SECS") {
            if let Ok(secs) = val.parse() {
                self.circuit_breaker_reset_secs = secs;
            }
        }

        self
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get circuit breaker reset timeout as Duration
    pub fn breaker_reset_timeout(&self) -> Duration {
        Duration::from_secs(self.circuit_breaker_reset_secs)
    }

    /// Full generateContent endpoint for the configured model
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}
