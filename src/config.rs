//! Process configuration read from the environment.

use secrecy::{ExposeSecret, SecretString};
use std::env;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Settings for the inference client
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Absent when no credential was configured; scans then degrade to
    /// the fallback result.
    pub api_key: Option<SecretString>,
    pub model: String,
    /// Base URL without a trailing slash
    pub endpoint: String,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl InferenceConfig {
    /// Read `GEMINI_API_KEY` (or `API_KEY`), `BENGKELMATE_MODEL` and
    /// `BENGKELMATE_ENDPOINT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = non_blank("GEMINI_API_KEY")
            .or_else(|| non_blank("API_KEY"))
            .map(SecretString::from);

        let model = non_blank("BENGKELMATE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let endpoint = non_blank("BENGKELMATE_ENDPOINT")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Self {
            api_key,
            model,
            endpoint,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_ref()
            .map(|key| !key.expose_secret().is_empty())
            .unwrap_or(false)
    }
}

/// Logging settings: `RUST_LOG` filter and `BENGKELMATE_LOG_JSON`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: String,
    pub json: bool,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let filter = lookup("RUST_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "bengkel_mate=info".to_string());

        let json = lookup("BENGKELMATE_LOG_JSON")
            .and_then(|value| match value.as_str() {
                "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
                "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
                _ => None,
            })
            .unwrap_or(false);

        Self { filter, json }
    }
}
