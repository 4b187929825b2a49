//! Process-wide configuration
//!
//! Loaded once at startup from the environment (binaries call
//! `dotenv::dotenv()` first so a local `.env` is picked up).

use std::env;

use crate::error::AdvisorError;
use crate::Result;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Clone, Debug)]
pub struct AdvisorConfig {
    /// Gemini API key; `None` blocks every AI action with a pre-flight error
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub port: u16,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_blank("GEMINI_API_KEY").or_else(|| non_blank("GOOGLE_API_KEY"));

        let port: u16 = match non_blank("PORT").or_else(|| non_blank("API_PORT")) {
            Some(raw) => raw.trim().parse().map_err(|e| {
                AdvisorError::Config(format!("Invalid port '{}': {}", raw, e))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            model: non_blank("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_blank("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AdvisorConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AdvisorConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_google_key_fallback_and_blank_key() {
        let config = config_from(&[("GOOGLE_API_KEY", "g-key")]).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("g-key"));

        let config = config_from(&[("GEMINI_API_KEY", "  "), ("GOOGLE_API_KEY", "g-key")]).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("g-key"));

        let config = config_from(&[("GEMINI_API_KEY", "")]).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_port_and_overrides() {
        let config = config_from(&[
            ("API_PORT", "9000"),
            ("GEMINI_MODEL", "gemini-pro"),
            ("GEMINI_BASE_URL", "http://localhost:1234/"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.base_url, "http://localhost:1234");

        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(AdvisorError::Config(_))
        ));
    }
}
