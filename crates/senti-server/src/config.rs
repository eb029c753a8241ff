//! Server configuration

use serde::{Deserialize, Serialize};
use senti_core::{Error, Result, ScorerKind};
use std::env;
use std::path::PathBuf;

/// Configuration for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub scorer: ScorerKind,
    /// Where feedback is persisted; in memory only when unset
    pub feedback_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            scorer: ScorerKind::default(),
            feedback_file: None,
        }
    }
}

impl ServerConfig {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 5000;

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("SENTI_HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("SENTI_PORT") {
            config.port = port.trim().parse().map_err(|_| {
                Error::Configuration(format!("SENTI_PORT must be a port number, got '{}'", port))
            })?;
        }

        if let Some(scorer) = lookup("SENTI_SCORER") {
            config.scorer = scorer.parse()?;
        }

        config.feedback_file = lookup("SENTI_FEEDBACK_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_scorer(mut self, scorer: ScorerKind) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_feedback_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.feedback_file = Some(path.into());
        self
    }

    /// Bind address in `host:port` form
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_vars(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.scorer, ScorerKind::Lexicon);
    }

    #[test]
    fn test_env_overrides() {
        let config = ServerConfig::from_vars(lookup_from(&[
            ("SENTI_HOST", "0.0.0.0"),
            ("SENTI_PORT", "8080"),
            ("SENTI_SCORER", "watsonx"),
            ("SENTI_FEEDBACK_FILE", "feedback.json"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.scorer, ScorerKind::Watsonx);
        assert_eq!(config.feedback_file, Some(PathBuf::from("feedback.json")));
    }

    #[test]
    fn test_invalid_values() {
        let err = ServerConfig::from_vars(lookup_from(&[("SENTI_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));

        let err = ServerConfig::from_vars(lookup_from(&[("SENTI_SCORER", "vader")])).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_builders() {
        let config = ServerConfig::default()
            .with_host("localhost")
            .with_port(9000)
            .with_scorer(ScorerKind::Watsonx)
            .with_feedback_file("/tmp/fb.json");
        assert_eq!(config.bind_addr(), "localhost:9000");
        assert_eq!(config.feedback_file, Some(PathBuf::from("/tmp/fb.json")));
    }
}
