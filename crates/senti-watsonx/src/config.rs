//! WatsonX configuration

use serde::{Deserialize, Serialize};
use senti_core::{Error, Result};
use std::env;
use std::time::Duration;

/// Configuration for the WatsonX scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatsonxConfig {
    pub api_key: String,
    pub project_id: String,
    pub iam_url: String,
    pub api_url: String,
    pub model_id: String,
    pub timeout: Duration,
}

impl WatsonxConfig {
    pub const DEFAULT_IAM_URL: &'static str = "iam.cloud.ibm.com";
    pub const DEFAULT_API_URL: &'static str = "https://us-south.ml.cloud.ibm.com";
    pub const DEFAULT_MODEL: &'static str = "ibm/granite-3-3-8b-instruct";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

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
        let api_key = lookup("WATSONX_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .ok_or_else(|| {
                Error::Configuration(
                    "WATSONX_API_KEY or API_KEY environment variable not found".to_string(),
                )
            })?;

        let project_id = lookup("WATSONX_PROJECT_ID")
            .or_else(|| lookup("PROJECT_ID"))
            .ok_or_else(|| {
                Error::Configuration(
                    "WATSONX_PROJECT_ID or PROJECT_ID environment variable not found".to_string(),
                )
            })?;

        let mut config = Self::new(api_key, project_id);

        if let Some(iam_url) = lookup("IAM_IBM_CLOUD_URL") {
            config.iam_url = iam_url;
        }
        if let Some(api_url) = lookup("WATSONX_API_URL") {
            config.api_url = api_url;
        }
        if let Some(model_id) = lookup("WATSONX_MODEL_ID") {
            config.model_id = model_id;
        }

        Ok(config)
    }

    /// Create configuration with explicit values
    pub fn new(api_key: String, project_id: String) -> Self {
        Self {
            api_key,
            project_id,
            iam_url: Self::DEFAULT_IAM_URL.to_string(),
            api_url: Self::DEFAULT_API_URL.to_string(),
            model_id: Self::DEFAULT_MODEL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
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
    fn test_from_vars_defaults() {
        let config = WatsonxConfig::from_vars(lookup_from(&[
            ("WATSONX_API_KEY", "key"),
            ("WATSONX_PROJECT_ID", "project"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "key");
        assert_eq!(config.project_id, "project");
        assert_eq!(config.iam_url, WatsonxConfig::DEFAULT_IAM_URL);
        assert_eq!(config.model_id, WatsonxConfig::DEFAULT_MODEL);
    }

    #[test]
    fn test_from_vars_fallback_names_and_overrides() {
        let config = WatsonxConfig::from_vars(lookup_from(&[
            ("API_KEY", "legacy-key"),
            ("PROJECT_ID", "legacy-project"),
            ("WATSONX_API_URL", "https://eu-de.ml.cloud.ibm.com"),
            ("WATSONX_MODEL_ID", "ibm/granite-4-h-small"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "legacy-key");
        assert_eq!(config.project_id, "legacy-project");
        assert_eq!(config.api_url, "https://eu-de.ml.cloud.ibm.com");
        assert_eq!(config.model_id, "ibm/granite-4-h-small");
    }

    #[test]
    fn test_from_vars_missing_key() {
        let err = WatsonxConfig::from_vars(lookup_from(&[("PROJECT_ID", "p")])).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
