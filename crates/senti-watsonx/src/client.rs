//! WatsonX scorer implementation

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{debug, warn};

use senti_core::{Error, Polarity, Result, SentimentScorer};

use crate::config::WatsonxConfig;

/// Tokens are renewed this long before IAM says they expire
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Lifetime assumed when IAM omits `expires_in`
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

/// IAM bearer token and the moment it stops being accepted
#[derive(Debug, Clone)]
pub(crate) struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    pub(crate) fn new(value: String, lifetime: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + lifetime,
        }
    }

    /// Whether the token is still usable at `now`, keeping a safety margin
    pub(crate) fn is_fresh(&self, now: Instant) -> bool {
        now + TOKEN_REFRESH_MARGIN < self.expires_at
    }
}

/// Polarity scorer backed by a watsonx.ai foundation model.
///
/// The IAM token obtained by [`connect`](WatsonxScorer::connect) is renewed
/// automatically when it nears expiry or the API rejects it.
pub struct WatsonxScorer {
    config: WatsonxConfig,
    token: RwLock<Option<AccessToken>>,
    client: Client,
    number_pattern: Regex,
}

#[derive(Serialize)]
struct TokenRequest {
    grant_type: String,
    apikey: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Serialize)]
struct GenerationParams {
    decoding_method: String,
    max_new_tokens: u32,
    min_new_tokens: u32,
    stop_sequences: Vec<String>,
}

#[derive(Serialize)]
struct GenerationRequest {
    input: String,
    parameters: GenerationParams,
    model_id: String,
    project_id: String,
}

#[derive(Deserialize)]
struct GenerationResults {
    generated_text: String,
}

#[derive(Deserialize)]
struct GenerationData {
    results: Vec<GenerationResults>,
}

impl WatsonxScorer {
    /// Create a new scorer from configuration
    pub fn new(config: WatsonxConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(network_error)?;

        let number_pattern = Regex::new(r"[-+]?(?:\d+(?:\.\d*)?|\.\d+)")
            .map_err(|e| Error::Configuration(format!("invalid number pattern: {}", e)))?;

        Ok(Self {
            config,
            token: RwLock::new(None),
            client,
            number_pattern,
        })
    }

    /// Create a new scorer from environment variables
    pub fn from_env() -> Result<Self> {
        let config = WatsonxConfig::from_env()?;
        Self::new(config)
    }

    /// Get the model ID being used
    pub fn model_id(&self) -> &str {
        &self.config.model_id
    }

    /// Exchange the API key for an IAM bearer token
    pub async fn connect(&self) -> Result<()> {
        self.refresh_token().await.map(|_| ())
    }

    /// Request a new token from IAM and store it
    async fn refresh_token(&self) -> Result<String> {
        let token_request = TokenRequest {
            grant_type: "urn:ibm:params:oauth:grant-type:apikey".to_string(),
            apikey: self.config.api_key.clone(),
        };

        let url = format!("https://{}/identity/token", self.config.iam_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form(&token_request)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(Error::Authentication(format!(
                "Authentication failed: {}",
                response.status()
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let lifetime = token_response
            .expires_in
            .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        let token = AccessToken::new(token_response.access_token, Duration::from_secs(lifetime));
        let value = token.value.clone();

        *self.token.write().await = Some(token);
        debug!(model = %self.config.model_id, expires_in = lifetime, "watsonx scorer authenticated");

        Ok(value)
    }

    /// Current bearer token, renewed first when it is about to expire
    async fn bearer_token(&self) -> Result<String> {
        {
            let token = self.token.read().await;
            match token.as_ref() {
                None => {
                    return Err(Error::Authentication(
                        "Not authenticated. Call connect() first.".to_string(),
                    ));
                }
                Some(token) if token.is_fresh(Instant::now()) => return Ok(token.value.clone()),
                Some(_) => {}
            }
        }

        debug!("watsonx token near expiry, renewing");
        self.refresh_token().await
    }

    #[cfg(test)]
    pub(crate) async fn store_token(&self, token: AccessToken) {
        *self.token.write().await = Some(token);
    }

    /// Build the rating prompt for a text
    pub(crate) fn build_prompt(&self, text: &str) -> String {
        format!(
            "Rate the sentiment polarity of the text below on a scale from -1.0 \
             (very negative) to 1.0 (very positive), where 0 means neutral.\n\
             Answer with a single number only.\n\n\
             Text: {}\n\
             Polarity:",
            text.trim()
        )
    }

    /// Pull the first number out of the model reply
    pub(crate) fn parse_polarity(&self, reply: &str) -> Result<Polarity> {
        let number = self
            .number_pattern
            .find(reply)
            .ok_or_else(|| Error::Scorer(format!("no polarity in model reply: {:?}", reply)))?;

        let value: f64 = number
            .as_str()
            .parse()
            .map_err(|e| Error::Scorer(format!("unparseable polarity {:?}: {}", number.as_str(), e)))?;

        if !(Polarity::MIN..=Polarity::MAX).contains(&value) {
            warn!(value, "model polarity out of range, clamping");
        }

        Ok(Polarity::new(value))
    }

    async fn send_generation(
        &self,
        url: &str,
        access_token: &str,
        request_body: &GenerationRequest,
    ) -> Result<reqwest::Response> {
        self.client
            .post(url)
            .header("Accept", "application/json")
            .header("Authorization", format!("Bearer {}", access_token))
            .json(request_body)
            .send()
            .await
            .map_err(network_error)
    }

    /// Perform the actual generation request
    async fn perform_generation(&self, prompt: String) -> Result<String> {
        let access_token = self.bearer_token().await?;

        let request_body = GenerationRequest {
            input: prompt,
            parameters: GenerationParams {
                decoding_method: "greedy".to_string(),
                max_new_tokens: 8,
                min_new_tokens: 1,
                stop_sequences: vec!["\n".to_string()],
            },
            model_id: self.config.model_id.clone(),
            project_id: self.config.project_id.clone(),
        };

        let url = format!(
            "{}/ml/v1/text/generation?version=2023-05-29",
            self.config.api_url
        );

        let mut response = self.send_generation(&url, &access_token, &request_body).await?;

        // revoked or expired early: renew once and retry
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("watsonx rejected the token, re-authenticating");
            let access_token = self.refresh_token().await?;
            response = self.send_generation(&url, &access_token, &request_body).await?;
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Scorer(format!(
                "WatsonX API request failed with status {}: {}",
                status, error_text
            )));
        }

        let data: GenerationData = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        data.results
            .into_iter()
            .next()
            .map(|result| result.generated_text)
            .ok_or_else(|| Error::Scorer("Empty response from WatsonX API".to_string()))
    }
}

fn network_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Network(e.to_string())
    }
}

#[async_trait]
impl SentimentScorer for WatsonxScorer {
    async fn score(&self, text: &str) -> Result<Polarity> {
        let prompt = self.build_prompt(text);

        let reply = match timeout(self.config.timeout, self.perform_generation(prompt)).await {
            Ok(result) => result?,
            Err(_) => return Err(Error::Timeout("WatsonX request timed out".to_string())),
        };

        self.parse_polarity(&reply)
    }

    fn name(&self) -> &str {
        "watsonx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> WatsonxScorer {
        let config = WatsonxConfig::new("test_key".to_string(), "test_project".to_string());
        WatsonxScorer::new(config).unwrap()
    }

    #[test]
    fn test_parse_polarity() {
        let scorer = scorer();
        assert_eq!(scorer.parse_polarity(" 0.75").unwrap().value(), 0.75);
        assert_eq!(scorer.parse_polarity("-0.4 (negative)").unwrap().value(), -0.4);
        assert_eq!(scorer.parse_polarity("Polarity: .5").unwrap().value(), 0.5);
        assert_eq!(scorer.parse_polarity("0").unwrap().value(), 0.0);
        assert_eq!(scorer.parse_polarity("+1").unwrap().value(), 1.0);
    }

    #[test]
    fn test_parse_polarity_clamps() {
        let scorer = scorer();
        assert_eq!(scorer.parse_polarity("7").unwrap().value(), 1.0);
        assert_eq!(scorer.parse_polarity("-3.5").unwrap().value(), -1.0);
    }

    #[test]
    fn test_parse_polarity_rejects_words() {
        let scorer = scorer();
        let err = scorer.parse_polarity("positive").unwrap_err();
        assert!(matches!(err, Error::Scorer(_)));
    }

    #[tokio::test]
    async fn test_score_requires_connect() {
        let scorer = scorer();
        let err = scorer.score("I love this").await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[test]
    fn test_token_freshness() {
        let now = Instant::now();
        let token = AccessToken::new("t".to_string(), Duration::from_secs(3600));
        assert!(token.is_fresh(now));

        let expired = AccessToken::new("t".to_string(), Duration::ZERO);
        assert!(!expired.is_fresh(now));

        let inside_margin = AccessToken::new("t".to_string(), TOKEN_REFRESH_MARGIN / 2);
        assert!(!inside_margin.is_fresh(Instant::now()));

        assert!(!token.is_fresh(token.expires_at));
    }

    #[tokio::test]
    async fn test_fresh_token_is_reused() {
        let scorer = scorer();
        scorer
            .store_token(AccessToken::new("cached".to_string(), Duration::from_secs(3600)))
            .await;
        assert_eq!(scorer.bearer_token().await.unwrap(), "cached");
    }

    #[tokio::test]
    async fn test_stale_token_triggers_reauthentication() {
        // nothing listens on port 1, so the renewal attempt fails fast
        let mut config = WatsonxConfig::new("k".to_string(), "p".to_string());
        config.iam_url = "127.0.0.1:1".to_string();
        let scorer = WatsonxScorer::new(config).unwrap();
        scorer
            .store_token(AccessToken::new("old".to_string(), Duration::ZERO))
            .await;

        let err = scorer.bearer_token().await.unwrap_err();
        assert!(matches!(err, Error::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_score_times_out() {
        // accepts connections but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mut config = WatsonxConfig::new("k".to_string(), "p".to_string())
            .with_timeout(Duration::from_millis(100));
        config.api_url = format!("http://{}", addr);
        let scorer = WatsonxScorer::new(config).unwrap();
        scorer
            .store_token(AccessToken::new("token".to_string(), Duration::from_secs(3600)))
            .await;

        let err = scorer.score("I love this").await.unwrap_err();
        assert!(matches!(err, Error::Timeout(_)), "got {err:?}");
        drop(listener);
    }
}
