//! Optional enrichment services
//!
//! A text generator (watsonx Granite) and an entity enricher (Watson NLU).
//! Both expose `is_available()` from configuration alone; every call is a
//! single attempt whose failure the caller handles by falling back to the
//! local heuristics.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::config::{NluConfig, WatsonxConfig};

const WATSONX_API_VERSION: &str = "2023-05-29";
const NLU_API_VERSION: &str = "2021-08-01";
const NLU_ENTITY_LIMIT: u32 = 50;
const NLU_KEYWORD_LIMIT: u32 = 25;

/// Tokens are refreshed this long before IAM says they expire
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("service is not configured")]
    Unavailable,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response shape: {0}")]
    Decode(String),

    #[error("service returned an empty result")]
    EmptyResponse,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn is_available(&self) -> bool;

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, EnrichmentError>;
}

#[async_trait]
pub trait EntityEnricher: Send + Sync {
    fn is_available(&self) -> bool;

    async fn analyze(&self, text: &str) -> Result<Value, EnrichmentError>;
}

/// Chat-style prompt understood by the Granite chat models
pub fn chat_prompt(system_prompt: &str, user_prompt: &str) -> String {
    format!("<|system|>\n{system_prompt}\n<|user|>\n{user_prompt}\n<|assistant|>")
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, EnrichmentError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(EnrichmentError::Status {
        status: status.as_u16(),
        body,
    })
}

#[derive(Debug, Deserialize)]
struct IamToken {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug)]
struct CachedToken {
    value: String,
    refresh_at: Instant,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    results: Vec<GenerationResult>,
}

#[derive(Debug, Deserialize)]
struct GenerationResult {
    #[serde(default)]
    generated_text: String,
}

/// watsonx.ai text generation over REST
pub struct WatsonxGenerator {
    config: Option<WatsonxConfig>,
    client: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

impl WatsonxGenerator {
    pub fn new(config: Option<WatsonxConfig>, client: reqwest::Client) -> Self {
        Self {
            config,
            client,
            token: Mutex::new(None),
        }
    }

    /// Exchange the API key for a bearer token, reusing it until near expiry
    async fn bearer_token(&self, config: &WatsonxConfig) -> Result<String, EnrichmentError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        debug!("Requesting IAM token from {}", config.iam_url);
        let response = self
            .client
            .post(&config.iam_url)
            .form(&[
                ("grant_type", "urn:ibm:params:oauth:grant-type:apikey"),
                ("apikey", config.api_key.as_str()),
            ])
            .send()
            .await?;
        let token: IamToken = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| EnrichmentError::Decode(e.to_string()))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_REFRESH_MARGIN);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }
}

#[async_trait]
impl TextGenerator for WatsonxGenerator {
    fn is_available(&self) -> bool {
        self.config.is_some()
    }

    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, EnrichmentError> {
        let config = self.config.as_ref().ok_or(EnrichmentError::Unavailable)?;
        let token = self.bearer_token(config).await?;

        let url = format!(
            "{}/ml/v1/text/generation?version={}",
            config.url.trim_end_matches('/'),
            WATSONX_API_VERSION
        );
        let body = json!({
            "model_id": config.model_id,
            "project_id": config.project_id,
            "input": chat_prompt(system_prompt, user_prompt),
            "parameters": config.params,
        });

        let response = self.client.post(url).bearer_auth(token).json(&body).send().await?;
        let parsed: GenerationResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| EnrichmentError::Decode(e.to_string()))?;

        let text = parsed
            .results
            .into_iter()
            .next()
            .map(|r| r.generated_text.trim().to_string())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(EnrichmentError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Watson Natural Language Understanding over REST
pub struct WatsonNlu {
    config: Option<NluConfig>,
    client: reqwest::Client,
}

impl WatsonNlu {
    pub fn new(config: Option<NluConfig>, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl EntityEnricher for WatsonNlu {
    fn is_available(&self) -> bool {
        self.config.is_some()
    }

    async fn analyze(&self, text: &str) -> Result<Value, EnrichmentError> {
        let config = self.config.as_ref().ok_or(EnrichmentError::Unavailable)?;

        let url = format!(
            "{}/v1/analyze?version={}",
            config.url.trim_end_matches('/'),
            NLU_API_VERSION
        );
        let body = json!({
            "text": text,
            "features": {
                "entities": { "emotion": false, "sentiment": false, "limit": NLU_ENTITY_LIMIT },
                "keywords": { "limit": NLU_KEYWORD_LIMIT },
            },
        });

        let response = self
            .client
            .post(url)
            .basic_auth("apikey", Some(&config.api_key))
            .json(&body)
            .send()
            .await?;
        let result: Value = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| EnrichmentError::Decode(e.to_string()))?;

        match result.as_object() {
            Some(fields) if !fields.is_empty() => Ok(result),
            _ => Err(EnrichmentError::EmptyResponse),
        }
    }
}
