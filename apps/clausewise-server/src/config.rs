//! Enrichment service configuration
//!
//! Credentials come from the environment (after `.env` is loaded). A service
//! whose required variables are missing is simply not configured.

use serde::Serialize;

pub const DEFAULT_WATSONX_URL: &str = "https://us-south.ml.cloud.ibm.com";
pub const DEFAULT_GRANITE_MODEL: &str = "ibm/granite-13b-chat-v2";
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Decoding parameters sent with every generation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParams {
    pub decoding_method: &'static str,
    pub max_new_tokens: u32,
    pub min_new_tokens: u32,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            decoding_method: "greedy",
            max_new_tokens: 256,
            min_new_tokens: 1,
            temperature: 0.2,
            top_k: 50,
            top_p: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WatsonxConfig {
    pub api_key: String,
    pub url: String,
    pub project_id: String,
    pub model_id: String,
    pub iam_url: String,
    pub params: GenerationParams,
}

impl WatsonxConfig {
    /// Requires `WATSONX_APIKEY` and `WATSONX_PROJECT_ID`
    pub fn from_env() -> Option<Self> {
        Some(Self {
            api_key: env_var("WATSONX_APIKEY")?,
            project_id: env_var("WATSONX_PROJECT_ID")?,
            url: env_var("WATSONX_URL").unwrap_or_else(|| DEFAULT_WATSONX_URL.to_string()),
            model_id: env_var("GRANITE_MODEL_ID")
                .unwrap_or_else(|| DEFAULT_GRANITE_MODEL.to_string()),
            iam_url: env_var("IBM_IAM_URL").unwrap_or_else(|| DEFAULT_IAM_URL.to_string()),
            params: GenerationParams::default(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct NluConfig {
    pub api_key: String,
    pub url: String,
}

impl NluConfig {
    /// Requires `WATSON_NLU_APIKEY` and `WATSON_NLU_URL`
    pub fn from_env() -> Option<Self> {
        Some(Self {
            api_key: env_var("WATSON_NLU_APIKEY")?,
            url: env_var("WATSON_NLU_URL")?,
        })
    }
}
