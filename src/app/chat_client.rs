use crate::app::http::send_once;
use crate::domain::ports::{ConfigProvider, RecommendationClient};
use crate::utils::error::{MujiError, Result};
use crate::utils::validation::{validate_credential, validate_non_empty_string, validate_url};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const RECOMMENDATION_SERVICE: &str = "recommendation";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You're a helpful assistant";

/// Chat completion 推薦客戶端
///
/// 金鑰在建構時檢查，缺少時直接回傳設定錯誤。每次 `recommend` 只發出一個請求。
#[derive(Clone)]
pub struct HttpRecommendationClient {
    endpoint: String,
    api_key: String,
    model: String,
    system_prompt: String,
    timeout: Option<Duration>,
    client: Client,
}

impl std::fmt::Debug for HttpRecommendationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRecommendationClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpRecommendationClient {
    pub fn new(endpoint: &str, api_key: &str, model: &str) -> Result<Self> {
        validate_url("recommendation.endpoint", endpoint)?;
        validate_credential("recommendation.api_key", api_key)?;
        validate_non_empty_string("recommendation.model", model)?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            api_key: api_key.trim().to_string(),
            model: model.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            timeout: None,
            client: Client::new(),
        })
    }

    pub fn with_system_prompt(mut self, system_prompt: &str) -> Self {
        self.system_prompt = system_prompt.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: Option<u64>) -> Self {
        self.timeout = timeout_seconds.map(Duration::from_secs);
        self
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Self::new(
            config.recommendation_endpoint(),
            config.recommendation_api_key(),
            config.recommendation_model(),
        )?
        .with_timeout(config.recommendation_timeout_seconds());

        Ok(match config.system_prompt() {
            Some(system_prompt) => client.with_system_prompt(system_prompt),
            None => client,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

pub(crate) fn decode_completion(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| MujiError::decoding(RECOMMENDATION_SERVICE, e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or_else(|| MujiError::decoding(RECOMMENDATION_SERVICE, "response contains no choices"))
}

#[async_trait]
impl RecommendationClient for HttpRecommendationClient {
    async fn recommend(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        tracing::debug!(
            "Making recommendation request to: {} (model {})",
            self.endpoint,
            self.model
        );

        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body);

        let text = send_once(RECOMMENDATION_SERVICE, request, self.timeout).await?;
        decode_completion(&text)
    }
}
