use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::{ChatClient, CompletionRequest};
use crate::domain::DomainError;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini-2024-07-18";
const COMPLETIONS_PATH: &str = "/chat/completions";
/// Header understood by the Helicone logging proxy.
const PROXY_AUTH_HEADER: &str = "Helicone-Auth";

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Minimal subset of the chat completion response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for OpenAI-compatible `/chat/completions` endpoints.
///
/// The base URL is configurable so requests can go through a logging proxy
/// such as `https://oai.helicone.ai/v1`; when a proxy key is set it is sent as
/// `Helicone-Auth: Bearer <key>`.
///
/// With JSON mode on (the default) requests that expect JSON carry
/// `response_format: {"type": "json_object"}`. Turn it off for providers that
/// reject the field; replies are fence-stripped either way.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
    json_mode: bool,
    proxy_key: Option<String>,
}

impl OpenAiChatClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url,
            json_mode: true,
            proxy_key: None,
        }
    }

    pub fn with_json_mode(mut self, enabled: bool) -> Self {
        self.json_mode = enabled;
        self
    }

    pub fn with_proxy_key(mut self, key: impl Into<String>) -> Self {
        self.proxy_key = Some(key.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request<'a>(&'a self, request: &CompletionRequest<'a>) -> ApiRequest<'a> {
        let response_format = (self.json_mode && request.expect_json).then_some(ResponseFormat {
            kind: "json_object",
        });

        ApiRequest {
            model: &self.model,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: request.system,
                },
                ApiMessage {
                    role: "user",
                    content: request.user,
                },
            ],
            temperature: request.temperature,
            response_format,
        }
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, DomainError> {
        let body = self.build_request(&request);
        debug!("Requesting completion from {} with model {}", self.url, self.model);

        let mut http_request = self.client.post(&self.url).json(&body);
        if !self.api_key.is_empty() {
            http_request = http_request.bearer_auth(&self.api_key);
        }
        if let Some(key) = &self.proxy_key {
            http_request = http_request.header(PROXY_AUTH_HEADER, format!("Bearer {key}"));
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("completion request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Completion API returned {status}: {body}");
            return Err(DomainError::upstream(format!(
                "completion API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::upstream(format!("failed to decode completion response: {e}"))
        })?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| DomainError::upstream("completion returned no content"))
    }
}
