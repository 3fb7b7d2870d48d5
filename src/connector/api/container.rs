use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::application::{
    ChatClient, FetchProductUseCase, GenerateNamesUseCase, ProductSource, ReadStatsUseCase,
    RequestCounter,
};
use crate::connector::adapter::{
    BasalamProductSource, InMemoryRequestCounter, OpenAiChatClient, UpstashRequestCounter,
    DEFAULT_COMPLETION_URL, DEFAULT_COUNTER_KEY, DEFAULT_MARKETPLACE_URL, DEFAULT_MODEL,
};

pub struct ContainerConfig {
    pub marketplace_base_url: String,
    pub completion_base_url: String,
    pub completion_api_key: String,
    pub completion_model: String,
    /// Key for the completion logging proxy, sent as `Helicone-Auth`.
    pub proxy_api_key: Option<String>,
    /// Ask the completion API for `json_object` replies.
    pub json_mode: bool,
    /// Upstash REST endpoint. `None` selects the in-process counter.
    pub counter_url: Option<String>,
    pub counter_token: String,
    pub counter_key: String,
    /// Applies to every outbound HTTP call.
    pub http_timeout: Duration,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            marketplace_base_url: DEFAULT_MARKETPLACE_URL.to_string(),
            completion_base_url: DEFAULT_COMPLETION_URL.to_string(),
            completion_api_key: String::new(),
            completion_model: DEFAULT_MODEL.to_string(),
            proxy_api_key: None,
            json_mode: true,
            counter_url: None,
            counter_token: String::new(),
            counter_key: DEFAULT_COUNTER_KEY.to_string(),
            http_timeout: Duration::from_secs(60),
        }
    }
}

/// Wires adapters to the use cases. Cheap to share behind an `Arc`.
pub struct Container {
    product_source: Arc<dyn ProductSource>,
    chat_client: Arc<dyn ChatClient>,
    counter: Arc<dyn RequestCounter>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let product_source: Arc<dyn ProductSource> = Arc::new(BasalamProductSource::new(
            &config.marketplace_base_url,
            config.http_timeout,
        ));
        debug!("Using marketplace API at {}", config.marketplace_base_url);

        if config.completion_api_key.is_empty() {
            warn!("No completion API key configured; name generation requests will likely be rejected.");
        }
        let mut chat_client = OpenAiChatClient::new(
            config.completion_api_key,
            config.completion_model,
            &config.completion_base_url,
            config.http_timeout,
        )
        .with_json_mode(config.json_mode);
        if let Some(key) = config.proxy_api_key.filter(|k| !k.is_empty()) {
            chat_client = chat_client.with_proxy_key(key);
        }
        debug!(
            "Using completion API at {} with model {} (json_mode={})",
            config.completion_base_url,
            chat_client.model(),
            config.json_mode
        );

        let counter: Arc<dyn RequestCounter> = match config.counter_url.as_deref() {
            Some(url) if !url.is_empty() => {
                debug!("Using Upstash counter store at {} key {}", url, config.counter_key);
                Arc::new(
                    UpstashRequestCounter::new(
                        url,
                        config.counter_token,
                        config.counter_key,
                        config.http_timeout,
                    )
                    .context("Failed to configure counter store")?,
                )
            }
            _ => {
                warn!(
                    "No counter store configured. Falling back to an in-process counter; totals are per instance and reset on restart."
                );
                Arc::new(InMemoryRequestCounter::new())
            }
        };

        Ok(Self::from_parts(product_source, Arc::new(chat_client), counter))
    }

    /// Assemble from already-built adapters.
    pub fn from_parts(
        product_source: Arc<dyn ProductSource>,
        chat_client: Arc<dyn ChatClient>,
        counter: Arc<dyn RequestCounter>,
    ) -> Self {
        Self {
            product_source,
            chat_client,
            counter,
        }
    }

    pub fn fetch_product_use_case(&self) -> FetchProductUseCase {
        FetchProductUseCase::new(Arc::clone(&self.product_source))
    }

    pub fn generate_names_use_case(&self) -> GenerateNamesUseCase {
        GenerateNamesUseCase::new(
            Arc::clone(&self.product_source),
            Arc::clone(&self.chat_client),
            Arc::clone(&self.counter),
        )
    }

    pub fn stats_use_case(&self) -> ReadStatsUseCase {
        ReadStatsUseCase::new(Arc::clone(&self.counter))
    }
}
