use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::application::RequestCounter;
use crate::domain::DomainError;

pub const DEFAULT_COUNTER_KEY: &str = "total_requests";

/// Envelope returned by the Upstash REST API for every command.
#[derive(Deserialize)]
struct CommandReply {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

/// [`RequestCounter`] backed by a Redis database behind the Upstash REST API.
///
/// Commands are sent as `POST {url}/incr/{key}` and `GET {url}/get/{key}`
/// with a bearer token. `INCR` is atomic on the server, so concurrent
/// instances never lose an increment.
pub struct UpstashRequestCounter {
    client: reqwest::Client,
    base_url: Url,
    token: String,
    key: String,
}

impl UpstashRequestCounter {
    pub fn new(
        base_url: &str,
        token: impl Into<String>,
        key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DomainError::internal(format!("invalid counter store URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::internal(format!(
                "counter store URL {base_url} cannot carry a command path"
            )));
        }

        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url,
            token: token.into(),
            key: key.into(),
        })
    }

    fn command_url(&self, command: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(command).push(&self.key);
        }
        url
    }

    async fn send(&self, method: Method, command: &str) -> Result<Value, DomainError> {
        let url = self.command_url(command);
        debug!("Counter store {} {}", method, url.path());

        let response = self
            .client
            .request(method, url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| DomainError::store(format!("counter store request failed: {e}")))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let reply: Option<CommandReply> = serde_json::from_str(&body).ok();

        match reply {
            Some(CommandReply {
                error: Some(error), ..
            }) => Err(DomainError::store(format!(
                "counter store {command} failed ({status}): {error}"
            ))),
            Some(reply) if status.is_success() => Ok(reply.result),
            _ => Err(DomainError::store(format!(
                "counter store {command} returned {status}: {body}"
            ))),
        }
    }
}

/// Redis replies with integers for `INCR` but bulk strings for `GET`.
fn counter_value(result: &Value) -> Result<Option<u64>, DomainError> {
    match result {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| DomainError::store(format!("counter value {n} is not a count"))),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| DomainError::store(format!("counter value {s:?} is not a count"))),
        other => Err(DomainError::store(format!(
            "unexpected counter value {other}"
        ))),
    }
}

#[async_trait]
impl RequestCounter for UpstashRequestCounter {
    async fn increment(&self) -> Result<u64, DomainError> {
        let result = self.send(Method::POST, "incr").await?;
        counter_value(&result)?
            .ok_or_else(|| DomainError::store("counter store returned no value for INCR"))
    }

    async fn get(&self) -> Result<Option<u64>, DomainError> {
        let result = self.send(Method::GET, "get").await?;
        counter_value(&result)
    }
}
