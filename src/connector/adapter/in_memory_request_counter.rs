use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::RequestCounter;
use crate::domain::DomainError;

/// Process-local counter for development and tests.
///
/// Each server instance holds its own value, so totals are not shared across
/// replicas and are lost on restart.
pub struct InMemoryRequestCounter {
    value: Mutex<Option<u64>>,
}

impl InMemoryRequestCounter {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    pub fn starting_at(value: u64) -> Self {
        Self {
            value: Mutex::new(Some(value)),
        }
    }
}

impl Default for InMemoryRequestCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RequestCounter for InMemoryRequestCounter {
    async fn increment(&self) -> Result<u64, DomainError> {
        let mut value = self.value.lock().await;
        let next = value.unwrap_or(0) + 1;
        *value = Some(next);
        Ok(next)
    }

    async fn get(&self) -> Result<Option<u64>, DomainError> {
        Ok(*self.value.lock().await)
    }
}
