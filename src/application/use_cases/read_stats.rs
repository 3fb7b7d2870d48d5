use std::sync::Arc;

use tracing::warn;

use crate::application::RequestCounter;
use crate::domain::RequestStats;

/// Use case for reading the global generation counter.
///
/// Never fails: a missing key or an unreachable store reads as zero.
pub struct ReadStatsUseCase {
    counter: Arc<dyn RequestCounter>,
}

impl ReadStatsUseCase {
    pub fn new(counter: Arc<dyn RequestCounter>) -> Self {
        Self { counter }
    }

    pub async fn execute(&self) -> RequestStats {
        match self.counter.get().await {
            Ok(value) => RequestStats::new(value.unwrap_or(0)),
            Err(e) => {
                warn!("Failed to read request counter: {}. Reporting 0.", e);
                RequestStats::default()
            }
        }
    }
}
