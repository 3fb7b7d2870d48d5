use anyhow::Result;

use super::super::Container;

pub struct StatsController<'a> {
    container: &'a Container,
}

impl<'a> StatsController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn stats(&self) -> Result<String> {
        let stats = self.container.stats_use_case().execute().await;
        Ok(format!("Total requests: {}", stats.total_requests))
    }
}
