use async_trait::async_trait;

use crate::domain::{DomainError, ProductInfo, ProductRef};

/// Read access to a marketplace's product catalogue.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch one product and normalize it.
    ///
    /// Transport failures, non-success statuses and undecodable bodies are
    /// reported as [`DomainError::Upstream`].
    async fn fetch(&self, product: &ProductRef) -> Result<ProductInfo, DomainError>;
}
