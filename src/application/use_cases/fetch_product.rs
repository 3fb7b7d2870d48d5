use std::sync::Arc;

use tracing::info;

use crate::application::ProductSource;
use crate::domain::{DomainError, ProductInfo, ProductRef};

/// Use case for looking up and normalizing a single marketplace product.
pub struct FetchProductUseCase {
    product_source: Arc<dyn ProductSource>,
}

impl FetchProductUseCase {
    pub fn new(product_source: Arc<dyn ProductSource>) -> Self {
        Self { product_source }
    }

    pub async fn execute(&self, product: &ProductRef) -> Result<ProductInfo, DomainError> {
        let info = self.product_source.fetch(product).await?;
        info!(
            "Fetched product {}: \"{}\" ({} images, {} attribute groups)",
            product,
            info.title,
            info.images.len(),
            info.attribute_groups.len()
        );
        Ok(info)
    }

    /// Resolve `id` / `url` request parameters, then fetch.
    pub async fn execute_for_params(
        &self,
        id: Option<&str>,
        url: Option<&str>,
    ) -> Result<ProductInfo, DomainError> {
        let product = ProductRef::resolve(id, url)?;
        self.execute(&product).await
    }
}
