use anyhow::Result;

use crate::domain::ProductRef;

use super::super::Container;

pub struct FetchProductController<'a> {
    container: &'a Container,
}

impl<'a> FetchProductController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Fetch a product by id or URL and render it as pretty JSON.
    pub async fn fetch(&self, product: String) -> Result<String> {
        let product_ref = ProductRef::parse(&product)?;
        let info = self
            .container
            .fetch_product_use_case()
            .execute(&product_ref)
            .await?;
        Ok(serde_json::to_string_pretty(&info)?)
    }
}
