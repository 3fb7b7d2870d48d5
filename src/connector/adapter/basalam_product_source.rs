use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::ProductSource;
use crate::domain::{AttributeGroup, CategoryPath, DomainError, ProductImage, ProductInfo, ProductRef};

pub const DEFAULT_BASE_URL: &str = "https://core.basalam.com";
const PRODUCTS_PATH: &str = "/v3/products";

/// Subset of the Basalam product payload we read. Every field is optional
/// upstream; defaults are applied in [`normalize`].
#[derive(Debug, Default, Deserialize)]
struct ApiProduct {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    photo: Option<ApiPhoto>,
    #[serde(default)]
    photos: Option<Vec<ApiPhoto>>,
    #[serde(default)]
    category: Option<ApiCategory>,
    #[serde(default)]
    attribute_groups: Option<Vec<AttributeGroup>>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiPhoto {
    #[serde(default)]
    original: Option<String>,
    #[serde(default)]
    lg: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiCategory {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    parent: Option<Box<ApiCategory>>,
}

impl ApiCategory {
    fn title(&self) -> String {
        self.title.clone().unwrap_or_default()
    }

    fn parent(&self) -> Option<&ApiCategory> {
        self.parent.as_deref()
    }
}

impl From<ApiPhoto> for ProductImage {
    fn from(photo: ApiPhoto) -> Self {
        ProductImage::new(
            photo.original.unwrap_or_default(),
            photo.lg.unwrap_or_default(),
        )
    }
}

/// Flatten the nested upstream record.
///
/// Images are the primary photo followed by the gallery. The category chain
/// `parent.parent / parent / self` becomes `main / sub / leaf`.
fn normalize(product: ApiProduct) -> ProductInfo {
    let category = product
        .category
        .map(|leaf| {
            let sub = leaf.parent();
            let main = sub.and_then(ApiCategory::parent);
            CategoryPath::new(
                main.map(ApiCategory::title).unwrap_or_default(),
                sub.map(ApiCategory::title).unwrap_or_default(),
                leaf.title(),
            )
        })
        .unwrap_or_default();

    let images = product
        .photo
        .into_iter()
        .chain(product.photos.unwrap_or_default())
        .map(ProductImage::from)
        .collect();

    ProductInfo::new(
        product.title.unwrap_or_default(),
        product.description.unwrap_or_default(),
        category,
    )
    .with_images(images)
    .with_attribute_groups(product.attribute_groups.unwrap_or_default())
}

/// [`ProductSource`] backed by the public Basalam product API.
pub struct BasalamProductSource {
    client: reqwest::Client,
    base_url: String,
}

impl BasalamProductSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    fn product_url(&self, product: &ProductRef) -> String {
        format!("{}{}/{}", self.base_url, PRODUCTS_PATH, product)
    }
}

#[async_trait]
impl ProductSource for BasalamProductSource {
    async fn fetch(&self, product: &ProductRef) -> Result<ProductInfo, DomainError> {
        let url = self.product_url(product);
        debug!("Fetching marketplace product from {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("marketplace request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Marketplace returned {status} for product {product}: {body}");
            return Err(DomainError::upstream(format!(
                "marketplace returned {status} for product {product}"
            )));
        }

        let api_product: ApiProduct = response.json().await.map_err(|e| {
            DomainError::upstream(format!("failed to decode marketplace product: {e}"))
        })?;

        Ok(normalize(api_product))
    }
}
