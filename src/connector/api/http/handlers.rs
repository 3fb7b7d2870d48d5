use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::header::{CACHE_CONTROL, PRAGMA};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::application::ProductInput;
use crate::connector::api::Container;
use crate::domain::{
    DomainError, Preferences, ProductDraft, ProductInfo, ProductRef, MISSING_PRODUCT_FIELDS,
    MISSING_PRODUCT_REF,
};

use super::error::{ApiError, FETCH_FAILED, GENERATE_FAILED, INVALID_BODY};

const NO_STORE: &str = "no-store, no-cache, must-revalidate, max-age=0";

#[derive(Debug, Default, Deserialize)]
pub struct FetchProductParams {
    pub id: Option<String>,
    pub url: Option<String>,
}

/// Body of `POST /api/generate-names`.
///
/// `productInfo` is normally present. Without it, `productId` or
/// `productUrl` names a marketplace product to fetch first.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateNamesBody {
    #[serde(default)]
    pub product_info: Option<ProductDraft>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default)]
    pub preferences: Preferences,
}

impl GenerateNamesBody {
    pub fn into_input(self) -> Result<(ProductInput, Preferences), DomainError> {
        let input = match self.product_info {
            Some(draft) => ProductInput::Draft(draft),
            None if self.product_id.is_some() || self.product_url.is_some() => {
                ProductInput::Reference(ProductRef::resolve(
                    self.product_id.as_deref(),
                    self.product_url.as_deref(),
                )?)
            }
            None => return Err(DomainError::validation(MISSING_PRODUCT_FIELDS)),
        };
        Ok((input, self.preferences))
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn fetch_product(
    State(container): State<Arc<Container>>,
    params: Result<Query<FetchProductParams>, QueryRejection>,
) -> Result<Json<ProductInfo>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        debug!("Rejected fetch-product query: {}", rejection.body_text());
        ApiError::bad_request(MISSING_PRODUCT_REF)
    })?;

    container
        .fetch_product_use_case()
        .execute_for_params(params.id.as_deref(), params.url.as_deref())
        .await
        .map(Json)
        .map_err(|e| ApiError::from_domain(e, FETCH_FAILED))
}

pub async fn generate_names(
    State(container): State<Arc<Container>>,
    body: Result<Json<GenerateNamesBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        debug!("Rejected generate-names body: {}", rejection.body_text());
        ApiError::bad_request(INVALID_BODY)
    })?;

    let (input, preferences) = body
        .into_input()
        .map_err(|e| ApiError::from_domain(e, GENERATE_FAILED))?;

    container
        .generate_names_use_case()
        .execute(input, preferences)
        .await
        .map(|reply| Json(reply.into_json()))
        .map_err(|e| ApiError::from_domain(e, GENERATE_FAILED))
}

pub async fn stats(State(container): State<Arc<Container>>) -> impl IntoResponse {
    let stats = container.stats_use_case().execute().await;
    ([(CACHE_CONTROL, NO_STORE), (PRAGMA, "no-cache")], Json(stats))
}
