use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::{ChatClient, CompletionRequest, ProductSource, RequestCounter};
use crate::domain::{
    parse_naming_reply, render_naming_prompt, DomainError, NamingReply, Preferences,
    ProductDraft, ProductInfo, ProductRef, NAMING_TEMPERATURE, SYSTEM_PROMPT,
};

/// Where the product to name comes from.
#[derive(Debug, Clone)]
pub enum ProductInput {
    /// Product data entered by the seller (or echoed back from a fetch).
    Draft(ProductDraft),
    /// A marketplace product to fetch first.
    Reference(ProductRef),
}

/// Use case for generating name suggestions for one product.
pub struct GenerateNamesUseCase {
    product_source: Arc<dyn ProductSource>,
    chat_client: Arc<dyn ChatClient>,
    counter: Arc<dyn RequestCounter>,
}

impl GenerateNamesUseCase {
    pub fn new(
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

    pub async fn execute(
        &self,
        input: ProductInput,
        preferences: Preferences,
    ) -> Result<NamingReply, DomainError> {
        let product = match input {
            ProductInput::Draft(draft) => draft.into_product()?,
            ProductInput::Reference(product_ref) => {
                let product = self.product_source.fetch(&product_ref).await?;
                product.ensure_complete()?;
                product
            }
        };

        self.generate(&product, &preferences).await
    }

    /// Prompt the model for one validated product, parse its reply, then bump
    /// the shared counter.
    pub async fn generate(
        &self,
        product: &ProductInfo,
        preferences: &Preferences,
    ) -> Result<NamingReply, DomainError> {
        let start_time = Instant::now();
        let prompt = render_naming_prompt(product, preferences);
        debug!("Naming prompt for \"{}\":\n{}", product.title, prompt);

        let raw = self
            .chat_client
            .complete(CompletionRequest {
                system: SYSTEM_PROMPT,
                user: &prompt,
                temperature: NAMING_TEMPERATURE,
                expect_json: true,
            })
            .await?;

        let reply = parse_naming_reply(&raw).inspect_err(|_| {
            warn!("Model reply could not be parsed as JSON: {}", raw);
        })?;

        // The counter only tracks successful generations and must never fail one.
        match self.counter.increment().await {
            Ok(total) => debug!("Request counter is now {}", total),
            Err(e) => warn!("Failed to increment request counter: {}", e),
        }

        info!(
            "Generated {} name suggestions for \"{}\" in {:.2?}",
            reply.suggestion_count(),
            product.title,
            start_time.elapsed()
        );

        Ok(reply)
    }
}
