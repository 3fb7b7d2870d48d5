use anyhow::Result;

use crate::cli::{preferences_from_flags, Commands};

use super::container::Container;
use super::controller::{FetchProductController, GenerateNamesController, StatsController};

pub struct Router<'a> {
    fetch_product_controller: FetchProductController<'a>,
    generate_names_controller: GenerateNamesController<'a>,
    stats_controller: StatsController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            fetch_product_controller: FetchProductController::new(container),
            generate_names_controller: GenerateNamesController::new(container),
            stats_controller: StatsController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Fetch { product } => self.fetch_product_controller.fetch(product).await,
            Commands::Generate {
                product,
                no_brand,
                no_category,
                no_features,
                length,
            } => {
                let preferences = preferences_from_flags(no_brand, no_category, no_features, length);
                self.generate_names_controller
                    .generate(product, preferences)
                    .await
            }
            Commands::Stats => self.stats_controller.stats().await,
            Commands::Serve { .. } => unreachable!("Serve command is handled separately in main"),
        }
    }
}
