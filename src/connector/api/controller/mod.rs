pub mod fetch_product_controller;
pub mod generate_names_controller;
pub mod stats_controller;

pub use fetch_product_controller::FetchProductController;
pub use generate_names_controller::GenerateNamesController;
pub use stats_controller::StatsController;
