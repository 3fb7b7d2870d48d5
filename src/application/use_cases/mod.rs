mod fetch_product;
mod generate_names;
mod read_stats;

pub use fetch_product::*;
pub use generate_names::*;
pub use read_stats::*;
