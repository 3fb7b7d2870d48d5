mod naming;
mod preferences;
mod product;
mod product_ref;
mod stats;

pub use naming::*;
pub use preferences::*;
pub use product::*;
pub use product_ref::*;
pub use stats::*;
