//! Pure naming logic: prompt rendering and reply parsing.

mod prompt;
mod reply;

pub use prompt::*;
pub use reply::*;
