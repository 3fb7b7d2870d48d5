//! # Domain Layer
//!
//! Product records, naming preferences and replies, and the pure logic that
//! turns them into prompts and back. Independent of HTTP and storage.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
