//! # Application Layer
//!
//! Use cases and the ports they depend on: a product source, a chat client
//! and a request counter.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
