//! # Connector Layer
//!
//! External integrations implementing application ports:
//! - Marketplace product source (Basalam REST API)
//! - Chat completions (OpenAI-compatible API)
//! - Request counter (Upstash REST, or in-process for development)
//!
//! plus the inbound surfaces: the HTTP server and the CLI controllers.

pub mod adapter;
pub mod api;

pub use adapter::*;
