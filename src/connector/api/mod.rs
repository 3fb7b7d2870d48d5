pub mod container;
pub mod controller;
pub mod http;
pub mod router;

pub use container::{Container, ContainerConfig};
pub use http::{app, HttpServer};
pub use router::Router;
