mod chat_client;
mod product_source;
mod request_counter;

pub use chat_client::*;
pub use product_source::*;
pub use request_counter::*;
