mod basalam_product_source;
mod in_memory_request_counter;
mod openai_chat_client;
mod upstash_request_counter;

pub use basalam_product_source::{BasalamProductSource, DEFAULT_BASE_URL as DEFAULT_MARKETPLACE_URL};
pub use in_memory_request_counter::*;
pub use openai_chat_client::{
    OpenAiChatClient, DEFAULT_BASE_URL as DEFAULT_COMPLETION_URL, DEFAULT_MODEL,
};
pub use upstash_request_counter::*;
