pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ChatClient, CompletionRequest, FetchProductUseCase, GenerateNamesUseCase, ProductInput,
    ProductSource, ReadStatsUseCase, RequestCounter,
};

pub use connector::api::{app, Container, ContainerConfig, HttpServer, Router};
pub use connector::{
    BasalamProductSource, InMemoryRequestCounter, OpenAiChatClient, UpstashRequestCounter,
};

pub use domain::{
    CategoryPath, DomainError, NameLength, NamingReply, NamingResult, Preferences, ProductDraft,
    ProductImage, ProductInfo, ProductRef, RequestStats,
};
