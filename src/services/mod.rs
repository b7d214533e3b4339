pub mod brave_client;
pub mod content_extractor;
pub mod crawler;
pub mod features;
pub mod openai_client;
pub mod page_checker;
pub mod providers;
pub mod query_engine;
pub mod response_cache;
pub mod robots;
pub mod scoring;
pub mod sitemap_resolver;
pub mod url_selector;
pub mod worker;

pub use brave_client::BraveClient;
pub use crawler::Crawler;
pub use openai_client::OpenaiClient;
pub use query_engine::QueryEngine;
pub use worker::job_worker_handler;
