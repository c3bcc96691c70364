pub mod config;
pub mod fetcher;
pub mod observability;
pub mod pipeline;
pub mod posts;
pub mod processor;
pub mod store;
