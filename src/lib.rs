pub mod dates;
pub mod debug;
pub mod error;
pub mod export;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod orchestrator;
pub mod page;
pub mod paginator;
