pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod money;
pub mod service;

pub use config::AppConfig;
pub use db::{create_pool, MemoryLookup, PgLookup};
pub use service::{AggregationService, InvoiceLookup, LookupError};
