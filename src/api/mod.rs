pub mod export;
pub mod handlers;

pub use handlers::{aggregate_final, export_final_csv, health_check};
