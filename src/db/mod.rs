pub mod memory;
pub mod pool;
pub mod queries;

pub use memory::{FailingLookup, MemoryLookup};
pub use pool::create_pool;
pub use queries::PgLookup;
