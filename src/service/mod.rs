pub mod aggregator;
pub mod lookup;

pub use aggregator::AggregationService;
pub use lookup::{InvoiceLookup, LookupError};
