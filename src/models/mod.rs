pub mod down_payment;
pub mod invoice;
pub mod reimbursement;
pub mod result;

pub use down_payment::{DownPayment, DpStatus};
pub use invoice::{Invoice, InvoiceLineItem};
pub use reimbursement::Reimbursement;
pub use result::{AggregationResult, CombinedLineItem, DpItem, LineItemSource};
