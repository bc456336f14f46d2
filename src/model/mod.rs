//! Domain model: invoices, customers and the dashboard projections

pub mod customer;
pub mod dashboard;
pub mod invoice;

pub use customer::Customer;
pub use dashboard::{CardData, InvoiceTotals, LatestInvoice, Revenue};
pub use invoice::{Invoice, InvoiceChanges, InvoiceRow, InvoiceStatus, NewInvoice};
