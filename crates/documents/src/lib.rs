//! Document domain module.
//!
//! This crate contains the business documents of the back office (goods
//! movements, invoices, payments), their annullable lifecycle, and the
//! repository ports the rest of the workspace talks to, implemented purely
//! as deterministic domain logic (no IO, no storage).

pub mod document;
pub mod invoice;
pub mod number;
pub mod operation;
pub mod payment;
pub mod repository;

pub use document::{DataFormat, Document, DocumentKind, DocumentRef, DocumentStatus, Lifecycle};
pub use invoice::{Invoice, NewInvoice};
pub use number::DocumentNumber;
pub use operation::{NewOperation, Operation};
pub use payment::{NewPayment, Payment};
pub use repository::{CrossReferenceSource, DocumentStore, PaymentStore, StoreError, StoreResult};
