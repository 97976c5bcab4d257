//! Document annulment coordination.
//!
//! Simple annulment for any document kind, and the cascading variant for
//! issued invoices whose dependent operations were auto-created on sale.

pub mod annulment;

pub use annulment::{
    AnnulError, AnnulResult, AnnulRepository, AnnulmentCoordinator, CascadeConfirmation,
    CascadePolicy, CascadeReport, DependentOutcome, annul_document,
};
