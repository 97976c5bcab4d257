//! Fiscal finalization of payments.
//!
//! Settles one or more payments through a fiscal device and/or a paper
//! payment-document printer, with a fixed ordering between the two and
//! hardware faults absorbed at this boundary.

pub mod device;
pub mod finalizer;
pub mod options;

pub use device::{FiscalDevice, HardwareError, PaymentDocumentPrinter, PaymentReceipt, PrintError};
pub use finalizer::{
    DocumentPrintOutcome, FinalizePolicy, FinalizeReport, FinalizeSurface, FiscalFinalizer,
    HardwareFaultReport,
};
pub use options::{FinalizeActions, FinalizeOptions};
