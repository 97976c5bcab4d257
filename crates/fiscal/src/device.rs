//! Fiscal device and payment-document printer ports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storekeep_core::PaymentId;
use storekeep_documents::{Document, Payment};

use crate::options::FinalizeOptions;

/// Fault raised by the fiscal hardware.
#[derive(Debug, Error)]
pub enum HardwareError {
    /// Device offline or not answering.
    #[error("fiscal device unreachable: {0}")]
    Unreachable(String),

    /// Device answered but refused the request.
    #[error("fiscal device rejected the request: {0}")]
    Rejected(String),
}

/// The fiscal device surface.
pub trait FiscalDevice {
    fn finalize_operation(&mut self, options: &FinalizeOptions) -> Result<(), HardwareError>;
}

/// Paper payment-document artifact, one per payment. Pure value built from
/// the payment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payment_id: PaymentId,
    pub partner_name: String,
    pub date: DateTime<Utc>,
    /// Amount in smallest currency unit (e.g., cents).
    pub amount: i64,
    pub balance: i64,
}

impl PaymentReceipt {
    pub fn for_payment(payment: &Payment) -> Self {
        Self {
            payment_id: payment.id_typed(),
            partner_name: payment.partner_name().to_string(),
            date: payment.date(),
            amount: payment.amount(),
            balance: payment.balance(),
        }
    }
}

/// Failure previewing/printing a paper payment document.
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("printer unavailable: {0}")]
    Unavailable(String),

    #[error("preview failed: {0}")]
    Preview(String),
}

/// Paper printer/preview surface. Fire-and-forget from the core's
/// perspective.
pub trait PaymentDocumentPrinter {
    fn print_preview(&mut self, receipt: &PaymentReceipt) -> Result<(), PrintError>;
}
