//! Payment finalization.

use tracing::{info, warn};

use storekeep_core::{DomainError, DomainResult, PaymentId};
use storekeep_documents::{Document, Operation, Payment};

use crate::device::{
    FiscalDevice, HardwareError, PaymentDocumentPrinter, PaymentReceipt, PrintError,
};
use crate::options::{FinalizeActions, FinalizeOptions};

/// Finalization policy flags, read from externally supplied configuration.
pub trait FinalizePolicy {
    /// Emit fiscal cash receipts on the device.
    fn fiscal_receipts_enabled(&self) -> bool;

    /// Produce a paper payment document per payment.
    fn payment_documents_enabled(&self) -> bool;
}

/// User-facing sink for fiscal hardware faults absorbed at this boundary.
pub trait HardwareFaultReport {
    fn hardware_fault(&mut self, error: &HardwareError);
}

/// Visibility hook for the invoking dialog, sequenced before the paper
/// step. `()` is the no-op surface.
pub trait FinalizeSurface {
    fn hide(&mut self);
}

impl FinalizeSurface for () {
    fn hide(&mut self) {}
}

/// Outcome of one paper payment document.
#[derive(Debug)]
pub enum DocumentPrintOutcome {
    Printed(PaymentId),
    /// Preview failed; the remaining documents still printed.
    Failed {
        payment_id: PaymentId,
        error: PrintError,
    },
}

/// What one finalization pass actually did.
#[derive(Debug, Default)]
pub struct FinalizeReport {
    /// Fiscal receipt emitted successfully.
    pub fiscal_printed: bool,
    /// Per-payment paper-document outcomes, in payment order.
    pub documents: Vec<DocumentPrintOutcome>,
}

impl FinalizeReport {
    pub fn printed_documents(&self) -> usize {
        self.documents
            .iter()
            .filter(|o| matches!(o, DocumentPrintOutcome::Printed(_)))
            .count()
    }
}

/// Settles payments through the fiscal device and the paper printer.
///
/// Ordering guarantee: when fiscal printing is enabled, the fiscal receipt
/// is emitted strictly before any paper payment document.
pub struct FiscalFinalizer<'a, Dev, Prn, Pol, Rep, Sur> {
    device: &'a mut Dev,
    printer: &'a mut Prn,
    policy: &'a Pol,
    faults: &'a mut Rep,
    surface: &'a mut Sur,
}

impl<'a, Dev, Prn, Pol, Rep, Sur> FiscalFinalizer<'a, Dev, Prn, Pol, Rep, Sur>
where
    Dev: FiscalDevice,
    Prn: PaymentDocumentPrinter,
    Pol: FinalizePolicy,
    Rep: HardwareFaultReport,
    Sur: FinalizeSurface,
{
    pub fn new(
        device: &'a mut Dev,
        printer: &'a mut Prn,
        policy: &'a Pol,
        faults: &'a mut Rep,
        surface: &'a mut Sur,
    ) -> Self {
        Self {
            device,
            printer,
            policy,
            faults,
            surface,
        }
    }

    /// Finalize a non-empty list of payments, optionally tied to a sale.
    ///
    /// A device fault is reported through the fault sink and does not block
    /// the paper step; paper documents are best-effort per item.
    pub fn print_payments(
        &mut self,
        payments: &[Payment],
        operation: Option<&Operation>,
    ) -> DomainResult<FinalizeReport> {
        if payments.is_empty() {
            return Err(DomainError::validation("payment list is empty"));
        }

        let mut report = FinalizeReport::default();

        if self.policy.fiscal_receipts_enabled() {
            let sale = operation
                .cloned()
                .unwrap_or_else(|| fiscal_context_sale(&payments[0]));
            let options = FinalizeOptions {
                sale,
                payments: payments.to_vec(),
                actions: FinalizeActions::PRINT_CASH_RECEIPT | FinalizeActions::COLLECT_SALE_DATA,
            };
            match self.device.finalize_operation(&options) {
                Ok(()) => {
                    report.fiscal_printed = true;
                    info!(payments = payments.len(), "fiscal receipt emitted");
                }
                Err(error) => {
                    // Absorbed here; the paper step still runs.
                    warn!(%error, "fiscal device fault during finalization");
                    self.faults.hardware_fault(&error);
                }
            }
        }

        // At least one payment is being finalized, so the invoking dialog
        // goes away before any paper document is produced.
        self.surface.hide();

        if self.policy.payment_documents_enabled() {
            for payment in payments {
                let receipt = PaymentReceipt::for_payment(payment);
                match self.printer.print_preview(&receipt) {
                    Ok(()) => {
                        report
                            .documents
                            .push(DocumentPrintOutcome::Printed(payment.id_typed()));
                    }
                    Err(error) => {
                        warn!(payment = %payment.id_typed(), %error, "payment document preview failed");
                        report.documents.push(DocumentPrintOutcome::Failed {
                            payment_id: payment.id_typed(),
                            error,
                        });
                    }
                }
            }
        }

        Ok(report)
    }
}

/// Synthetic sale carrying the first payment's partner, location and user
/// into the fiscal print path. Never persisted.
fn fiscal_context_sale(payment: &Payment) -> Operation {
    Operation::synthetic_sale(
        payment.partner_id(),
        payment.partner_name(),
        payment.location_id(),
        payment.user_id(),
        payment.date(),
    )
}
