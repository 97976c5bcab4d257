//! Annulment coordinator.

use thiserror::Error;
use tracing::{info, warn};

use storekeep_core::{DomainError, InvoiceId, OperationId};
use storekeep_documents::{
    CrossReferenceSource, Document, DocumentKind, DocumentRef, DocumentStore, Invoice, Operation,
    StoreError, StoreResult,
};

/// Failure of an annul attempt.
#[derive(Debug, Error)]
pub enum AnnulError {
    /// The document refused the transition (already annulled, incompatible
    /// format, or missing). No state change happened.
    #[error(transparent)]
    Refused(#[from] DomainError),

    /// The repository rejected the read or the mutation. Surfaced to the
    /// caller; never retried here.
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type AnnulResult<T> = Result<T, AnnulError>;

/// Simple annul: load, transition, persist.
///
/// Returns the annulled document. A missing id is a refusal, not a panic.
pub fn annul_document<D, S>(store: &S, id: D::Id) -> AnnulResult<D>
where
    D: Document + Clone,
    S: DocumentStore<D>,
{
    let mut doc = store.get(id)?.ok_or(DomainError::NotFound)?;
    doc.annul()?;
    store.save(doc.clone())?;
    info!(document = %doc.document_ref(), "document annulled");
    Ok(doc)
}

/// Coordinator's narrow load/save surface over invoices and their
/// dependent operations. Dependents resolve through the
/// [`CrossReferenceSource`] supertrait.
pub trait AnnulRepository: CrossReferenceSource {
    fn invoice(&self, id: InvoiceId) -> StoreResult<Option<Invoice>>;
    fn save_invoice(&self, invoice: Invoice) -> StoreResult<()>;
    fn operation(&self, id: OperationId) -> StoreResult<Option<Operation>>;
    fn save_operation(&self, operation: Operation) -> StoreResult<()>;
}

/// Cascade policy flags, read from externally supplied configuration.
pub trait CascadePolicy {
    /// Invoices are auto-created on sale, so dependent operations may exist
    /// for an issued invoice.
    fn auto_invoice_on_sale(&self) -> bool;
}

/// Blocking user confirmation gating a cascade. Asked once, before any
/// dependent is touched.
pub trait CascadeConfirmation {
    fn confirm_cascade(&mut self, invoice: &Invoice) -> bool;
}

/// Outcome of one dependent within a cascade.
#[derive(Debug)]
pub enum DependentOutcome {
    /// Dependent resolved and was annulled.
    Annulled(DocumentRef),
    /// Dependent no longer resolves; skipped, not an error.
    Vanished(DocumentRef),
    /// Dependent failed to annul; the cascade continued past it.
    Failed {
        reference: DocumentRef,
        error: AnnulError,
    },
}

impl DependentOutcome {
    pub fn reference(&self) -> DocumentRef {
        match self {
            DependentOutcome::Annulled(r) | DependentOutcome::Vanished(r) => *r,
            DependentOutcome::Failed { reference, .. } => *reference,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, DependentOutcome::Failed { .. })
    }
}

/// Per-item result of a cascading annulment. The cascade is best-effort:
/// no transaction spans it, and one failing dependent never blocks the
/// rest.
#[derive(Debug)]
pub struct CascadeReport {
    pub primary: DocumentRef,
    /// Whether dependents were resolved at all (policy on and confirmed).
    pub cascaded: bool,
    pub dependents: Vec<DependentOutcome>,
}

impl CascadeReport {
    pub fn annulled_dependents(&self) -> usize {
        self.dependents
            .iter()
            .filter(|o| matches!(o, DependentOutcome::Annulled(_)))
            .count()
    }

    /// Aggregate view over per-item failures, for callers that report a
    /// single warning.
    pub fn failures(&self) -> impl Iterator<Item = &DependentOutcome> {
        self.dependents.iter().filter(|o| o.is_failure())
    }
}

/// Executes annulment against the repository, cascading to dependents for
/// invoices when policy and the user allow it.
pub struct AnnulmentCoordinator<'a, R, P> {
    repo: &'a R,
    policy: &'a P,
}

impl<'a, R, P> AnnulmentCoordinator<'a, R, P>
where
    R: AnnulRepository,
    P: CascadePolicy,
{
    pub fn new(repo: &'a R, policy: &'a P) -> Self {
        Self { repo, policy }
    }

    /// Annul an issued invoice, cascading to the operations generated from
    /// it when the auto-invoice policy is on and the user confirms.
    ///
    /// The primary is checked and annulled first; declining the prompt (or
    /// the policy being off) annuls only the primary. Dependent outcomes
    /// are reported per item.
    pub fn annul_invoice<C>(&self, id: InvoiceId, confirmation: &mut C) -> AnnulResult<CascadeReport>
    where
        C: CascadeConfirmation,
    {
        let mut invoice = self.repo.invoice(id)?.ok_or(DomainError::NotFound)?;

        // Refuse before prompting; a legacy or annulled invoice never
        // reaches the user.
        invoice.lifecycle().ensure_annullable(DocumentKind::Invoice)?;

        let cascade =
            self.policy.auto_invoice_on_sale() && confirmation.confirm_cascade(&invoice);

        invoice.annul()?;
        self.repo.save_invoice(invoice.clone())?;
        info!(invoice = %invoice.number(), cascade, "invoice annulled");

        let mut report = CascadeReport {
            primary: invoice.document_ref(),
            cascaded: cascade,
            dependents: Vec::new(),
        };

        if cascade {
            for reference in self.repo.dependents_of(invoice.number())? {
                report.dependents.push(self.annul_dependent(reference));
            }
        }

        Ok(report)
    }

    fn annul_dependent(&self, reference: DocumentRef) -> DependentOutcome {
        // Invoices only generate goods movements; anything else no longer
        // resolves to an annullable dependent.
        if !reference.kind.is_goods_movement() {
            return DependentOutcome::Vanished(reference);
        }

        match self.repo.operation(OperationId::new(reference.id)) {
            Ok(Some(mut operation)) => {
                let saved = operation
                    .annul()
                    .map_err(AnnulError::from)
                    .and_then(|()| self.repo.save_operation(operation).map_err(AnnulError::from));
                match saved {
                    Ok(()) => DependentOutcome::Annulled(reference),
                    Err(error) => {
                        warn!(dependent = %reference, %error, "dependent annulment failed");
                        DependentOutcome::Failed { reference, error }
                    }
                }
            }
            Ok(None) => DependentOutcome::Vanished(reference),
            Err(error) => {
                let error = AnnulError::from(error);
                warn!(dependent = %reference, %error, "dependent lookup failed");
                DependentOutcome::Failed { reference, error }
            }
        }
    }
}
