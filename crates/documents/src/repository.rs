//! Repository ports over the opaque document store.
//!
//! The store owns the canonical copy of every document; the core issues
//! read and mutate calls and never implements transactions across them.

use thiserror::Error;

use storekeep_core::DateRange;

use crate::document::{Document, DocumentRef};
use crate::number::DocumentNumber;
use crate::payment::Payment;

/// Result type for repository calls.
pub type StoreResult<T> = Result<T, StoreError>;

/// Repository-level failure. Surfaced to the caller untouched; never
/// retried by the core.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected a mutation (annul/save).
    #[error("store rejected mutation: {0}")]
    Rejected(String),

    /// The store could not be reached or its state is unusable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Store surface for one document kind family.
///
/// `list` feeds selection; `save` carries annul mutations back. Listing
/// honors the inclusive, independently-open date range.
pub trait DocumentStore<D: Document>: Send + Sync {
    fn list(&self, range: &DateRange) -> StoreResult<Vec<D>>;
    fn get(&self, id: D::Id) -> StoreResult<Option<D>>;
    fn save(&self, doc: D) -> StoreResult<()>;
}

/// Payment-specific store surface.
pub trait PaymentStore: DocumentStore<Payment> {
    /// Advance payments (no originating operation) within the range.
    fn advances(&self, range: &DateRange) -> StoreResult<Vec<Payment>> {
        Ok(self
            .list(range)?
            .into_iter()
            .filter(|p| p.is_advance())
            .collect())
    }
}

impl<S> PaymentStore for S where S: DocumentStore<Payment> {}

/// Cross-reference lookup: documents generated from an issued invoice's
/// display number.
pub trait CrossReferenceSource: Send + Sync {
    fn dependents_of(&self, number: &DocumentNumber) -> StoreResult<Vec<DocumentRef>>;
}
