//! In-memory document repository.

use std::collections::HashMap;
use std::sync::RwLock;

use storekeep_core::{DateRange, InvoiceId, OperationId, PaymentId};
use storekeep_documents::{
    CrossReferenceSource, Document, DocumentNumber, DocumentRef, DocumentStore, Invoice, Operation,
    Payment, StoreError, StoreResult,
};
use storekeep_lifecycle::AnnulRepository;

/// In-memory store over all three document families.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    operations: RwLock<HashMap<OperationId, Operation>>,
    invoices: RwLock<HashMap<InvoiceId, Invoice>>,
    payments: RwLock<HashMap<PaymentId, Payment>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn list_from<K, D>(
        map: &RwLock<HashMap<K, D>>,
        range: &DateRange,
    ) -> StoreResult<Vec<D>>
    where
        D: Document + Clone,
    {
        let map = map
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(map
            .values()
            .filter(|d| range.contains(d.date()))
            .cloned()
            .collect())
    }

    fn get_from<K, D>(map: &RwLock<HashMap<K, D>>, id: &K) -> StoreResult<Option<D>>
    where
        K: Eq + core::hash::Hash,
        D: Clone,
    {
        let map = map
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(map.get(id).cloned())
    }

    fn save_into<K, D>(map: &RwLock<HashMap<K, D>>, key: K, doc: D) -> StoreResult<()>
    where
        K: Eq + core::hash::Hash,
    {
        let mut map = map
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        map.insert(key, doc);
        Ok(())
    }
}

impl DocumentStore<Operation> for InMemoryRepository {
    fn list(&self, range: &DateRange) -> StoreResult<Vec<Operation>> {
        Self::list_from(&self.operations, range)
    }

    fn get(&self, id: OperationId) -> StoreResult<Option<Operation>> {
        Self::get_from(&self.operations, &id)
    }

    fn save(&self, doc: Operation) -> StoreResult<()> {
        Self::save_into(&self.operations, doc.id_typed(), doc)
    }
}

impl DocumentStore<Invoice> for InMemoryRepository {
    fn list(&self, range: &DateRange) -> StoreResult<Vec<Invoice>> {
        Self::list_from(&self.invoices, range)
    }

    fn get(&self, id: InvoiceId) -> StoreResult<Option<Invoice>> {
        Self::get_from(&self.invoices, &id)
    }

    fn save(&self, doc: Invoice) -> StoreResult<()> {
        Self::save_into(&self.invoices, doc.id_typed(), doc)
    }
}

impl DocumentStore<Payment> for InMemoryRepository {
    fn list(&self, range: &DateRange) -> StoreResult<Vec<Payment>> {
        Self::list_from(&self.payments, range)
    }

    fn get(&self, id: PaymentId) -> StoreResult<Option<Payment>> {
        Self::get_from(&self.payments, &id)
    }

    fn save(&self, doc: Payment) -> StoreResult<()> {
        Self::save_into(&self.payments, doc.id_typed(), doc)
    }
}

impl CrossReferenceSource for InMemoryRepository {
    fn dependents_of(&self, number: &DocumentNumber) -> StoreResult<Vec<DocumentRef>> {
        let map = self
            .operations
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        let mut refs: Vec<DocumentRef> = map
            .values()
            .filter(|op| op.invoice_number() == Some(number))
            .map(|op| op.document_ref())
            .collect();
        refs.sort_by_key(|r| r.id);
        Ok(refs)
    }
}

impl AnnulRepository for InMemoryRepository {
    fn invoice(&self, id: InvoiceId) -> StoreResult<Option<Invoice>> {
        Self::get_from(&self.invoices, &id)
    }

    fn save_invoice(&self, invoice: Invoice) -> StoreResult<()> {
        Self::save_into(&self.invoices, invoice.id_typed(), invoice)
    }

    fn operation(&self, id: OperationId) -> StoreResult<Option<Operation>> {
        Self::get_from(&self.operations, &id)
    }

    fn save_operation(&self, operation: Operation) -> StoreResult<()> {
        Self::save_into(&self.operations, operation.id_typed(), operation)
    }
}
