//! Issued invoices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storekeep_core::{InvoiceId, PartnerId};

use crate::document::{DataFormat, Document, DocumentKind, DocumentRef, Lifecycle};
use crate::number::DocumentNumber;

/// Construction input for an [`Invoice`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInvoice {
    pub id: InvoiceId,
    pub number: DocumentNumber,
    pub partner_id: PartnerId,
    pub partner_name: String,
    pub date: DateTime<Utc>,
    /// Amount in smallest currency unit (e.g., cents).
    pub amount: i64,
    pub data_format: DataFormat,
}

/// An issued invoice. Operations generated from it carry its display number
/// as their cross-reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    id: InvoiceId,
    number: DocumentNumber,
    partner_id: PartnerId,
    partner_name: String,
    date: DateTime<Utc>,
    amount: i64,
    lifecycle: Lifecycle,
}

impl Invoice {
    pub fn new(new: NewInvoice) -> Self {
        Self {
            id: new.id,
            number: new.number,
            partner_id: new.partner_id,
            partner_name: new.partner_name,
            date: new.date,
            amount: new.amount,
            lifecycle: Lifecycle::with_format(new.data_format),
        }
    }

    pub fn id_typed(&self) -> InvoiceId {
        self.id
    }

    pub fn number(&self) -> &DocumentNumber {
        &self.number
    }

    pub fn partner_name(&self) -> &str {
        &self.partner_name
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }
}

impl Document for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> InvoiceId {
        self.id
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Invoice
    }

    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn partner_id(&self) -> PartnerId {
        self.partner_id
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn document_ref(&self) -> DocumentRef {
        DocumentRef::new(DocumentKind::Invoice, self.id.raw())
    }
}
