//! Payment documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storekeep_core::{LocationId, OperationId, PartnerId, PaymentId, UserId};

use crate::document::{DataFormat, Document, DocumentKind, DocumentRef, Lifecycle};

/// Construction input for a [`Payment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayment {
    pub id: PaymentId,
    pub partner_id: PartnerId,
    pub partner_name: String,
    pub location_id: LocationId,
    pub user_id: UserId,
    pub date: DateTime<Utc>,
    /// Amount in smallest currency unit (e.g., cents).
    pub amount: i64,
    /// Partner balance after this payment; negative means the partner owes.
    pub balance: i64,
    /// Originating operation, when the payment settles one. `None` marks an
    /// advance.
    pub operation_id: Option<OperationId>,
    pub data_format: DataFormat,
}

/// A payment document. Used both standalone and as the finalization unit
/// for a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    id: PaymentId,
    partner_id: PartnerId,
    partner_name: String,
    location_id: LocationId,
    user_id: UserId,
    date: DateTime<Utc>,
    amount: i64,
    balance: i64,
    operation_id: Option<OperationId>,
    lifecycle: Lifecycle,
}

impl Payment {
    pub fn new(new: NewPayment) -> Self {
        Self {
            id: new.id,
            partner_id: new.partner_id,
            partner_name: new.partner_name,
            location_id: new.location_id,
            user_id: new.user_id,
            date: new.date,
            amount: new.amount,
            balance: new.balance,
            operation_id: new.operation_id,
            lifecycle: Lifecycle::with_format(new.data_format),
        }
    }

    pub fn id_typed(&self) -> PaymentId {
        self.id
    }

    pub fn partner_name(&self) -> &str {
        &self.partner_name
    }

    pub fn location_id(&self) -> LocationId {
        self.location_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn operation_id(&self) -> Option<OperationId> {
        self.operation_id
    }

    /// A payment with no originating operation is an advance.
    pub fn is_advance(&self) -> bool {
        self.operation_id.is_none()
    }
}

impl Document for Payment {
    type Id = PaymentId;

    fn id(&self) -> PaymentId {
        self.id
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Payment
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
        DocumentRef::new(DocumentKind::Payment, self.id.raw())
    }
}
