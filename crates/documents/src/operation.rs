//! Goods-movement operations (sale, purchase, stock-taking, transfer, waste).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storekeep_core::{DomainError, DomainResult, LocationId, OperationId, PartnerId, UserId};

use crate::document::{DataFormat, Document, DocumentKind, DocumentRef, Lifecycle};
use crate::number::DocumentNumber;

/// Construction input for an [`Operation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOperation {
    pub id: OperationId,
    pub kind: DocumentKind,
    pub partner_id: PartnerId,
    pub partner_name: String,
    pub location_id: LocationId,
    pub user_id: UserId,
    pub date: DateTime<Utc>,
    /// Total in smallest currency unit (e.g., cents).
    pub total_amount: i64,
    pub invoice_number: Option<DocumentNumber>,
    pub data_format: DataFormat,
}

/// A goods-movement document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    id: OperationId,
    kind: DocumentKind,
    partner_id: PartnerId,
    partner_name: String,
    location_id: LocationId,
    user_id: UserId,
    date: DateTime<Utc>,
    total_amount: i64,
    invoice_number: Option<DocumentNumber>,
    lifecycle: Lifecycle,
}

impl Operation {
    pub fn new(new: NewOperation) -> DomainResult<Self> {
        if !new.kind.is_goods_movement() {
            return Err(DomainError::validation(format!(
                "{} is not a goods-movement kind",
                new.kind
            )));
        }
        Ok(Self {
            id: new.id,
            kind: new.kind,
            partner_id: new.partner_id,
            partner_name: new.partner_name,
            location_id: new.location_id,
            user_id: new.user_id,
            date: new.date,
            total_amount: new.total_amount,
            invoice_number: new.invoice_number,
            lifecycle: Lifecycle::with_format(new.data_format),
        })
    }

    /// Synthetic sale carrying partner/location/user context into a fiscal
    /// print when no real operation applies. Never persisted; has no
    /// repository identity.
    pub fn synthetic_sale(
        partner_id: PartnerId,
        partner_name: impl Into<String>,
        location_id: LocationId,
        user_id: UserId,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: OperationId::new(0),
            kind: DocumentKind::Sale,
            partner_id,
            partner_name: partner_name.into(),
            location_id,
            user_id,
            date,
            total_amount: 0,
            invoice_number: None,
            lifecycle: Lifecycle::active(),
        }
    }

    pub fn id_typed(&self) -> OperationId {
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

    pub fn total_amount(&self) -> i64 {
        self.total_amount
    }

    pub fn invoice_number(&self) -> Option<&DocumentNumber> {
        self.invoice_number.as_ref()
    }

    /// Stamp the issued invoice's display number on this operation.
    /// Refused for annulled or legacy-format operations.
    pub fn assign_invoice_number(&mut self, number: DocumentNumber) -> DomainResult<()> {
        self.ensure_editable()?;
        self.invoice_number = Some(number);
        Ok(())
    }
}

impl Document for Operation {
    type Id = OperationId;

    fn id(&self) -> OperationId {
        self.id
    }

    fn kind(&self) -> DocumentKind {
        self.kind
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
        DocumentRef::new(self.kind, self.id.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap()
    }

    fn new_sale(id: i64) -> NewOperation {
        NewOperation {
            id: OperationId::new(id),
            kind: DocumentKind::Sale,
            partner_id: PartnerId::new(1),
            partner_name: "Acme Trading".to_string(),
            location_id: LocationId::new(1),
            user_id: UserId::new(1),
            date: test_time(),
            total_amount: 12_500,
            invoice_number: None,
            data_format: DataFormat::Current,
        }
    }

    #[test]
    fn rejects_non_movement_kinds() {
        let mut new = new_sale(1);
        new.kind = DocumentKind::Invoice;
        let err = Operation::new(new).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("goods-movement")),
            _ => panic!("expected validation error"),
        }
    }

    #[test]
    fn annul_twice_is_refused() {
        let mut op = Operation::new(new_sale(7)).unwrap();
        op.annul().unwrap();
        assert!(op.is_annulled());
        assert!(op.annul().is_err());
    }

    #[test]
    fn annulled_operation_refuses_invoice_stamp() {
        let mut op = Operation::new(new_sale(7)).unwrap();
        op.annul().unwrap();
        let err = op.assign_invoice_number(DocumentNumber::new("INV-1")).unwrap_err();
        match err {
            DomainError::Refusal(msg) => assert!(msg.contains("cannot be edited")),
            _ => panic!("expected refusal"),
        }
        assert_eq!(op.invoice_number(), None);
    }

    #[test]
    fn synthetic_sale_carries_context_only() {
        let sale = Operation::synthetic_sale(
            PartnerId::new(3),
            "Walk-in",
            LocationId::new(2),
            UserId::new(9),
            test_time(),
        );
        assert_eq!(sale.id_typed(), OperationId::new(0));
        assert_eq!(sale.kind(), DocumentKind::Sale);
        assert_eq!(sale.total_amount(), 0);
        assert!(!sale.is_annulled());
    }
}
