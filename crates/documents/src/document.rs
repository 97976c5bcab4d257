//! Document kinds, lifecycle state machine, and the shared document trait.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storekeep_core::{DomainError, DomainResult, PartnerId};

/// Kind of business document.
///
/// Sale/purchase-derived goods movements are carried by [`crate::Operation`]
/// with this tag; invoices and payments are standalone record types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Sale,
    Purchase,
    StockTaking,
    Transfer,
    Waste,
    Invoice,
    Payment,
}

impl DocumentKind {
    /// Kinds carried by an `Operation` record.
    pub fn is_goods_movement(self) -> bool {
        matches!(
            self,
            DocumentKind::Sale
                | DocumentKind::Purchase
                | DocumentKind::StockTaking
                | DocumentKind::Transfer
                | DocumentKind::Waste
        )
    }

    /// Human-readable label used in refusal messages.
    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Sale => "sale",
            DocumentKind::Purchase => "purchase",
            DocumentKind::StockTaking => "stock-taking",
            DocumentKind::Transfer => "transfer",
            DocumentKind::Waste => "waste",
            DocumentKind::Invoice => "invoice",
            DocumentKind::Payment => "payment",
        }
    }
}

impl core::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Document status lifecycle. `Annulled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Active,
    Annulled,
}

/// Data format the document was written with.
///
/// Documents created by an older incompatible format refuse both annulment
/// and editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Current,
    Legacy,
}

/// Annullable lifecycle shared by every document record.
///
/// Transitions: `Active -> Annulled` (terminal). An annulled document is
/// immutable; a legacy-format document refuses all transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifecycle {
    status: DocumentStatus,
    data_format: DataFormat,
}

impl Lifecycle {
    pub fn active() -> Self {
        Self {
            status: DocumentStatus::Active,
            data_format: DataFormat::Current,
        }
    }

    pub fn with_format(data_format: DataFormat) -> Self {
        Self {
            status: DocumentStatus::Active,
            data_format,
        }
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    pub fn data_format(&self) -> DataFormat {
        self.data_format
    }

    pub fn is_annulled(&self) -> bool {
        self.status == DocumentStatus::Annulled
    }

    /// Refuse unless the document may be annulled right now.
    pub fn ensure_annullable(&self, kind: DocumentKind) -> DomainResult<()> {
        if self.data_format == DataFormat::Legacy {
            return Err(DomainError::refusal(format!(
                "{kind} was created by an incompatible data format and cannot be annulled"
            )));
        }
        if self.is_annulled() {
            return Err(DomainError::refusal(format!("{kind} is already annulled")));
        }
        Ok(())
    }

    /// Refuse unless the document may be edited right now.
    pub fn ensure_editable(&self, kind: DocumentKind) -> DomainResult<()> {
        if self.data_format == DataFormat::Legacy {
            return Err(DomainError::refusal(format!(
                "{kind} was created by an incompatible data format and cannot be edited"
            )));
        }
        if self.is_annulled() {
            return Err(DomainError::refusal(format!(
                "annulled {kind} cannot be edited"
            )));
        }
        Ok(())
    }

    /// Transition to `Annulled`. Refused for annulled or legacy documents;
    /// no state change on refusal.
    pub fn annul(&mut self, kind: DocumentKind) -> DomainResult<()> {
        self.ensure_annullable(kind)?;
        self.status = DocumentStatus::Annulled;
        Ok(())
    }
}

/// Erased reference to a document of any kind (cross-reference results).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    pub kind: DocumentKind,
    pub id: i64,
}

impl DocumentRef {
    pub fn new(kind: DocumentKind, id: i64) -> Self {
        Self { kind, id }
    }
}

impl core::fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} #{}", self.kind, self.id)
    }
}

/// Shared document interface: identity, date, partner, annullable state.
pub trait Document {
    /// Strongly-typed document identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    fn id(&self) -> Self::Id;
    fn kind(&self) -> DocumentKind;
    fn date(&self) -> DateTime<Utc>;
    fn partner_id(&self) -> PartnerId;
    fn lifecycle(&self) -> &Lifecycle;
    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    fn is_annulled(&self) -> bool {
        self.lifecycle().is_annulled()
    }

    /// Annul this document. Refused (no state change) when already annulled
    /// or written by an incompatible format.
    fn annul(&mut self) -> DomainResult<()> {
        let kind = self.kind();
        self.lifecycle_mut().annul(kind)
    }

    fn ensure_editable(&self) -> DomainResult<()> {
        self.lifecycle().ensure_editable(self.kind())
    }

    fn document_ref(&self) -> DocumentRef;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annul_is_terminal() {
        let mut lifecycle = Lifecycle::active();
        lifecycle.annul(DocumentKind::Transfer).unwrap();
        assert!(lifecycle.is_annulled());

        let err = lifecycle.annul(DocumentKind::Transfer).unwrap_err();
        match err {
            DomainError::Refusal(msg) => assert!(msg.contains("already annulled")),
            _ => panic!("expected refusal"),
        }
        assert!(lifecycle.is_annulled());
    }

    #[test]
    fn legacy_format_refuses_annul_and_edit() {
        let mut lifecycle = Lifecycle::with_format(DataFormat::Legacy);

        let err = lifecycle.annul(DocumentKind::Invoice).unwrap_err();
        match err {
            DomainError::Refusal(msg) => assert!(msg.contains("incompatible data format")),
            _ => panic!("expected refusal"),
        }
        assert_eq!(lifecycle.status(), DocumentStatus::Active);

        let err = lifecycle.ensure_editable(DocumentKind::Invoice).unwrap_err();
        match err {
            DomainError::Refusal(msg) => assert!(msg.contains("cannot be edited")),
            _ => panic!("expected refusal"),
        }
    }

    #[test]
    fn annulled_document_is_not_editable() {
        let mut lifecycle = Lifecycle::active();
        lifecycle.annul(DocumentKind::Payment).unwrap();
        assert!(lifecycle.ensure_editable(DocumentKind::Payment).is_err());
    }
}
