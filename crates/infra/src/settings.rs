//! Key/value settings store.
//!
//! Externally supplied configuration consumed, not owned, by the core:
//! cascade and finalization flags, preview toggles per document kind, and
//! the numeric display-width setting.

use std::collections::HashMap;
use std::sync::RwLock;

use storekeep_documents::DocumentKind;
use storekeep_fiscal::FinalizePolicy;
use storekeep_lifecycle::CascadePolicy;

/// Invoices are auto-created on sale.
pub const AUTO_INVOICE_ON_SALE: &str = "sales.auto_invoice";
/// Emit fiscal cash receipts on the device.
pub const FISCAL_RECEIPTS: &str = "fiscal.receipts";
/// Produce a paper payment document per payment.
pub const PAYMENT_DOCUMENTS: &str = "fiscal.payment_documents";
/// Zero-padded width of displayed document ids.
pub const NUMBER_WIDTH: &str = "display.number_width";

const DEFAULT_NUMBER_WIDTH: usize = 10;

/// In-memory key/value settings, guarded for concurrent readers.
///
/// Intended for tests/dev; a deployment wires the same surface to its own
/// configuration source.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    values: RwLock<HashMap<String, String>>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.into());
        }
    }

    pub fn set_flag(&self, key: &str, on: bool) {
        self.set(key, if on { "true" } else { "false" });
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    /// Boolean flag; unset or unparseable reads as `false`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key).as_deref(), Some("true") | Some("1"))
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        self.get(key)?.parse().ok()
    }

    /// Width used when rendering document ids zero-padded.
    pub fn number_width(&self) -> usize {
        self.integer(NUMBER_WIDTH)
            .and_then(|w| usize::try_from(w).ok())
            .unwrap_or(DEFAULT_NUMBER_WIDTH)
    }

    /// Preview toggle for paper documents of one kind; defaults to on.
    pub fn preview_enabled(&self, kind: DocumentKind) -> bool {
        match self.get(&format!("preview.{kind}")) {
            Some(value) => matches!(value.as_str(), "true" | "1"),
            None => true,
        }
    }

    pub fn set_preview_enabled(&self, kind: DocumentKind, on: bool) {
        self.set_flag(&format!("preview.{kind}"), on);
    }
}

impl CascadePolicy for InMemorySettings {
    fn auto_invoice_on_sale(&self) -> bool {
        self.flag(AUTO_INVOICE_ON_SALE)
    }
}

impl FinalizePolicy for InMemorySettings {
    fn fiscal_receipts_enabled(&self) -> bool {
        self.flag(FISCAL_RECEIPTS)
    }

    fn payment_documents_enabled(&self) -> bool {
        self.flag(PAYMENT_DOCUMENTS)
    }
}
