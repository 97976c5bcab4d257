//! Per-kind query state (last-used date filter).

use std::collections::HashMap;
use std::sync::RwLock;

use storekeep_core::DateRange;
use storekeep_documents::DocumentKind;

/// Last-used date filter per document kind.
///
/// Owned explicitly by the application session and injected into selection
/// flows. One current value per kind, overwritten on every successful
/// fetch, never deleted. Guarded so concurrent flows of the same kind are
/// last-writer-wins.
#[derive(Debug, Default)]
pub struct QueryContext {
    last_filters: RwLock<HashMap<DocumentKind, DateRange>>,
}

impl QueryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `range` as the kind's current query state.
    pub fn remember(&self, kind: DocumentKind, range: DateRange) {
        if let Ok(mut filters) = self.last_filters.write() {
            filters.insert(kind, range);
        }
    }

    /// The kind's last-used filter; unbounded when none was recorded yet.
    pub fn last_filter(&self, kind: DocumentKind) -> DateRange {
        self.last_filters
            .read()
            .ok()
            .and_then(|filters| filters.get(&kind).copied())
            .unwrap_or_else(DateRange::unbounded)
    }
}
