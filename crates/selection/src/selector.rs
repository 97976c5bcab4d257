//! Generic document selector.

use storekeep_core::DateRange;
use storekeep_documents::{Document, DocumentKind, DocumentStore, StoreResult};

use crate::query_state::QueryContext;
use crate::selectable::{Selectable, SortDirection, SortField};

/// Listing of one document kind with a filterable, sortable view and a
/// single picked row.
///
/// The backing collection is fetched once and never mutated in place;
/// filtering narrows a view of indices over it and sorting reorders that
/// view.
#[derive(Debug)]
pub struct Selector<D: Selectable> {
    kind: DocumentKind,
    range: DateRange,
    items: Vec<D>,
    /// Current ordering over all backing items.
    order: Vec<usize>,
    /// Ordered indices passing the current filter.
    view: Vec<usize>,
    filter_text: String,
    focus: Option<usize>,
}

impl<D: Selectable> Selector<D> {
    /// Fetch documents of `kind` within `range` and build a selector over
    /// them in the kind's default order.
    ///
    /// A successful fetch records `range` as the new query state for
    /// `kind`; a failed fetch leaves the query state untouched.
    pub fn load<S>(
        store: &S,
        ctx: &QueryContext,
        kind: DocumentKind,
        range: DateRange,
    ) -> StoreResult<Self>
    where
        S: DocumentStore<D>,
    {
        let fetched = store.list(&range)?;
        ctx.remember(kind, range);

        let items: Vec<D> = fetched.into_iter().filter(|d| d.kind() == kind).collect();
        tracing::debug!(kind = %kind, rows = items.len(), "listed documents");

        let mut selector = Self {
            kind,
            range,
            order: (0..items.len()).collect(),
            view: (0..items.len()).collect(),
            items,
            filter_text: String::new(),
            focus: None,
        };
        let (field, direction) = D::default_sort();
        selector.sort(field, direction);
        Ok(selector)
    }

    /// [`Selector::load`] with the kind's last-used date filter.
    pub fn load_with_last_filter<S>(
        store: &S,
        ctx: &QueryContext,
        kind: DocumentKind,
    ) -> StoreResult<Self>
    where
        S: DocumentStore<D>,
    {
        let range = ctx.last_filter(kind);
        Self::load(store, ctx, kind, range)
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Rows currently visible, in view order.
    pub fn rows(&self) -> impl Iterator<Item = &D> {
        self.view.iter().map(|&idx| &self.items[idx])
    }

    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Narrow the view to rows where any declared filterable field contains
    /// `text` case-insensitively. Empty text restores the full view.
    pub fn filter(&mut self, text: &str) {
        self.filter_text = text.to_string();
        self.rebuild_view();
    }

    /// Reorder the view by `field`. Filtering is preserved.
    pub fn sort(&mut self, field: SortField, direction: SortDirection) {
        let items = &self.items;
        self.order.sort_by(|&a, &b| {
            let ord = items[a].sort_value(field).cmp(&items[b].sort_value(field));
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
        self.rebuild_view();
    }

    /// Move row focus. An index outside the current view is kept as-is and
    /// simply yields no pick.
    pub fn focus(&mut self, index: Option<usize>) {
        self.focus = index;
    }

    /// The focused row, or `None` when nothing is focused or the focus
    /// fell outside the current view.
    pub fn pick(&self) -> Option<&D> {
        self.focus
            .and_then(|i| self.view.get(i))
            .map(|&idx| &self.items[idx])
    }

    fn rebuild_view(&mut self) {
        let needle = self.filter_text.to_lowercase();
        let items = &self.items;
        self.view = self
            .order
            .iter()
            .copied()
            .filter(|&idx| {
                needle.is_empty()
                    || D::filter_fields().iter().any(|&field| {
                        items[idx].filter_text(field).to_lowercase().contains(&needle)
                    })
            })
            .collect();
    }
}
