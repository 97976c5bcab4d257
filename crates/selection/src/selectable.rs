//! Per-kind selection capabilities.

use chrono::{DateTime, Utc};

use storekeep_documents::{Document, DocumentNumber, Invoice, Operation, Payment};

/// Fields offered for free-text filtering.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FilterField {
    Number,
    Partner,
}

/// Fields a listing can be sorted by.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortField {
    Id,
    Number,
    Date,
    Partner,
    Amount,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Comparable value extracted from a document field.
///
/// Comparisons only ever happen between values of the same field, so the
/// cross-variant ordering (by variant, then value) is never observed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Int(i64),
    Number(DocumentNumber),
    Text(String),
    Date(DateTime<Utc>),
}

/// Capability surface a document kind exposes to the [`crate::Selector`].
pub trait Selectable: Document + Clone {
    /// Fields this kind declares as free-text searchable.
    fn filter_fields() -> &'static [FilterField];

    /// Text of one filterable field.
    fn filter_text(&self, field: FilterField) -> &str;

    /// Comparable value of one sortable field.
    fn sort_value(&self, field: SortField) -> SortValue;

    /// Default ordering: the kind's natural identifier, most recent first.
    fn default_sort() -> (SortField, SortDirection) {
        (SortField::Id, SortDirection::Descending)
    }
}

impl Selectable for Invoice {
    fn filter_fields() -> &'static [FilterField] {
        &[FilterField::Number, FilterField::Partner]
    }

    fn filter_text(&self, field: FilterField) -> &str {
        match field {
            FilterField::Number => self.number().as_str(),
            FilterField::Partner => self.partner_name(),
        }
    }

    fn sort_value(&self, field: SortField) -> SortValue {
        match field {
            SortField::Id => SortValue::Int(self.id_typed().raw()),
            SortField::Number => SortValue::Number(self.number().clone()),
            SortField::Date => SortValue::Date(self.date()),
            SortField::Partner => SortValue::Text(self.partner_name().to_string()),
            SortField::Amount => SortValue::Int(self.amount()),
        }
    }

    /// Issued invoices list by display number, most recent first.
    fn default_sort() -> (SortField, SortDirection) {
        (SortField::Number, SortDirection::Descending)
    }
}

impl Selectable for Operation {
    fn filter_fields() -> &'static [FilterField] {
        &[FilterField::Partner]
    }

    fn filter_text(&self, field: FilterField) -> &str {
        match field {
            // Operations have no display number of their own.
            FilterField::Number => "",
            FilterField::Partner => self.partner_name(),
        }
    }

    fn sort_value(&self, field: SortField) -> SortValue {
        match field {
            SortField::Id | SortField::Number => SortValue::Int(self.id_typed().raw()),
            SortField::Date => SortValue::Date(self.date()),
            SortField::Partner => SortValue::Text(self.partner_name().to_string()),
            SortField::Amount => SortValue::Int(self.total_amount()),
        }
    }
}

impl Selectable for Payment {
    fn filter_fields() -> &'static [FilterField] {
        &[FilterField::Partner]
    }

    fn filter_text(&self, field: FilterField) -> &str {
        match field {
            FilterField::Number => "",
            FilterField::Partner => self.partner_name(),
        }
    }

    fn sort_value(&self, field: SortField) -> SortValue {
        match field {
            SortField::Id | SortField::Number => SortValue::Int(self.id_typed().raw()),
            SortField::Date => SortValue::Date(self.date()),
            SortField::Partner => SortValue::Text(self.partner_name().to_string()),
            SortField::Amount => SortValue::Int(self.amount()),
        }
    }
}
