//! Document display numbers.

use serde::{Deserialize, Serialize};

/// Display number carried by an issued invoice and stamped on operations
/// generated from it; the cross-reference key between the two.
///
/// Ordering is numeric over a trailing-integer suffix when the prefixes
/// match ("INV-99" < "INV-100"), lexicographic otherwise, so listings
/// sorted by number descending read most-recent-first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentNumber(String);

impl DocumentNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into (prefix, trailing integer). `None` when there is no
    /// trailing digit run or it overflows u64.
    fn numeric_suffix(&self) -> (&str, Option<u64>) {
        let s = self.0.as_str();
        let tail_digits = s.chars().rev().take_while(|c| c.is_ascii_digit()).count();
        if tail_digits == 0 {
            return (s, None);
        }
        let (prefix, digits) = s.split_at(s.len() - tail_digits);
        match digits.parse::<u64>() {
            Ok(n) => (prefix, Some(n)),
            Err(_) => (s, None),
        }
    }
}

impl core::fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentNumber {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Ord for DocumentNumber {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        match (self.numeric_suffix(), other.numeric_suffix()) {
            ((p1, Some(n1)), (p2, Some(n2))) if p1 == p2 => {
                // Tie-break on the raw string so "INV-007" != "INV-7"
                // stays consistent with Eq.
                n1.cmp(&n2).then_with(|| self.0.cmp(&other.0))
            }
            _ => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for DocumentNumber {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_suffix_orders_within_prefix() {
        assert!(DocumentNumber::new("INV-99") < DocumentNumber::new("INV-100"));
        assert!(DocumentNumber::new("0000000099") < DocumentNumber::new("0000000100"));
    }

    #[test]
    fn distinct_prefixes_order_lexicographically() {
        assert!(DocumentNumber::new("A-2") < DocumentNumber::new("B-1"));
    }

    #[test]
    fn non_numeric_numbers_order_lexicographically() {
        assert!(DocumentNumber::new("DRAFT") < DocumentNumber::new("FINAL"));
    }

    #[test]
    fn ordering_is_consistent_with_equality() {
        let a = DocumentNumber::new("INV-007");
        let b = DocumentNumber::new("INV-7");
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), core::cmp::Ordering::Equal);
    }
}
