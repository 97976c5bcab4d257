//! Finalization options.

use serde::{Deserialize, Serialize};

use storekeep_documents::{Operation, Payment};

/// Action bits requested from one finalization pass. Combinable with `|`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinalizeActions(u8);

impl FinalizeActions {
    pub const NONE: Self = Self(0);
    /// Emit the fiscal cash receipt on the device.
    pub const PRINT_CASH_RECEIPT: Self = Self(1);
    /// Collect sale data alongside the receipt.
    pub const COLLECT_SALE_DATA: Self = Self(1 << 1);
    /// Commit the underlying document.
    pub const COMMIT_DOCUMENT: Self = Self(1 << 2);
    /// Re-emit a receipt already printed once.
    pub const REPRINT: Self = Self(1 << 3);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl core::ops::BitOr for FinalizeActions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for FinalizeActions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Everything one finalization pass needs: the sale context, the payments
/// involved, and the requested actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeOptions {
    pub sale: Operation,
    pub payments: Vec<Payment>,
    pub actions: FinalizeActions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_combine_and_contain() {
        let actions = FinalizeActions::PRINT_CASH_RECEIPT | FinalizeActions::COLLECT_SALE_DATA;
        assert!(actions.contains(FinalizeActions::PRINT_CASH_RECEIPT));
        assert!(actions.contains(FinalizeActions::COLLECT_SALE_DATA));
        assert!(!actions.contains(FinalizeActions::COMMIT_DOCUMENT));
    }

    #[test]
    fn none_is_contained_in_everything() {
        assert!(FinalizeActions::REPRINT.contains(FinalizeActions::NONE));
        assert!(FinalizeActions::NONE.is_empty());
    }
}
