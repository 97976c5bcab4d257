//! Choice intent.

use serde::{Deserialize, Serialize};

/// What the caller will do with the picked document.
///
/// Changes the surrounding flow (and dialog dressing, out of scope here),
/// never the selection contract itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceIntent {
    #[default]
    Plain,
    Annul,
    Print,
}

impl ChoiceIntent {
    /// Whether the follow-up mutates the picked document.
    pub fn is_mutating(self) -> bool {
        matches!(self, ChoiceIntent::Annul)
    }
}
