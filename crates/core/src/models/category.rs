use serde::{Deserialize, Serialize};

use super::transaction::TxType;

/// Icon shown when a transaction's category cannot be resolved.
pub const PLACEHOLDER_ICON: &str = "📦";

/// A named grouping for transactions with an associated display icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier — the stable join key for icon lookup
    pub id: String,

    /// Display name. Derived/display field only: transactions that still
    /// reference categories by name fall back to this, but renames are
    /// expected to break such rows (hence the id join).
    pub name: String,

    /// Which transaction type this category applies to
    #[serde(rename = "type")]
    pub cat_type: TxType,

    /// Display icon (single glyph)
    pub icon: String,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        cat_type: TxType,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cat_type,
            icon: icon.into(),
        }
    }
}
