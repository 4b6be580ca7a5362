use serde::{Deserialize, Serialize};

use super::category::Category;
use super::preferences::Preferences;
use super::transaction::Transaction;

/// The main state container. Everything in here gets serialized and saved
/// under the single persistence key, and survives a full reload.
///
/// Explicitly owned and passed to whoever needs it — there is no ambient
/// global store. Initialization uses the documented defaults; persistence
/// is load-on-start / save-on-change through `StoreManager`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinanceStore {
    /// Locally cached transactions, newest creation timestamp first
    /// (the order the gateway fetched them in).
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    /// Locally cached categories.
    #[serde(default)]
    pub categories: Vec<Category>,

    /// User-chosen display settings.
    #[serde(default)]
    pub preferences: Preferences,
}
