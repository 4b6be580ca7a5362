use super::transaction::TxType;

/// Active type tab — which transaction types the view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeTab {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeTab {
    /// Whether a transaction of the given type passes this tab.
    pub fn accepts(&self, tx_type: TxType) -> bool {
        match self {
            TypeTab::All => true,
            TypeTab::Income => tx_type == TxType::Income,
            TypeTab::Expense => tx_type == TxType::Expense,
        }
    }
}

/// Active time-window predicate over transaction timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    All,
    /// Same local calendar date as "now"
    Day,
    /// Within the trailing 7 days from "now" (inclusive lower bound)
    Week,
    /// Same local month and year as "now"
    Month,
}

/// Transient UI filter state. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub tab: TypeTab,
    pub period: Period,
}
