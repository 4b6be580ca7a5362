use serde::{Deserialize, Serialize};

/// Income/expense totals over a filtered transaction subset.
///
/// Both totals are non-negative by construction (amounts are stored as
/// magnitudes); the net balance can be negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Sum of `amount` over income transactions
    pub income_total: f64,

    /// Sum of `amount` over expense transactions
    pub expense_total: f64,
}

impl LedgerTotals {
    /// Net balance = income − expense. Can be negative.
    pub fn balance(&self) -> f64 {
        self.income_total - self.expense_total
    }
}
