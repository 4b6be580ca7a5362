use chrono::{DateTime, Datelike, Duration, Local};

use crate::models::filter::{FilterSelection, Period};
use crate::models::summary::LedgerTotals;
use crate::models::transaction::{Transaction, TxType};

/// Filters transactions by time window and type, and sums totals.
///
/// Pure business logic — no I/O, no clock access. "Now" is passed in and
/// evaluated once per filter pass, never per transaction, so a single pass
/// cannot drift across a midnight boundary.
pub struct FilterService;

impl FilterService {
    pub fn new() -> Self {
        Self
    }

    /// Produce the subsequence satisfying both the period and the type
    /// predicate. Output preserves input order.
    ///
    /// Rows without a usable timestamp are skipped from period matching:
    /// they pass `Period::All` and fail every concrete window.
    pub fn filter<'a>(
        &self,
        transactions: &'a [Transaction],
        selection: &FilterSelection,
        now: DateTime<Local>,
    ) -> Vec<&'a Transaction> {
        let week_floor = now - Duration::days(7);
        let today = now.date_naive();

        transactions
            .iter()
            .filter(|tx| selection.tab.accepts(tx.tx_type))
            .filter(|tx| match selection.period {
                Period::All => true,
                Period::Day => tx
                    .created_at
                    .is_some_and(|ts| ts.with_timezone(&Local).date_naive() == today),
                Period::Week => tx.created_at.is_some_and(|ts| ts >= week_floor),
                Period::Month => tx.created_at.is_some_and(|ts| {
                    let local = ts.with_timezone(&Local).date_naive();
                    local.month() == today.month() && local.year() == today.year()
                }),
            })
            .collect()
    }

    /// Sum `amount` over the filtered subsequence, split by type.
    pub fn totals(&self, filtered: &[&Transaction]) -> LedgerTotals {
        let mut totals = LedgerTotals::default();
        for tx in filtered {
            match tx.tx_type {
                TxType::Income => totals.income_total += tx.amount,
                TxType::Expense => totals.expense_total += tx.amount,
            }
        }
        totals
    }
}

impl Default for FilterService {
    fn default() -> Self {
        Self::new()
    }
}
