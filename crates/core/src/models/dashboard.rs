use serde::Serialize;

use super::chart::ChartDataPoint;
use super::summary::LedgerTotals;
use super::transaction::TxType;

/// A display-ready monetary value: formatted digits plus currency glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedAmount {
    /// Formatted number, e.g. "10.00" or "1500"
    pub text: String,

    /// Currency sign glyph — "₽" or "$"
    pub sign: &'static str,
}

/// One row of the transaction history list, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub id: String,

    /// Category display name
    pub category: String,

    /// Resolved category icon, or the placeholder glyph
    pub icon: String,

    /// Short localized date label, e.g. "5 Mar" / "5 мар".
    /// Empty when the row has no usable timestamp.
    pub date_label: String,

    /// Display-formatted amount in the active currency
    pub amount: FormattedAmount,

    /// Income or expense — the view picks the +/- prefix and styling
    pub tx_type: TxType,
}

/// Everything the dashboard view renders, derived in one pass from
/// (transactions, filter selection, currency, rate). Pure data; recomputed
/// on every relevant state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Raw totals over the filtered subset (RUB magnitudes)
    pub totals: LedgerTotals,

    /// Net balance formatted in the active currency (may carry a minus sign)
    pub balance_display: FormattedAmount,

    /// Income total formatted in the active currency
    pub income_display: FormattedAmount,

    /// Expense total formatted in the active currency
    pub expense_display: FormattedAmount,

    /// Filtered history rows, input order preserved
    pub entries: Vec<LedgerEntry>,

    /// Daily income/expense series over the filtered subset, ascending dates
    pub chart: Vec<ChartDataPoint>,

    /// Number of filtered rows (the "N operations" counter)
    pub entry_count: usize,
}
