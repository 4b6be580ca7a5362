use chrono::{DateTime, Local};

use crate::models::category::{Category, PLACEHOLDER_ICON};
use crate::models::dashboard::{DashboardView, LedgerEntry};
use crate::models::filter::FilterSelection;
use crate::models::store::FinanceStore;
use crate::models::transaction::Transaction;
use crate::services::chart_service::ChartService;
use crate::services::filter_service::FilterService;
use crate::services::format_service::FormatService;

/// Derives the full dashboard view-model in one pass.
///
/// Pure function of (transactions, filter selection, currency, rate) —
/// idempotent, no side effects, safe to recompute on every state change.
pub struct DashboardService {
    filter_service: FilterService,
    format_service: FormatService,
    chart_service: ChartService,
}

impl DashboardService {
    pub fn new() -> Self {
        Self {
            filter_service: FilterService::new(),
            format_service: FormatService::new(),
            chart_service: ChartService::new(),
        }
    }

    /// Build the view: filtered subset, totals, formatted strings, history
    /// rows with resolved icons, and the daily chart series.
    pub fn build_view(
        &self,
        store: &FinanceStore,
        selection: &FilterSelection,
        now: DateTime<Local>,
    ) -> DashboardView {
        let prefs = &store.preferences;
        let filtered = self
            .filter_service
            .filter(&store.transactions, selection, now);
        let totals = self.filter_service.totals(&filtered);

        let entries = filtered
            .iter()
            .map(|tx| self.build_entry(tx, store))
            .collect();

        let chart = self.chart_service.daily_series(&filtered);

        DashboardView {
            totals,
            balance_display: self.format_service.format_amount(
                totals.balance(),
                prefs.currency,
                prefs.rate,
            ),
            income_display: self.format_service.format_amount(
                totals.income_total,
                prefs.currency,
                prefs.rate,
            ),
            expense_display: self.format_service.format_amount(
                totals.expense_total,
                prefs.currency,
                prefs.rate,
            ),
            entries,
            chart,
            entry_count: filtered.len(),
        }
    }

    /// Resolve a display icon for a transaction's category.
    ///
    /// Joins by the stable category id when the row carries one; falls back
    /// to the legacy name join for older rows; anything unresolved gets the
    /// placeholder glyph — never an error.
    pub fn resolve_icon<'a>(&self, tx: &Transaction, categories: &'a [Category]) -> &'a str {
        let by_id = tx.category_id.as_ref().and_then(|id| {
            categories.iter().find(|c| &c.id == id)
        });
        let resolved = by_id.or_else(|| categories.iter().find(|c| c.name == tx.category));
        resolved.map_or(PLACEHOLDER_ICON, |c| c.icon.as_str())
    }

    fn build_entry(&self, tx: &Transaction, store: &FinanceStore) -> LedgerEntry {
        let prefs = &store.preferences;
        let date_label = tx
            .created_at
            .map(|ts| {
                self.format_service
                    .format_short_date(ts.with_timezone(&Local).date_naive(), prefs.lang)
            })
            .unwrap_or_default();

        LedgerEntry {
            id: tx.id.clone(),
            category: tx.category.clone(),
            icon: self.resolve_icon(tx, &store.categories).to_string(),
            date_label,
            amount: self
                .format_service
                .format_amount(tx.amount, prefs.currency, prefs.rate),
            tx_type: tx.tx_type,
        }
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}
