// ═══════════════════════════════════════════════════════════════════
// Service & Integration Tests — FilterService, FormatService,
// ChartService, DashboardService, FinanceDashboard facade
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

use zen_finance_core::FinanceDashboard;
use zen_finance_core::errors::CoreError;
use zen_finance_core::models::category::{Category, PLACEHOLDER_ICON};
use zen_finance_core::models::filter::{FilterSelection, Period, TypeTab};
use zen_finance_core::models::preferences::{Currency, FALLBACK_RATE, Language};
use zen_finance_core::models::store::FinanceStore;
use zen_finance_core::models::transaction::{Transaction, TxType};
use zen_finance_core::providers::traits::{FinanceBackend, RateProvider, Session};
use zen_finance_core::services::chart_service::ChartService;
use zen_finance_core::services::dashboard_service::DashboardService;
use zen_finance_core::services::filter_service::FilterService;
use zen_finance_core::services::format_service::FormatService;

// ═══════════════════════════════════════════════════════════════════
// Test Helpers
// ═══════════════════════════════════════════════════════════════════

fn tx(id: &str, amount: f64, tx_type: TxType, created_at: Option<DateTime<Utc>>) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount,
        tx_type,
        category: "Misc".to_string(),
        category_id: None,
        created_at,
    }
}

fn days_ago(now: DateTime<Local>, days: i64) -> Option<DateTime<Utc>> {
    Some((now - Duration::days(days)).with_timezone(&Utc))
}

fn selection(tab: TypeTab, period: Period) -> FilterSelection {
    FilterSelection { tab, period }
}

/// In-memory backend standing in for the real REST collaborator.
struct MockBackend {
    session: Option<Session>,
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    fail_transactions: bool,
    fail_categories: bool,
}

impl MockBackend {
    fn new() -> Self {
        Self {
            session: Some(Session {
                user_id: "user-1".into(),
                email: Some("alice@example.com".into()),
            }),
            transactions: Vec::new(),
            categories: Vec::new(),
            fail_transactions: false,
            fail_categories: false,
        }
    }

    fn failure() -> CoreError {
        CoreError::Api {
            provider: "MockBackend".into(),
            message: "simulated outage".into(),
        }
    }
}

#[async_trait]
impl FinanceBackend for MockBackend {
    fn name(&self) -> &str {
        "MockBackend"
    }

    async fn current_session(&self) -> Result<Option<Session>, CoreError> {
        Ok(self.session.clone())
    }

    async fn sign_out(&self) -> Result<(), CoreError> {
        Ok(())
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        if self.fail_transactions {
            return Err(Self::failure());
        }
        Ok(self.transactions.clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        if self.fail_categories {
            return Err(Self::failure());
        }
        Ok(self.categories.clone())
    }
}

/// Rate provider returning a fixed rate, or failing on demand.
struct MockRateProvider {
    rate: f64,
    fail: bool,
}

impl MockRateProvider {
    fn ok(rate: f64) -> Self {
        Self { rate, fail: false }
    }

    fn failing() -> Self {
        Self {
            rate: 0.0,
            fail: true,
        }
    }
}

#[async_trait]
impl RateProvider for MockRateProvider {
    fn name(&self) -> &str {
        "MockRateProvider"
    }

    async fn fetch_rub_per_usd(&self) -> Result<f64, CoreError> {
        if self.fail {
            return Err(CoreError::Network("simulated network error".into()));
        }
        Ok(self.rate)
    }
}

// ═══════════════════════════════════════════════════════════════════
// FilterService
// ═══════════════════════════════════════════════════════════════════

mod filtering {
    use super::*;

    #[test]
    fn period_all_is_the_identity() {
        let now = Local::now();
        let transactions = vec![
            tx("a", 10.0, TxType::Income, days_ago(now, 0)),
            tx("b", 20.0, TxType::Expense, days_ago(now, 400)),
            tx("c", 30.0, TxType::Income, None),
        ];
        let filtered = FilterService::new().filter(
            &transactions,
            &selection(TypeTab::All, Period::All),
            now,
        );
        assert_eq!(filtered.len(), transactions.len());
        let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn day_accepts_only_todays_local_date() {
        let now = Local::now();
        let transactions = vec![
            tx("today", 1.0, TxType::Income, days_ago(now, 0)),
            tx("two-days", 1.0, TxType::Income, days_ago(now, 2)),
        ];
        let filtered = FilterService::new().filter(
            &transactions,
            &selection(TypeTab::All, Period::Day),
            now,
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "today");
    }

    #[test]
    fn week_lower_bound_is_inclusive() {
        let now = Local::now();
        let transactions = vec![
            tx("boundary", 1.0, TxType::Income, days_ago(now, 7)),
            tx("inside", 1.0, TxType::Income, days_ago(now, 3)),
            tx("outside", 1.0, TxType::Income, days_ago(now, 8)),
        ];
        let filtered = FilterService::new().filter(
            &transactions,
            &selection(TypeTab::All, Period::Week),
            now,
        );
        let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["boundary", "inside"]);
    }

    #[test]
    fn month_matches_month_and_year() {
        let now = Local::now();
        let transactions = vec![
            tx("this-month", 1000.0, TxType::Income, days_ago(now, 0)),
            tx("long-ago", 400.0, TxType::Expense, days_ago(now, 40)),
        ];
        let service = FilterService::new();
        let filtered =
            service.filter(&transactions, &selection(TypeTab::All, Period::Month), now);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "this-month");

        let totals = service.totals(&filtered);
        assert_eq!(totals.income_total, 1000.0);
        assert_eq!(totals.expense_total, 0.0);
        assert_eq!(totals.balance(), 1000.0);
    }

    #[test]
    fn missing_timestamp_matches_only_all() {
        let now = Local::now();
        let transactions = vec![tx("no-ts", 5.0, TxType::Income, None)];
        let service = FilterService::new();

        for period in [Period::Day, Period::Week, Period::Month] {
            let filtered = service.filter(&transactions, &selection(TypeTab::All, period), now);
            assert!(filtered.is_empty(), "period {period:?} accepted a row without timestamp");
        }
        let filtered = service.filter(&transactions, &selection(TypeTab::All, Period::All), now);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn type_tab_filters_by_type() {
        let now = Local::now();
        let transactions = vec![
            tx("i1", 10.0, TxType::Income, days_ago(now, 1)),
            tx("e1", 20.0, TxType::Expense, days_ago(now, 1)),
            tx("i2", 30.0, TxType::Income, days_ago(now, 2)),
        ];
        let service = FilterService::new();

        let income =
            service.filter(&transactions, &selection(TypeTab::Income, Period::All), now);
        assert_eq!(
            income.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["i1", "i2"]
        );

        let expense =
            service.filter(&transactions, &selection(TypeTab::Expense, Period::All), now);
        assert_eq!(
            expense.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["e1"]
        );
    }

    #[test]
    fn split_sums_equal_unconditional_sum() {
        let now = Local::now();
        let transactions = vec![
            tx("a", 10.0, TxType::Income, days_ago(now, 1)),
            tx("b", 20.0, TxType::Expense, days_ago(now, 2)),
            tx("c", 30.0, TxType::Income, days_ago(now, 3)),
            tx("d", 40.0, TxType::Expense, None),
        ];
        let service = FilterService::new();

        let all = service.filter(&transactions, &selection(TypeTab::All, Period::All), now);
        let income = service.filter(&transactions, &selection(TypeTab::Income, Period::All), now);
        let expense =
            service.filter(&transactions, &selection(TypeTab::Expense, Period::All), now);

        let sum = |txs: &[&Transaction]| txs.iter().map(|t| t.amount).sum::<f64>();
        assert_eq!(sum(&income) + sum(&expense), sum(&all));

        let totals = service.totals(&all);
        assert_eq!(totals.income_total, sum(&income));
        assert_eq!(totals.expense_total, sum(&expense));
        assert_eq!(totals.balance(), 40.0 - 60.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// FormatService
// ═══════════════════════════════════════════════════════════════════

mod formatting {
    use super::*;

    #[test]
    fn rub_trims_to_at_most_two_fraction_digits() {
        let service = FormatService::new();
        let cases = [
            (1000.0, "1000"),
            (1234.5, "1234.5"),
            (0.456, "0.46"),
            (0.0, "0"),
            (-500.0, "-500"),
        ];
        for (raw, expected) in cases {
            let out = service.format_amount(raw, Currency::Rub, 92.0);
            assert_eq!(out.text, expected, "raw: {raw}");
            assert_eq!(out.sign, "₽");
        }
    }

    #[test]
    fn usd_divides_by_rate_with_exactly_two_digits() {
        let out = FormatService::new().format_amount(900.0, Currency::Usd, 90.0);
        assert_eq!(out.text, "10.00");
        assert_eq!(out.sign, "$");

        let out = FormatService::new().format_amount(1000.0, Currency::Usd, 92.0);
        assert_eq!(out.text, "10.87");
    }

    #[test]
    fn usd_round_trip_within_rounding_tolerance() {
        let rate = 92.0;
        let raw = 12345.67;
        let out = FormatService::new().format_amount(raw, Currency::Usd, rate);
        let parsed: f64 = out.text.parse().unwrap();
        assert!((parsed * rate - raw).abs() <= 0.005 * rate);
    }

    #[test]
    fn broken_rate_falls_back_before_dividing() {
        let service = FormatService::new();
        for bad_rate in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let out = service.format_amount(FALLBACK_RATE, Currency::Usd, bad_rate);
            assert_eq!(out.text, "1.00", "rate: {bad_rate}");
        }
    }

    #[test]
    fn negative_zero_normalizes() {
        let out = FormatService::new().format_amount(-0.0, Currency::Rub, 92.0);
        assert_eq!(out.text, "0");
        let out = FormatService::new().format_amount(-0.0, Currency::Usd, 92.0);
        assert_eq!(out.text, "0.00");
    }

    #[test]
    fn short_dates_are_localized() {
        let service = FormatService::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(service.format_short_date(date, Language::En), "5 Mar");
        assert_eq!(service.format_short_date(date, Language::Ru), "5 мар");

        let december = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(service.format_short_date(december, Language::En), "31 Dec");
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartService
// ═══════════════════════════════════════════════════════════════════

mod chart {
    use super::*;

    #[test]
    fn groups_by_local_day_ascending() {
        let now = Local::now();
        let transactions = vec![
            tx("a", 100.0, TxType::Income, days_ago(now, 0)),
            tx("b", 40.0, TxType::Expense, days_ago(now, 2)),
            tx("c", 60.0, TxType::Expense, days_ago(now, 0)),
            tx("skipped", 999.0, TxType::Income, None),
        ];
        let filtered: Vec<&Transaction> = transactions.iter().collect();
        let series = ChartService::new().daily_series(&filtered);

        assert_eq!(series.len(), 2);
        assert!(series[0].date < series[1].date);
        assert_eq!(series[0].expense, 40.0);
        assert_eq!(series[1].income, 100.0);
        assert_eq!(series[1].expense, 60.0);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(ChartService::new().daily_series(&[]).is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// DashboardService — icon resolution & view assembly
// ═══════════════════════════════════════════════════════════════════

mod dashboard_view {
    use super::*;

    fn store_with(transactions: Vec<Transaction>, categories: Vec<Category>) -> FinanceStore {
        FinanceStore {
            transactions,
            categories,
            ..FinanceStore::default()
        }
    }

    #[test]
    fn icon_resolves_by_stable_id_before_name() {
        let service = DashboardService::new();
        let categories = vec![
            Category::new("cat-1", "Food", TxType::Expense, "🍔"),
            Category::new("cat-2", "Transport", TxType::Expense, "🚕"),
        ];

        // Row renamed its display name but kept the stable id
        let by_id =
            Transaction::new(10.0, TxType::Expense, "Groceries").with_category_id("cat-2");
        assert_eq!(service.resolve_icon(&by_id, &categories), "🚕");

        // Legacy row joins by name
        let by_name = Transaction::new(10.0, TxType::Expense, "Food");
        assert_eq!(service.resolve_icon(&by_name, &categories), "🍔");
    }

    #[test]
    fn unmatched_category_gets_placeholder_not_error() {
        let service = DashboardService::new();
        let categories = vec![Category::new("cat-1", "Food", TxType::Expense, "🍔")];
        let orphan = Transaction::new(10.0, TxType::Expense, "Renamed Away");
        assert_eq!(service.resolve_icon(&orphan, &categories), PLACEHOLDER_ICON);
        assert_eq!(service.resolve_icon(&orphan, &[]), PLACEHOLDER_ICON);
    }

    #[test]
    fn view_assembles_totals_entries_and_chart() {
        let now = Local::now();
        let transactions = vec![
            tx("a", 1000.0, TxType::Income, days_ago(now, 0)),
            tx("b", 400.0, TxType::Expense, days_ago(now, 1)),
        ];
        let store = store_with(transactions, Vec::new());
        let view =
            DashboardService::new().build_view(&store, &FilterSelection::default(), now);

        assert_eq!(view.entry_count, 2);
        assert_eq!(view.totals.income_total, 1000.0);
        assert_eq!(view.totals.expense_total, 400.0);
        assert_eq!(view.balance_display.text, "600");
        assert_eq!(view.balance_display.sign, "₽");
        assert_eq!(view.income_display.text, "1000");
        assert_eq!(view.expense_display.text, "400");
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.entries[0].id, "a");
        assert_eq!(view.entries[0].icon, PLACEHOLDER_ICON);
        assert!(!view.entries[0].date_label.is_empty());
        assert_eq!(view.chart.len(), 2);
    }

    #[test]
    fn negative_balance_formats_with_minus() {
        let now = Local::now();
        let store = store_with(
            vec![tx("e", 250.0, TxType::Expense, days_ago(now, 0))],
            Vec::new(),
        );
        let view =
            DashboardService::new().build_view(&store, &FilterSelection::default(), now);
        assert_eq!(view.totals.balance(), -250.0);
        assert_eq!(view.balance_display.text, "-250");
    }
}

// ═══════════════════════════════════════════════════════════════════
// FinanceDashboard facade
// ═══════════════════════════════════════════════════════════════════

mod facade {
    use super::*;

    fn backend_with_data() -> MockBackend {
        let now = Local::now();
        let mut backend = MockBackend::new();
        backend.transactions = vec![
            tx("t1", 1000.0, TxType::Income, days_ago(now, 0)),
            tx("t2", 400.0, TxType::Expense, days_ago(now, 3)),
        ];
        backend.categories = vec![Category::new("cat-1", "Misc", TxType::Expense, "📎")];
        backend
    }

    #[tokio::test]
    async fn init_loads_session_data_and_rate() {
        let mut dashboard = FinanceDashboard::new(
            Box::new(backend_with_data()),
            Box::new(MockRateProvider::ok(95.5)),
        );

        let session = dashboard.init().await.unwrap();
        assert_eq!(session.display_name(), "alice");
        assert_eq!(dashboard.transaction_count(), 2);
        assert_eq!(dashboard.categories().len(), 1);
        assert_eq!(dashboard.preferences().rate, 95.5);
        assert!(dashboard.has_unsaved_changes());
    }

    #[tokio::test]
    async fn missing_session_is_auth_required() {
        let mut backend = MockBackend::new();
        backend.session = None;
        let mut dashboard =
            FinanceDashboard::new(Box::new(backend), Box::new(MockRateProvider::ok(92.0)));

        let err = dashboard.init().await.unwrap_err();
        assert!(matches!(err, CoreError::AuthRequired));
        assert_eq!(dashboard.transaction_count(), 0);
    }

    #[tokio::test]
    async fn rate_failure_retains_previous_rate() {
        let mut dashboard = FinanceDashboard::new(
            Box::new(backend_with_data()),
            Box::new(MockRateProvider::failing()),
        );
        dashboard.set_rate(90.0).unwrap();

        dashboard.refresh_rate().await;
        assert_eq!(dashboard.preferences().rate, 90.0);
    }

    #[tokio::test]
    async fn invalid_fetched_rate_is_ignored() {
        let mut dashboard = FinanceDashboard::new(
            Box::new(backend_with_data()),
            Box::new(MockRateProvider::ok(0.0)),
        );
        dashboard.refresh_rate().await;
        assert_eq!(dashboard.preferences().rate, FALLBACK_RATE);
    }

    #[tokio::test]
    async fn partial_fetch_failure_keeps_cached_side() {
        let now = Local::now();
        let mut backend = backend_with_data();
        backend.fail_transactions = true;

        let store = FinanceStore {
            transactions: vec![tx("cached", 5.0, TxType::Income, days_ago(now, 1))],
            ..FinanceStore::default()
        };
        let mut dashboard = FinanceDashboard::with_store(
            store,
            Box::new(backend),
            Box::new(MockRateProvider::ok(92.0)),
        );

        dashboard.refresh_data().await;
        // Transactions failed — cached copy retained; categories still landed
        assert_eq!(dashboard.transaction_count(), 1);
        assert_eq!(dashboard.transactions()[0].id, "cached");
        assert_eq!(dashboard.categories().len(), 1);
    }

    #[tokio::test]
    async fn sign_out_delegates() {
        let dashboard = FinanceDashboard::new(
            Box::new(MockBackend::new()),
            Box::new(MockRateProvider::ok(92.0)),
        );
        dashboard.sign_out().await.unwrap();
    }

    #[test]
    fn record_transaction_prepends_newest_first() {
        let mut dashboard = FinanceDashboard::new(
            Box::new(MockBackend::new()),
            Box::new(MockRateProvider::ok(92.0)),
        );

        let first = dashboard
            .record_transaction(100.0, TxType::Income, "Salary", None)
            .unwrap();
        let second = dashboard
            .record_transaction(40.0, TxType::Expense, "Food", Some("cat-1".into()))
            .unwrap();

        assert_eq!(dashboard.transaction_count(), 2);
        assert_eq!(dashboard.transactions()[0].id, second);
        assert_eq!(dashboard.transactions()[1].id, first);
        assert_eq!(
            dashboard.transactions()[0].category_id.as_deref(),
            Some("cat-1")
        );
        assert!(dashboard.has_unsaved_changes());
    }

    #[test]
    fn record_transaction_rejects_bad_magnitudes() {
        let mut dashboard = FinanceDashboard::new(
            Box::new(MockBackend::new()),
            Box::new(MockRateProvider::ok(92.0)),
        );
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let err = dashboard
                .record_transaction(bad, TxType::Income, "x", None)
                .unwrap_err();
            assert!(matches!(err, CoreError::ValidationError(_)));
        }
        assert_eq!(dashboard.transaction_count(), 0);
    }

    #[test]
    fn set_rate_validates() {
        let mut dashboard = FinanceDashboard::new(
            Box::new(MockBackend::new()),
            Box::new(MockRateProvider::ok(92.0)),
        );
        assert!(matches!(
            dashboard.set_rate(0.0),
            Err(CoreError::ValidationError(_))
        ));
        assert!(matches!(
            dashboard.set_rate(f64::NAN),
            Err(CoreError::ValidationError(_))
        ));
        dashboard.set_rate(93.5).unwrap();
        assert_eq!(dashboard.preferences().rate, 93.5);
    }

    #[test]
    fn filter_selection_is_transient() {
        let mut dashboard = FinanceDashboard::new(
            Box::new(MockBackend::new()),
            Box::new(MockRateProvider::ok(92.0)),
        );
        dashboard.set_tab(TypeTab::Expense);
        dashboard.set_period(Period::Week);
        assert_eq!(dashboard.filter().tab, TypeTab::Expense);
        assert_eq!(dashboard.filter().period, Period::Week);
        // Tab/period changes are UI state, not persisted store mutations
        assert!(!dashboard.has_unsaved_changes());
    }

    #[test]
    fn dashboard_respects_currency_switch() {
        let now = Local::now();
        let store = FinanceStore {
            transactions: vec![tx("t", 900.0, TxType::Income, days_ago(now, 0))],
            ..FinanceStore::default()
        };
        let mut dashboard = FinanceDashboard::with_store(
            store,
            Box::new(MockBackend::new()),
            Box::new(MockRateProvider::ok(92.0)),
        );
        dashboard.set_rate(90.0).unwrap();

        let rub_view = dashboard.dashboard_at(now);
        assert_eq!(rub_view.income_display.text, "900");
        assert_eq!(rub_view.income_display.sign, "₽");

        dashboard.set_currency(Currency::Usd);
        let usd_view = dashboard.dashboard_at(now);
        assert_eq!(usd_view.income_display.text, "10.00");
        assert_eq!(usd_view.income_display.sign, "$");
    }

    #[test]
    fn recomputation_is_idempotent() {
        let now = Local::now();
        let store = FinanceStore {
            transactions: vec![
                tx("a", 10.0, TxType::Income, days_ago(now, 0)),
                tx("b", 4.0, TxType::Expense, days_ago(now, 1)),
            ],
            ..FinanceStore::default()
        };
        let dashboard = FinanceDashboard::with_store(
            store,
            Box::new(MockBackend::new()),
            Box::new(MockRateProvider::ok(92.0)),
        );

        let first = dashboard.dashboard_at(now);
        let second = dashboard.dashboard_at(now);
        assert_eq!(first, second);
    }
}
