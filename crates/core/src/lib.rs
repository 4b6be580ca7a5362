pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use errors::CoreError;
use models::{
    category::Category,
    dashboard::DashboardView,
    filter::{FilterSelection, Period, TypeTab},
    preferences::{Currency, Language, Preferences, Theme},
    store::FinanceStore,
    transaction::{Transaction, TxType},
};
use providers::traits::{FinanceBackend, RateProvider, Session};
use services::dashboard_service::DashboardService;
use storage::manager::StoreManager;

/// Main entry point for the Zen Finance core library.
///
/// Holds the finance store (transactions, categories, preferences), the
/// transient filter selection, and the external collaborators. The view
/// layer reads derived data through [`dashboard`](Self::dashboard) and
/// persists the store whenever [`has_unsaved_changes`](Self::has_unsaved_changes)
/// reports a change.
#[must_use]
pub struct FinanceDashboard {
    store: FinanceStore,
    filter: FilterSelection,
    backend: Box<dyn FinanceBackend>,
    rate_provider: Box<dyn RateProvider>,
    dashboard_service: DashboardService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for FinanceDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceDashboard")
            .field("transactions", &self.store.transactions.len())
            .field("categories", &self.store.categories.len())
            .field("preferences", &self.store.preferences)
            .field("filter", &self.filter)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl FinanceDashboard {
    /// Create a dashboard with a brand new store and default preferences.
    pub fn new(backend: Box<dyn FinanceBackend>, rate_provider: Box<dyn RateProvider>) -> Self {
        Self::build(FinanceStore::default(), backend, rate_provider)
    }

    /// Create a dashboard around an existing store (e.g. from a test fixture
    /// or a host that manages persistence itself).
    pub fn with_store(
        store: FinanceStore,
        backend: Box<dyn FinanceBackend>,
        rate_provider: Box<dyn RateProvider>,
    ) -> Self {
        Self::build(store, backend, rate_provider)
    }

    /// Load a persisted store from JSON bytes.
    /// Use this for WASM / embedded hosts where the frontend handles I/O.
    pub fn load_from_bytes(
        data: &[u8],
        backend: Box<dyn FinanceBackend>,
        rate_provider: Box<dyn RateProvider>,
    ) -> Result<Self, CoreError> {
        let store = StoreManager::load_from_bytes(data)?;
        Ok(Self::build(store, backend, rate_provider))
    }

    /// Serialize the store to JSON bytes the host can persist.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, CoreError> {
        let bytes = StoreManager::save_to_bytes(&self.store)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Load the persisted store from disk, defaulting on first run (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(
        path: &std::path::Path,
        backend: Box<dyn FinanceBackend>,
        rate_provider: Box<dyn RateProvider>,
    ) -> Result<Self, CoreError> {
        let store = StoreManager::load_or_default(path)?;
        Ok(Self::build(store, backend, rate_provider))
    }

    /// Save the store to disk (native only).
    /// Clears the unsaved-changes flag on success.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: &std::path::Path) -> Result<(), CoreError> {
        StoreManager::save_to_file(&self.store, path)?;
        self.dirty = false;
        Ok(())
    }

    // ── Initial Load ────────────────────────────────────────────────

    /// Full startup sequence: session check, then data and rate refresh.
    ///
    /// Returns [`CoreError::AuthRequired`] when no session is active — the
    /// caller redirects to its login surface. Data and rate failures do NOT
    /// fail the load: they are logged and the cached copies remain, so the
    /// page always resolves to "loaded" with whatever data arrived.
    pub async fn init(&mut self) -> Result<Session, CoreError> {
        let session = self
            .backend
            .current_session()
            .await?
            .ok_or(CoreError::AuthRequired)?;

        self.refresh_data().await;
        self.refresh_rate().await;
        Ok(session)
    }

    /// Fetch transactions and categories as two concurrent independent
    /// requests, awaiting both before returning. Either failure is logged
    /// and the corresponding cached list is retained.
    pub async fn refresh_data(&mut self) {
        let (tx_result, cat_result) = tokio::join!(
            self.backend.list_transactions(),
            self.backend.list_categories(),
        );

        match tx_result {
            Ok(transactions) => {
                debug!(count = transactions.len(), "transactions refreshed");
                self.store.transactions = transactions;
                self.dirty = true;
            }
            Err(e) => warn!(backend = self.backend.name(), error = %e, "transaction fetch failed; keeping cached copy"),
        }

        match cat_result {
            Ok(categories) => {
                debug!(count = categories.len(), "categories refreshed");
                self.store.categories = categories;
                self.dirty = true;
            }
            Err(e) => warn!(backend = self.backend.name(), error = %e, "category fetch failed; keeping cached copy"),
        }
    }

    /// Refresh the RUB-per-USD rate. On any failure — network error,
    /// malformed payload, missing field — the previously held rate is
    /// retained silently; nothing propagates to the page.
    pub async fn refresh_rate(&mut self) {
        match self.rate_provider.fetch_rub_per_usd().await {
            Ok(rate) if rate.is_finite() && rate > 0.0 => {
                debug!(rate, "exchange rate refreshed");
                self.store.preferences.rate = rate;
                self.dirty = true;
            }
            Ok(rate) => warn!(
                provider = self.rate_provider.name(),
                rate, "ignoring invalid exchange rate"
            ),
            Err(e) => warn!(provider = self.rate_provider.name(), error = %e, "rate fetch failed; keeping previous rate"),
        }
    }

    /// End the active session.
    pub async fn sign_out(&self) -> Result<(), CoreError> {
        self.backend.sign_out().await
    }

    // ── Preferences ─────────────────────────────────────────────────

    pub fn set_currency(&mut self, currency: Currency) {
        self.store.preferences.currency = currency;
        self.dirty = true;
    }

    pub fn set_language(&mut self, lang: Language) {
        self.store.preferences.lang = lang;
        self.dirty = true;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.store.preferences.theme = theme;
        self.dirty = true;
    }

    /// Set the RUB-per-USD rate by hand. Rejects values a later division
    /// could not survive.
    pub fn set_rate(&mut self, rate: f64) -> Result<(), CoreError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Exchange rate must be finite and positive, got {rate}"
            )));
        }
        self.store.preferences.rate = rate;
        self.dirty = true;
        Ok(())
    }

    #[must_use]
    pub fn preferences(&self) -> &Preferences {
        &self.store.preferences
    }

    // ── Filter Selection (transient UI state) ───────────────────────

    /// Switch the active type tab. Not persisted, does not mark the store dirty.
    pub fn set_tab(&mut self, tab: TypeTab) {
        self.filter.tab = tab;
    }

    /// Switch the active period. Not persisted, does not mark the store dirty.
    pub fn set_period(&mut self, period: Period) {
        self.filter.period = period;
    }

    #[must_use]
    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record a transaction into the local cache, newest-first. The backend
    /// write belongs to the add-transaction flow, not to this library.
    /// Returns the generated id.
    pub fn record_transaction(
        &mut self,
        amount: f64,
        tx_type: TxType,
        category: impl Into<String>,
        category_id: Option<String>,
    ) -> Result<String, CoreError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Transaction amount must be a non-negative magnitude, got {amount}"
            )));
        }

        let mut tx = Transaction::new(amount, tx_type, category);
        if let Some(id) = category_id {
            tx = tx.with_category_id(id);
        }
        let id = tx.id.clone();
        self.store.transactions.insert(0, tx);
        self.dirty = true;
        Ok(id)
    }

    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.store.transactions
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.store.categories
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.store.transactions.len()
    }

    // ── Derived View ────────────────────────────────────────────────

    /// Compute the dashboard view-model for the current filter selection,
    /// with "now" evaluated once for the whole pass.
    #[must_use]
    pub fn dashboard(&self) -> DashboardView {
        self.dashboard_at(Local::now())
    }

    /// Same as [`dashboard`](Self::dashboard) with an explicit "now"
    /// (deterministic tests, frozen clocks).
    #[must_use]
    pub fn dashboard_at(&self, now: DateTime<Local>) -> DashboardView {
        self.dashboard_service
            .build_view(&self.store, &self.filter, now)
    }

    // ── Dirty State ─────────────────────────────────────────────────

    /// Returns `true` if the store has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(
        store: FinanceStore,
        backend: Box<dyn FinanceBackend>,
        rate_provider: Box<dyn RateProvider>,
    ) -> Self {
        Self {
            store,
            filter: FilterSelection::default(),
            backend,
            rate_provider,
            dashboard_service: DashboardService::new(),
            dirty: false,
        }
    }
}
