use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::category::Category;
use crate::models::transaction::Transaction;

/// An authenticated user session, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Backend user id (opaque)
    pub user_id: String,

    /// Sign-in email, when the backend exposes one
    pub email: Option<String>,
}

impl Session {
    /// Short name for greeting: the local part of the email,
    /// or "User" when no email is known.
    pub fn display_name(&self) -> &str {
        self.email
            .as_deref()
            .and_then(|e| e.split('@').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("User")
    }
}

/// Trait abstraction over the backend-as-a-service collaborator.
///
/// Pure I/O, no logic. This library only reads — transaction and category
/// writes are delegated to the (out of scope) add-transaction flow.
/// If the backend changes, only one implementation is replaced.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait FinanceBackend: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// The active session, or `None` when nobody is signed in.
    async fn current_session(&self) -> Result<Option<Session>, CoreError>;

    /// End the active session.
    async fn sign_out(&self) -> Result<(), CoreError>;

    /// List the current user's transactions, newest creation timestamp first.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, CoreError>;

    /// List all categories.
    async fn list_categories(&self) -> Result<Vec<Category>, CoreError>;
}

/// Trait abstraction over the exchange-rate collaborator.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RateProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Current RUB-per-USD rate. A successful result is finite and positive.
    async fn fetch_rub_per_usd(&self) -> Result<f64, CoreError>;
}
