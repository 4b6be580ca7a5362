use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::{FinanceBackend, Session};
use crate::errors::CoreError;
use crate::models::category::Category;
use crate::models::transaction::Transaction;

/// Supabase REST backend: GoTrue for sessions, PostgREST for rows.
///
/// Read-only from this library's point of view. Endpoints used:
/// - `GET  /auth/v1/user` — resolve the active session
/// - `POST /auth/v1/logout` — sign out
/// - `GET  /rest/v1/transactions?select=*&order=created_at.desc`
/// - `GET  /rest/v1/categories?select=*`
///
/// Every request carries the `apikey` header; authenticated requests also
/// carry `Authorization: Bearer <access token>`.
pub struct SupabaseBackend {
    client: Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl SupabaseBackend {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token: None,
        }
    }

    /// Attach the access token of an existing session.
    /// Without one, `current_session` reports no session.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn bearer(&self) -> &str {
        // PostgREST accepts the anon key as a bearer for public reads
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }

    async fn fetch_rows<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
    ) -> Result<Vec<T>, CoreError> {
        let url = format!("{}/rest/v1/{table}?{query}", self.base_url);

        let resp = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(CoreError::Api {
                provider: "Supabase".into(),
                message: format!("Listing {table} failed with status {}", resp.status()),
            });
        }

        resp.json().await.map_err(|e| CoreError::Api {
            provider: "Supabase".into(),
            message: format!("Failed to parse {table} rows: {e}"),
        })
    }
}

// ── GoTrue response types ───────────────────────────────────────────

#[derive(Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl FinanceBackend for SupabaseBackend {
    fn name(&self) -> &str {
        "Supabase"
    }

    async fn current_session(&self) -> Result<Option<Session>, CoreError> {
        let Some(token) = self.access_token.as_deref() else {
            return Ok(None);
        };

        let url = format!("{}/auth/v1/user", self.base_url);
        let resp = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        // Expired or revoked token — session is absent, not an error
        if resp.status() == StatusCode::UNAUTHORIZED || resp.status() == StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(CoreError::Api {
                provider: "Supabase".into(),
                message: format!("Session lookup failed with status {}", resp.status()),
            });
        }

        let user: UserResponse = resp.json().await.map_err(|e| CoreError::Api {
            provider: "Supabase".into(),
            message: format!("Failed to parse user payload: {e}"),
        })?;

        Ok(Some(Session {
            user_id: user.id,
            email: user.email,
        }))
    }

    async fn sign_out(&self) -> Result<(), CoreError> {
        let Some(token) = self.access_token.as_deref() else {
            return Ok(()); // nothing to end
        };

        let url = format!("{}/auth/v1/logout", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        // An already-expired token still counts as signed out
        if resp.status().is_success() || resp.status() == StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            Err(CoreError::Api {
                provider: "Supabase".into(),
                message: format!("Sign-out failed with status {}", resp.status()),
            })
        }
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        // Backend orders newest-first; that order is preserved downstream
        self.fetch_rows("transactions", "select=*&order=created_at.desc")
            .await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CoreError> {
        self.fetch_rows("categories", "select=*").await
    }
}
