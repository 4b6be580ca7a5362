use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::RateProvider;
use crate::errors::CoreError;

const BASE_URL: &str = "https://open.er-api.com/v6";

/// open.er-api.com provider for the RUB-per-USD display rate.
///
/// - **Free**: no API key, unauthenticated.
/// - **Endpoint**: `/latest/USD` — all rates relative to USD.
///
/// Only the `RUB` entry is consumed; everything else in the payload
/// is ignored.
pub struct OpenErApiProvider {
    client: Client,
    base_url: String,
}

impl OpenErApiProvider {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Point the provider at a different base URL (tests, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into(),
        }
    }
}

impl Default for OpenErApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── open.er-api.com response types ──────────────────────────────────

#[derive(Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RateProvider for OpenErApiProvider {
    fn name(&self) -> &str {
        "open.er-api.com"
    }

    async fn fetch_rub_per_usd(&self) -> Result<f64, CoreError> {
        let url = format!("{}/latest/USD", self.base_url);

        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(CoreError::Api {
                provider: "open.er-api.com".into(),
                message: format!("Rate request failed with status {}", resp.status()),
            });
        }

        let body: LatestRatesResponse = resp.json().await.map_err(|e| CoreError::Api {
            provider: "open.er-api.com".into(),
            message: format!("Failed to parse rates payload: {e}"),
        })?;

        let rate = body.rates.get("RUB").copied().ok_or_else(|| CoreError::Api {
            provider: "open.er-api.com".into(),
            message: "No RUB rate in response".into(),
        })?;

        if !rate.is_finite() || rate <= 0.0 {
            return Err(CoreError::Api {
                provider: "open.er-api.com".into(),
                message: format!("Invalid RUB rate returned: {rate}"),
            });
        }

        Ok(rate)
    }
}
