//! Kiosk backend HTTP client.
//!
//! Thin `reqwest` wrapper around the backend endpoints the kiosk consumes.
//! The normalized catalog is cached via `moka` so browsing the kiosk UI does
//! not hammer the backend on Pi-class hardware.

use std::sync::Arc;

use moka::future::Cache;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, instrument};

use snackpoint_core::{HealthSummary, Product};

use crate::config::KioskConfig;
use crate::status::HealthSource;

use super::BackendError;
use super::conversions::normalize_catalog;

/// Cache key for the single catalog entry.
const CATALOG_CACHE_KEY: &str = "catalog";

/// Client for the kiosk backend API.
///
/// Cheap to clone; all clones share the underlying connection pool and
/// catalog cache.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
    catalog_cache: Cache<&'static str, Vec<Product>>,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build or the API token is
    /// not a valid header value.
    pub fn new(config: &KioskConfig) -> Result<Self, BackendError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_token.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| BackendError::Parse(format!("Invalid API token format: {e}")))?,
        );
        headers.insert("Accept", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            // Maintenance setups run the backend with a self-signed cert.
            .danger_accept_invalid_certs(config.danger_accept_invalid_certs)
            .build()?;

        let catalog_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.catalog_cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                catalog_cache,
            }),
        })
    }

    /// Trigger the card reader and fetch the raw identity payload.
    ///
    /// The payload shape varies by deployment; resolve it with
    /// [`super::conversions::normalize_identity`].
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success
    /// response (the backend answers 500 with `{"error": ...}` when no card
    /// could be verified).
    #[instrument(skip(self))]
    pub async fn fetch_identity(&self) -> Result<Value, BackendError> {
        self.get_json("get_user_info").await
    }

    /// Fetch the normalized product catalog.
    ///
    /// Results are cached for the configured TTL; `force` bypasses the
    /// cache, mirroring the kiosk's explicit refresh action.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure. An empty catalog is a
    /// valid result, not an error.
    #[instrument(skip(self))]
    pub async fn fetch_catalog(&self, force: bool) -> Result<Vec<Product>, BackendError> {
        if !force
            && let Some(products) = self.inner.catalog_cache.get(CATALOG_CACHE_KEY).await
        {
            debug!(count = products.len(), "catalog served from cache");
            return Ok(products);
        }

        let raw = self.get_json("get_product_list").await?;
        let products = normalize_catalog(&raw);
        self.inner
            .catalog_cache
            .insert(CATALOG_CACHE_KEY, products.clone())
            .await;
        Ok(products)
    }

    /// Fetch the backend health summary.
    ///
    /// The backend reports `{"status": "ok"}` when healthy and
    /// `{"status": "error", "message": ...}` (possibly with a 5xx status
    /// code) when not; both shapes normalize into a [`HealthSummary`].
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or an uninterpretable
    /// response body.
    #[instrument(skip(self))]
    pub async fn fetch_health(&self) -> Result<HealthSummary, BackendError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("health"))
            .send()
            .await?;
        let status = response.status();
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(BackendError::Api {
                    status: status.as_u16(),
                    payload: None,
                });
            }
            Err(e) => return Err(BackendError::Parse(e.to_string())),
        };

        let Some(reported) = body.get("status").and_then(Value::as_str) else {
            return Err(BackendError::Api {
                status: status.as_u16(),
                payload: Some(body),
            });
        };

        Ok(HealthSummary {
            healthy: reported.eq_ignore_ascii_case("ok"),
            message: body
                .get("message")
                .and_then(Value::as_str)
                .map(ToString::to_string),
        })
    }

    /// Submit a completed sale for booking.
    ///
    /// Totals and the resulting receipt are computed server-side; the kiosk
    /// only carries them.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure or a non-success
    /// response.
    #[instrument(skip(self))]
    pub async fn submit_sale(
        &self,
        member_id: &str,
        item_id: &str,
        amount: u32,
    ) -> Result<Value, BackendError> {
        let body = serde_json::json!({
            "memberid": member_id,
            "itemid": item_id,
            "amount": amount,
        });

        let response = self
            .inner
            .client
            .post(self.endpoint("sales"))
            .json(&body)
            .send()
            .await?;
        Self::json_or_api_error(response).await
    }

    /// GET an endpoint and parse the JSON body.
    async fn get_json(&self, path: &str) -> Result<Value, BackendError> {
        let response = self.inner.client.get(self.endpoint(path)).send().await?;
        Self::json_or_api_error(response).await
    }

    /// Turn a response into its JSON body, or an `Api` error carrying the
    /// structured payload when the status is non-success.
    async fn json_or_api_error(response: reqwest::Response) -> Result<Value, BackendError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| BackendError::Parse(e.to_string()));
        }

        let payload: Option<Value> = response.json().await.ok();
        Err(BackendError::Api {
            status: status.as_u16(),
            payload,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }
}

impl HealthSource for BackendClient {
    async fn health(&self) -> Result<HealthSummary, BackendError> {
        self.fetch_health().await
    }
}
