//! HTTP client for the remote profile API.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use wealth_model::{Debt, DebtCategory, DebtStrategy};

use crate::error::{Result, StoreError};
use crate::store::DebtStore;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL for the profile HTTP API
    pub base_url: String,
    /// Optional API key for authentication
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// HTTP implementation of [`DebtStore`].
///
/// # Example
///
/// ```rust,no_run
/// use wealth_sync::{DebtStore, HttpDebtStore, StoreConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = HttpDebtStore::new(StoreConfig {
///     base_url: "https://api.wealthline.app".into(),
///     api_key: Some("secret".into()),
///     ..Default::default()
/// });
///
/// let debts = store.list_debts("user-1", None).await?;
/// # Ok(())
/// # }
/// ```
pub struct HttpDebtStore {
    config: StoreConfig,
    client: Client,
}

/// Body shape the server uses to point a 409 at the existing record.
#[derive(Debug, Deserialize)]
struct ConflictBody {
    #[serde(alias = "id")]
    existing_id: Option<String>,
}

impl HttpDebtStore {
    /// Create a new store client.
    pub fn new(config: StoreConfig) -> Self {
        let mut headers = header::HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                    .expect("Invalid API key"),
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self { config, client }
    }

    // ==================== Helper Methods ====================

    fn user_url(&self, user_id: &str, suffix: &str) -> String {
        format!(
            "{}/v1/users/{}/{}",
            self.config.base_url,
            urlencoding::encode(user_id),
            suffix
        )
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound("Resource not found".to_string()));
        }

        if response.status() == StatusCode::CONFLICT {
            let body = response.text().await.unwrap_or_default();
            let existing_id = serde_json::from_str::<ConflictBody>(&body)
                .ok()
                .and_then(|b| b.existing_id);
            return Err(StoreError::Conflict { existing_id });
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Server {
                status,
                message: body,
            });
        }

        let body = response.json().await?;
        Ok(body)
    }
}

#[async_trait]
impl DebtStore for HttpDebtStore {
    async fn list_debts(
        &self,
        user_id: &str,
        category: Option<DebtCategory>,
    ) -> Result<Vec<Debt>> {
        let mut url = self.user_url(user_id, "debts");
        if let Some(category) = category {
            url.push_str("?category=");
            url.push_str(category.as_str());
        }

        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn create_debt(&self, user_id: &str, debt: &Debt) -> Result<Debt> {
        let url = self.user_url(user_id, "debts");

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(debt)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn update_debt(&self, id: &str, debt: &Debt) -> Result<Debt> {
        let url = format!(
            "{}/v1/debts/{}",
            self.config.base_url,
            urlencoding::encode(id)
        );

        let response = self
            .client
            .put(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(debt)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn delete_debt(&self, id: &str) -> Result<()> {
        let url = format!(
            "{}/v1/debts/{}",
            self.config.base_url,
            urlencoding::encode(id)
        );

        let response = self.client.delete(&url).send().await?;

        // An id the server no longer knows is already removed.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Server {
                status,
                message: body,
            });
        }
        Ok(())
    }

    async fn get_strategy(&self, user_id: &str) -> Result<DebtStrategy> {
        let url = self.user_url(user_id, "strategy");

        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn create_strategy(
        &self,
        user_id: &str,
        strategy: &DebtStrategy,
    ) -> Result<DebtStrategy> {
        let url = self.user_url(user_id, "strategy");

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(strategy)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn update_strategy(&self, id: &str, strategy: &DebtStrategy) -> Result<DebtStrategy> {
        let url = format!(
            "{}/v1/strategies/{}",
            self.config.base_url,
            urlencoding::encode(id)
        );

        let response = self
            .client
            .put(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(strategy)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
