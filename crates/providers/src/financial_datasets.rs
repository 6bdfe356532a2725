//! Financial-data provider client (prices, metrics, line items, insider trades, company facts).
//!
//! Every method issues exactly one request authenticated with the
//! `X-API-KEY` header and returns the records under one known key.
//!
//! # Example
//!
//! ```ignore
//! use alpha_feed_core::ConfigLoader;
//! use alpha_feed_providers::FinancialDatasetsClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let resolved = ConfigLoader::resolve("config/Config.toml")?;
//!     let client = FinancialDatasetsClient::new(
//!         &resolved.app.financial_datasets,
//!         resolved.credentials.financial_datasets,
//!     )?;
//!
//!     let table = client.get_price_data("AAPL", "2024-01-01", "2024-03-01").await?;
//!     println!("{} daily bars", table.len());
//!     Ok(())
//! }
//! ```

use crate::client::{build_http, extract_object, extract_records, network_error, read_json};
use alpha_feed_core::{FinancialDatasetsConfig, Result};
use alpha_feed_data::{coerce_f64, normalize_equities, PriceTable, RawRecord};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Default number of insider trades per request.
pub const DEFAULT_INSIDER_TRADES_LIMIT: u32 = 5;

/// Reporting window and page size for statement queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementQuery {
    /// Reporting period: `ttm`, `annual`, or `quarterly`
    pub period: String,
    pub limit: u32,
}

impl Default for StatementQuery {
    fn default() -> Self {
        Self {
            period: "ttm".to_string(),
            limit: 1,
        }
    }
}

impl StatementQuery {
    #[must_use]
    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = period.into();
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

#[derive(Debug, Serialize)]
struct LineItemSearch<'a> {
    tickers: [&'a str; 1],
    line_items: &'a [String],
    period: &'a str,
    limit: u32,
}

/// Financial-data REST client.
pub struct FinancialDatasetsClient {
    http: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl std::fmt::Debug for FinancialDatasetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinancialDatasetsClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl FinancialDatasetsClient {
    /// Creates a client from configuration and an optional API key.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &FinancialDatasetsConfig, api_key: Option<SecretString>) -> Result<Self> {
        Ok(Self {
            http: build_http(config.timeout_secs)?,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Sets a custom base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key.expose_secret()),
            None => request,
        }
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let request = self.authorize(self.http.get(&url).query(query));
        let response = request.send().await.map_err(network_error)?;
        read_json(response).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let request = self.authorize(self.http.post(&url).json(body));
        let response = request.send().await.map_err(network_error)?;
        read_json(response).await
    }

    // =========================================================================
    // Prices
    // =========================================================================

    /// Fetches daily price records for a ticker.
    ///
    /// Dates are passed through unvalidated.
    ///
    /// # Errors
    /// Returns a provider error on non-200 and an empty-result error when no
    /// `prices` are returned.
    pub async fn get_prices(
        &self,
        ticker: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<RawRecord>> {
        let body = self
            .get(
                "/prices/",
                &[
                    ("ticker", ticker.to_string()),
                    ("interval", "day".to_string()),
                    ("interval_multiplier", "1".to_string()),
                    ("start_date", start_date.to_string()),
                    ("end_date", end_date.to_string()),
                ],
            )
            .await?;

        let prices = extract_records(body, &["prices"])?;
        tracing::info!("Fetched {} price records for {}", prices.len(), ticker);
        Ok(prices)
    }

    /// Fetches daily prices and normalizes them into a canonical table.
    ///
    /// # Errors
    /// Returns any error from [`Self::get_prices`] or a schema error from
    /// normalization.
    pub async fn get_price_data(
        &self,
        ticker: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<PriceTable> {
        let prices = self.get_prices(ticker, start_date, end_date).await?;
        normalize_equities(&prices)
    }

    // =========================================================================
    // Fundamentals
    // =========================================================================

    /// Fetches financial metrics reported on or before `report_period`.
    ///
    /// # Errors
    /// Returns a provider error on non-200 and an empty-result error when no
    /// `financial_metrics` are returned.
    pub async fn get_financial_metrics(
        &self,
        ticker: &str,
        report_period: &str,
        query: &StatementQuery,
    ) -> Result<Vec<RawRecord>> {
        let body = self
            .get(
                "/financial-metrics/",
                &[
                    ("ticker", ticker.to_string()),
                    ("report_period_lte", report_period.to_string()),
                    ("limit", query.limit.to_string()),
                    ("period", query.period.clone()),
                ],
            )
            .await?;

        extract_records(body, &["financial_metrics"])
    }

    /// Searches statement line items (e.g. `free_cash_flow`) for a ticker.
    ///
    /// # Errors
    /// Returns a provider error on non-200 and an empty-result error when no
    /// `search_results` are returned.
    pub async fn search_line_items(
        &self,
        ticker: &str,
        line_items: &[String],
        query: &StatementQuery,
    ) -> Result<Vec<RawRecord>> {
        let search = LineItemSearch {
            tickers: [ticker],
            line_items,
            period: &query.period,
            limit: query.limit,
        };
        let body = self.post("/financials/search/line-items", &search).await?;

        extract_records(body, &["search_results"])
    }

    /// Fetches insider trades filed on or before `end_date`.
    ///
    /// # Errors
    /// Returns a provider error on non-200 and an empty-result error when no
    /// `insider_trades` are returned.
    pub async fn get_insider_trades(
        &self,
        ticker: &str,
        end_date: &str,
        limit: u32,
    ) -> Result<Vec<RawRecord>> {
        let body = self
            .get(
                "/insider-trades/",
                &[
                    ("ticker", ticker.to_string()),
                    ("filing_date_lte", end_date.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        extract_records(body, &["insider_trades"])
    }

    /// Fetches the company's current market cap.
    ///
    /// Returns `Ok(None)` when the company facts carry no usable market cap.
    ///
    /// # Errors
    /// Returns a provider error on non-200 and an empty-result error when no
    /// `company_facts` are returned.
    pub async fn get_market_cap(&self, ticker: &str) -> Result<Option<f64>> {
        let body = self
            .get("/company/facts", &[("ticker", ticker.to_string())])
            .await?;

        let facts = extract_object(body, &["company_facts"])?;
        let market_cap = coerce_f64(facts.get("market_cap"));
        if market_cap.is_none() {
            tracing::warn!("Company facts for {} carry no market cap", ticker);
        }
        Ok(market_cap)
    }
}
