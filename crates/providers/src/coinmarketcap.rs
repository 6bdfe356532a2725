//! Crypto-market provider client (historical OHLCV by contract address).

use crate::client::{build_http, extract_records, network_error, read_json};
use alpha_feed_core::{CoinMarketCapConfig, Result};
use alpha_feed_data::{normalize_crypto_ohlcv, PriceTable, RawRecord, QUOTE_CURRENCY};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

const OHLCV_PATH: &str = "/v2/cryptocurrency/ohlcv/historical";

/// Bar interval and number of bars for an OHLCV request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OhlcvQuery {
    /// `daily`, `hourly`, `weekly`, ...
    pub interval: String,
    pub count: u32,
}

impl Default for OhlcvQuery {
    fn default() -> Self {
        Self {
            interval: "daily".to_string(),
            count: 500,
        }
    }
}

/// Crypto-market REST client.
pub struct CoinMarketCapClient {
    http: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl std::fmt::Debug for CoinMarketCapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinMarketCapClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl CoinMarketCapClient {
    /// Creates a client from configuration and an optional API key.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &CoinMarketCapConfig, api_key: Option<SecretString>) -> Result<Self> {
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

    /// Fetches historical OHLCV quotes for a token contract.
    ///
    /// # Errors
    /// Returns a provider error on non-200 and an empty-result error when
    /// `data.quotes` is absent or empty.
    pub async fn get_crypto_ohlcv(
        &self,
        contract_address: &str,
        start_date: &str,
        end_date: &str,
        query: &OhlcvQuery,
    ) -> Result<Vec<RawRecord>> {
        let url = format!("{}{}", self.base_url, OHLCV_PATH);
        tracing::debug!("GET {}", url);

        let params = [
            ("contract_address", contract_address.to_string()),
            ("time_period", query.interval.clone()),
            ("time_start", start_date.to_string()),
            ("time_end", end_date.to_string()),
            ("count", query.count.to_string()),
            ("convert", QUOTE_CURRENCY.to_string()),
            ("skip_invalid", "true".to_string()),
        ];

        let mut request = self.http.get(&url).query(&params);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key.expose_secret());
        }

        let response = request.send().await.map_err(network_error)?;
        let body = read_json(response).await?;

        let quotes = extract_records(body, &["data", "quotes"])?;
        tracing::info!("Fetched {} OHLCV quotes for {}", quotes.len(), contract_address);
        Ok(quotes)
    }

    /// Fetches OHLCV quotes and normalizes them into a canonical table.
    ///
    /// # Errors
    /// Returns any error from [`Self::get_crypto_ohlcv`] or a schema error
    /// when a quote lacks `quote.USD` fields.
    pub async fn get_crypto_price_data(
        &self,
        contract_address: &str,
        start_date: &str,
        end_date: &str,
        query: &OhlcvQuery,
    ) -> Result<PriceTable> {
        let quotes = self
            .get_crypto_ohlcv(contract_address, start_date, end_date, query)
            .await?;
        normalize_crypto_ohlcv(&quotes)
    }
}
