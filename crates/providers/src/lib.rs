//! HTTP clients for the upstream data providers.
//!
//! - [`FinancialDatasetsClient`]: equities prices, financial metrics, line
//!   items, insider trades, market cap
//! - [`CoinMarketCapClient`]: crypto OHLCV by contract address
//! - [`TwitterClient`]: recent-search mentions, also a [`SentimentSource`]
//!
//! Each fetch is a single request. Nothing is retried, paginated, or cached.
//!
//! [`SentimentSource`]: alpha_feed_core::SentimentSource

pub mod client;
pub mod coinmarketcap;
pub mod financial_datasets;
pub mod twitter;

pub use client::{extract_array, extract_object, extract_records};
pub use coinmarketcap::{CoinMarketCapClient, OhlcvQuery};
pub use financial_datasets::{
    FinancialDatasetsClient, StatementQuery, DEFAULT_INSIDER_TRADES_LIMIT,
};
pub use twitter::{Tweet, TwitterClient};
