//! CLI commands for the alpha-feed fetchers and agents.

pub mod fetch;
pub mod sentiment;

pub use fetch::{
    run_crypto_ohlcv, run_financial_metrics, run_insider_trades, run_line_items, run_market_cap,
    run_mentions, run_prices, CryptoOhlcvArgs, FinancialMetricsArgs, InsiderTradesArgs,
    LineItemsArgs, MarketCapArgs, MentionsArgs, PricesArgs,
};
pub use sentiment::{run_sentiment, SentimentArgs};
