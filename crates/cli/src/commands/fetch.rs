//! Provider fetch commands.
//!
//! Each command issues one fetch and prints the result through the
//! reasoning dump, titled with the command name.

use alpha_feed_core::{render_agent_reasoning, ResolvedConfig, ToReport};
use alpha_feed_data::RawRecord;
use alpha_feed_providers::{
    CoinMarketCapClient, FinancialDatasetsClient, OhlcvQuery, StatementQuery, TwitterClient,
    DEFAULT_INSIDER_TRADES_LIMIT,
};
use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

/// Arguments for the prices command.
#[derive(Args, Debug, Clone)]
pub struct PricesArgs {
    /// Ticker symbol (e.g., "AAPL")
    #[arg(long)]
    pub ticker: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: String,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: String,

    /// Print raw provider records instead of the normalized table
    #[arg(long, default_value_t = false)]
    pub raw: bool,
}

/// Arguments for the crypto-ohlcv command.
#[derive(Args, Debug, Clone)]
pub struct CryptoOhlcvArgs {
    /// Token contract address
    #[arg(long)]
    pub contract_address: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: String,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: String,

    /// Bar interval
    #[arg(long, default_value = "daily")]
    pub interval: String,

    /// Maximum number of bars
    #[arg(long, default_value_t = 500)]
    pub count: u32,

    /// Print raw provider records instead of the normalized table
    #[arg(long, default_value_t = false)]
    pub raw: bool,
}

/// Statement period and limit shared by the fundamentals commands.
#[derive(Args, Debug, Clone)]
pub struct StatementArgs {
    /// Reporting period (ttm, annual, quarterly)
    #[arg(long, default_value = "ttm")]
    pub period: String,

    /// Number of periods
    #[arg(long, default_value_t = 1)]
    pub limit: u32,
}

impl From<&StatementArgs> for StatementQuery {
    fn from(args: &StatementArgs) -> Self {
        StatementQuery::default()
            .with_period(args.period.clone())
            .with_limit(args.limit)
    }
}

/// Arguments for the financial-metrics command.
#[derive(Args, Debug, Clone)]
pub struct FinancialMetricsArgs {
    /// Ticker symbol
    #[arg(long)]
    pub ticker: String,

    /// Latest report period to include (YYYY-MM-DD)
    #[arg(long)]
    pub report_period: String,

    #[command(flatten)]
    pub statement: StatementArgs,
}

/// Arguments for the line-items command.
#[derive(Args, Debug, Clone)]
pub struct LineItemsArgs {
    /// Ticker symbol
    #[arg(long)]
    pub ticker: String,

    /// Line items to search (comma-separated, e.g. "free_cash_flow,net_income")
    #[arg(long, value_delimiter = ',', required = true)]
    pub items: Vec<String>,

    #[command(flatten)]
    pub statement: StatementArgs,
}

/// Arguments for the insider-trades command.
#[derive(Args, Debug, Clone)]
pub struct InsiderTradesArgs {
    /// Ticker symbol
    #[arg(long)]
    pub ticker: String,

    /// Latest filing date to include (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: String,

    /// Number of trades
    #[arg(long, default_value_t = DEFAULT_INSIDER_TRADES_LIMIT)]
    pub limit: u32,
}

/// Arguments for the market-cap command.
#[derive(Args, Debug, Clone)]
pub struct MarketCapArgs {
    /// Ticker symbol
    #[arg(long)]
    pub ticker: String,
}

/// Arguments for the mentions command.
#[derive(Args, Debug, Clone)]
pub struct MentionsArgs {
    /// Ticker symbol (aliases from config are added to the query)
    #[arg(long)]
    pub ticker: String,
}

fn records_value(records: Vec<RawRecord>) -> Value {
    Value::Array(records.into_iter().map(Value::Object).collect())
}

fn print_report(output: &dyn ToReport, title: &str) {
    println!("{}", render_agent_reasoning(output, title));
}

fn financial_datasets(resolved: ResolvedConfig) -> Result<FinancialDatasetsClient> {
    FinancialDatasetsClient::new(
        &resolved.app.financial_datasets,
        resolved.credentials.financial_datasets,
    )
    .context("Failed to create financial-data client")
}

/// Runs the prices command.
///
/// # Errors
/// Returns an error if the fetch or normalization fails.
pub async fn run_prices(resolved: ResolvedConfig, args: PricesArgs) -> Result<()> {
    let client = financial_datasets(resolved)?;

    if args.raw {
        let prices = client
            .get_prices(&args.ticker, &args.start_date, &args.end_date)
            .await?;
        print_report(&records_value(prices), "prices");
        return Ok(());
    }

    let table = client
        .get_price_data(&args.ticker, &args.start_date, &args.end_date)
        .await?;
    tracing::info!("{} rows for {}", table.len(), args.ticker);
    print_report(&table, "prices");
    Ok(())
}

/// Runs the crypto-ohlcv command.
///
/// # Errors
/// Returns an error if the fetch or normalization fails.
pub async fn run_crypto_ohlcv(resolved: ResolvedConfig, args: CryptoOhlcvArgs) -> Result<()> {
    let client = CoinMarketCapClient::new(
        &resolved.app.coinmarketcap,
        resolved.credentials.coinmarketcap,
    )
    .context("Failed to create crypto-market client")?;

    let query = OhlcvQuery {
        interval: args.interval,
        count: args.count,
    };

    if args.raw {
        let quotes = client
            .get_crypto_ohlcv(&args.contract_address, &args.start_date, &args.end_date, &query)
            .await?;
        print_report(&records_value(quotes), "crypto-ohlcv");
        return Ok(());
    }

    let table = client
        .get_crypto_price_data(&args.contract_address, &args.start_date, &args.end_date, &query)
        .await?;
    tracing::info!("{} rows for {}", table.len(), args.contract_address);
    print_report(&table, "crypto-ohlcv");
    Ok(())
}

/// Runs the financial-metrics command.
///
/// # Errors
/// Returns an error if the fetch fails.
pub async fn run_financial_metrics(
    resolved: ResolvedConfig,
    args: FinancialMetricsArgs,
) -> Result<()> {
    let client = financial_datasets(resolved)?;
    let query = StatementQuery::from(&args.statement);
    let metrics = client
        .get_financial_metrics(&args.ticker, &args.report_period, &query)
        .await?;
    print_report(&records_value(metrics), "financial-metrics");
    Ok(())
}

/// Runs the line-items command.
///
/// # Errors
/// Returns an error if the search fails.
pub async fn run_line_items(resolved: ResolvedConfig, args: LineItemsArgs) -> Result<()> {
    let client = financial_datasets(resolved)?;
    let query = StatementQuery::from(&args.statement);
    let results = client
        .search_line_items(&args.ticker, &args.items, &query)
        .await?;
    print_report(&records_value(results), "line-items");
    Ok(())
}

/// Runs the insider-trades command.
///
/// # Errors
/// Returns an error if the fetch fails.
pub async fn run_insider_trades(resolved: ResolvedConfig, args: InsiderTradesArgs) -> Result<()> {
    let client = financial_datasets(resolved)?;
    let trades = client
        .get_insider_trades(&args.ticker, &args.end_date, args.limit)
        .await?;
    print_report(&records_value(trades), "insider-trades");
    Ok(())
}

/// Runs the market-cap command.
///
/// # Errors
/// Returns an error if the fetch fails.
pub async fn run_market_cap(resolved: ResolvedConfig, args: MarketCapArgs) -> Result<()> {
    let client = financial_datasets(resolved)?;
    let market_cap = client.get_market_cap(&args.ticker).await?;
    print_report(&market_cap, "market-cap");
    Ok(())
}

/// Runs the mentions command.
///
/// # Errors
/// Returns an error if the search fails.
pub async fn run_mentions(resolved: ResolvedConfig, args: MentionsArgs) -> Result<()> {
    let client = TwitterClient::new(&resolved.app.twitter, resolved.credentials.twitter_bearer)
        .context("Failed to create social-media client")?;

    tracing::info!("Searching: {}", client.mentions_query(&args.ticker));
    let tweets = client.get_mentions(&args.ticker).await?;
    let value = serde_json::to_value(&tweets).context("Failed to serialize posts")?;
    print_report(&value, "mentions");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn test_statement_args_into_query() {
        let args = StatementArgs {
            period: "annual".to_string(),
            limit: 3,
        };
        let query: StatementQuery = (&args).into();
        assert_eq!(query.period, "annual");
        assert_eq!(query.limit, 3);
    }

    #[test]
    fn test_records_value_keeps_order() {
        let mut first = Map::new();
        first.insert("ticker".to_string(), json!("AAPL"));
        let mut second = Map::new();
        second.insert("ticker".to_string(), json!("MSFT"));

        let value = records_value(vec![first, second]);
        assert_eq!(value, json!([{"ticker": "AAPL"}, {"ticker": "MSFT"}]));
    }
}
