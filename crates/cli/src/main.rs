use alpha_feed_core::config_loader::DEFAULT_CONFIG_PATH;
use alpha_feed_core::ConfigLoader;
use anyhow::Context;
use clap::{Parser, Subcommand};

mod commands;

use commands::{
    CryptoOhlcvArgs, FinancialMetricsArgs, InsiderTradesArgs, LineItemsArgs, MarketCapArgs,
    MentionsArgs, PricesArgs, SentimentArgs,
};

#[derive(Parser)]
#[command(name = "alpha-feed")]
#[command(about = "Fetch market, fundamentals and sentiment data", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch daily equity prices
    Prices(PricesArgs),
    /// Fetch historical crypto OHLCV quotes by contract address
    CryptoOhlcv(CryptoOhlcvArgs),
    /// Fetch financial metrics
    FinancialMetrics(FinancialMetricsArgs),
    /// Search financial statement line items
    LineItems(LineItemsArgs),
    /// Fetch insider trades
    InsiderTrades(InsiderTradesArgs),
    /// Fetch current market cap
    MarketCap(MarketCapArgs),
    /// Search recent social-media mentions
    Mentions(MentionsArgs),
    /// Run the sentiment agent and print its signal
    Sentiment(SentimentArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Keys may live in a local .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let resolved = ConfigLoader::resolve(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config))?;

    match cli.command {
        Commands::Prices(args) => commands::run_prices(resolved, args).await?,
        Commands::CryptoOhlcv(args) => commands::run_crypto_ohlcv(resolved, args).await?,
        Commands::FinancialMetrics(args) => {
            commands::run_financial_metrics(resolved, args).await?;
        }
        Commands::LineItems(args) => commands::run_line_items(resolved, args).await?,
        Commands::InsiderTrades(args) => commands::run_insider_trades(resolved, args).await?,
        Commands::MarketCap(args) => commands::run_market_cap(resolved, args).await?,
        Commands::Mentions(args) => commands::run_mentions(resolved, args).await?,
        Commands::Sentiment(args) => commands::run_sentiment(resolved, args).await?,
    }

    Ok(())
}
