//! Sentiment command: runs the sentiment agent end to end.

use alpha_feed_core::{render_agent_text, AgentState, ResolvedConfig};
use alpha_feed_providers::TwitterClient;
use alpha_feed_signals::{SentimentAgent, SentimentLexicon, SENTIMENT_AGENT_NAME};
use anyhow::{Context, Result};
use clap::Args;

/// Arguments for the sentiment command.
#[derive(Args, Debug, Clone)]
pub struct SentimentArgs {
    /// Ticker symbol (e.g., "BTC")
    #[arg(long)]
    pub ticker: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: String,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: String,

    /// Print the agent's reasoning as it runs
    #[arg(long, default_value_t = false)]
    pub show_reasoning: bool,
}

/// Runs the sentiment command.
///
/// # Errors
/// Returns an error if the mentions fetch fails.
pub async fn run_sentiment(resolved: ResolvedConfig, args: SentimentArgs) -> Result<()> {
    let lexicon = SentimentLexicon::from_config(&resolved.app.twitter);
    let source = TwitterClient::new(&resolved.app.twitter, resolved.credentials.twitter_bearer)
        .context("Failed to create social-media client")?;

    let agent = SentimentAgent::new(source, lexicon).with_show_reasoning(args.show_reasoning);

    let mut state = AgentState::new(args.ticker, args.start_date, args.end_date);
    let update = agent.run(&state).await?;
    state.apply(update);

    let message = state
        .messages
        .iter()
        .rev()
        .find(|message| message.name == SENTIMENT_AGENT_NAME)
        .context("Sentiment agent produced no message")?;

    if let Some(summary) = summary_output(args.show_reasoning, &message.content) {
        println!("{summary}");
    }
    Ok(())
}

/// Final signal text, or `None` when the agent already printed its reasoning.
fn summary_output(show_reasoning: bool, content: &str) -> Option<String> {
    (!show_reasoning).then(|| render_agent_text(content, SENTIMENT_AGENT_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = r#"{"BTC":{"signal":"bullish","confidence":75.0}}"#;

    #[test]
    fn test_summary_printed_without_reasoning() {
        let summary = summary_output(false, CONTENT).unwrap();
        assert_eq!(summary, render_agent_text(CONTENT, SENTIMENT_AGENT_NAME));
        assert!(summary.contains("bullish"));
    }

    #[test]
    fn test_summary_skipped_when_reasoning_shown() {
        assert!(summary_output(true, CONTENT).is_none());
    }
}
