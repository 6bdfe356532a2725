//! Sentiment scoring and the sentiment analyst agent.
//!
//! The pipeline is deliberately thin: keyword hits per post, a mean across
//! posts, and a sign-based classification into a bullish/bearish signal.

pub mod agent;
pub mod sentiment;

pub use agent::{SentimentAgent, SENTIMENT_AGENT_NAME, SHOW_REASONING_KEY};
pub use sentiment::{calculate_sentiment_signal, classify_score, SentimentLexicon};
