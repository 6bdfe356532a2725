//! Sentiment analyst agent.

use crate::sentiment::{calculate_sentiment_signal, classify_score, SentimentLexicon};
use alpha_feed_core::{
    show_agent_reasoning, AgentMessage, AgentState, Result, SentimentSource, StateUpdate,
    ANALYST_SIGNALS_KEY,
};
use serde_json::Map;

/// Name the agent publishes its message and analyst signal under.
pub const SENTIMENT_AGENT_NAME: &str = "sentiment_agent";

/// Metadata key that turns on the reasoning dump.
pub const SHOW_REASONING_KEY: &str = "show_reasoning";

/// Scores social-media sentiment for the ticker in the agent state.
pub struct SentimentAgent<S> {
    source: S,
    lexicon: SentimentLexicon,
    show_reasoning: bool,
}

impl<S: SentimentSource> SentimentAgent<S> {
    pub fn new(source: S, lexicon: SentimentLexicon) -> Self {
        Self {
            source,
            lexicon,
            show_reasoning: false,
        }
    }

    /// Forces the reasoning dump on regardless of state metadata.
    #[must_use]
    pub fn with_show_reasoning(mut self, show_reasoning: bool) -> Self {
        self.show_reasoning = show_reasoning;
        self
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs one analysis step.
    ///
    /// Reads `ticker`, `start_date` and `end_date` from `state.data`, fetches
    /// observations, and returns an update carrying the agent message plus
    /// `data` with the signal recorded under `analyst_signals`.
    ///
    /// # Errors
    /// Returns `MissingInput` if the state has no ticker, or any error from
    /// the sentiment source.
    pub async fn run(&self, state: &AgentState) -> Result<StateUpdate> {
        let ticker = state.require_ticker()?;

        let observations = self
            .source
            .fetch_observations(ticker, state.start_date(), state.end_date())
            .await?;

        let score = calculate_sentiment_signal(&observations, &self.lexicon);
        let result = classify_score(score);
        tracing::info!(
            ticker,
            source = self.source.name(),
            observations = observations.len(),
            score,
            direction = %result.direction,
            "sentiment scored"
        );

        let message = AgentMessage::from(result);

        if self.show_reasoning || state.metadata_flag(SHOW_REASONING_KEY) {
            show_agent_reasoning(&message, SENTIMENT_AGENT_NAME);
        }

        let mut next = state.clone();
        next.record_analyst_signal(SENTIMENT_AGENT_NAME, &message)?;

        let mut data = Map::new();
        if let Some(signals) = next.data.remove(ANALYST_SIGNALS_KEY) {
            data.insert(ANALYST_SIGNALS_KEY.to_string(), signals);
        }

        Ok(StateUpdate {
            messages: vec![message.into_named(SENTIMENT_AGENT_NAME)?],
            data,
            metadata: Map::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_feed_core::{Direction, FeedError, SentimentObservation};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct StaticSource {
        texts: Vec<&'static str>,
        calls: Mutex<Vec<(String, Option<String>, Option<String>)>>,
    }

    impl StaticSource {
        fn new(texts: Vec<&'static str>) -> Self {
            Self {
                texts,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SentimentSource for StaticSource {
        async fn fetch_observations(
            &self,
            ticker: &str,
            start_date: Option<&str>,
            end_date: Option<&str>,
        ) -> Result<Vec<SentimentObservation>> {
            self.calls.lock().unwrap().push((
                ticker.to_string(),
                start_date.map(str::to_string),
                end_date.map(str::to_string),
            ));
            Ok(self.texts.iter().map(|t| SentimentObservation::from_text(*t)).collect())
        }

        fn name(&self) -> &str {
            "static"
        }
    }

    struct FailingSource;

    #[async_trait]
    impl SentimentSource for FailingSource {
        async fn fetch_observations(
            &self,
            _ticker: &str,
            _start_date: Option<&str>,
            _end_date: Option<&str>,
        ) -> Result<Vec<SentimentObservation>> {
            Err(FeedError::provider(401, "Unauthorized"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_run_publishes_message_and_signal() {
        let source = StaticSource::new(vec!["BTC is amazing", "so happy", "I hate mondays"]);
        let agent = SentimentAgent::new(source, SentimentLexicon::default());
        let mut state = AgentState::new("BTC", "2024-01-01", "2024-01-07");

        let update = agent.run(&state).await.unwrap();

        assert_eq!(update.messages.len(), 1);
        assert_eq!(update.messages[0].name, SENTIMENT_AGENT_NAME);
        let content: Value = serde_json::from_str(&update.messages[0].content).unwrap();
        assert_eq!(content["signal"], json!("bullish"));
        assert!(content["reasoning"]
            .as_str()
            .unwrap()
            .starts_with("Sentiment score: 0.333"));

        state.apply(update);
        let signal = state.analyst_signal(SENTIMENT_AGENT_NAME).unwrap();
        assert_eq!(signal.signal, Direction::Bullish);
        assert!((signal.confidence - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(state.ticker(), Some("BTC"));
        assert_eq!(state.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_run_forwards_inputs_to_source() {
        let agent = SentimentAgent::new(StaticSource::new(vec![]), SentimentLexicon::default());
        let state = AgentState::new("AAPL", "2024-02-01", "2024-02-29");

        agent.run(&state).await.unwrap();

        let calls = agent.source().calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[(
                "AAPL".to_string(),
                Some("2024-02-01".to_string()),
                Some("2024-02-29".to_string())
            )]
        );
    }

    #[tokio::test]
    async fn test_no_observations_is_bearish_zero() {
        let agent = SentimentAgent::new(StaticSource::new(vec![]), SentimentLexicon::default());
        let mut state = AgentState::new("ETH", "2024-01-01", "2024-01-07");

        let update = agent.run(&state).await.unwrap();
        state.apply(update);

        let signal = state.analyst_signal(SENTIMENT_AGENT_NAME).unwrap();
        assert_eq!(signal.signal, Direction::Bearish);
        assert_eq!(signal.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_existing_signals_are_preserved() {
        let agent = SentimentAgent::new(StaticSource::new(vec!["worst"]), SentimentLexicon::default());
        let mut state = AgentState::new("BTC", "2024-01-01", "2024-01-07");
        let other = AgentMessage {
            signal: Direction::Bullish,
            confidence: 0.8,
            reasoning: "fundamentals".to_string(),
        };
        state.record_analyst_signal("fundamentals_agent", &other).unwrap();

        let update = agent.run(&state).await.unwrap();
        state.apply(update);

        assert_eq!(state.analyst_signal("fundamentals_agent"), Some(other));
        assert_eq!(
            state.analyst_signal(SENTIMENT_AGENT_NAME).map(|m| m.signal),
            Some(Direction::Bearish)
        );
    }

    #[tokio::test]
    async fn test_missing_ticker_is_missing_input() {
        let agent = SentimentAgent::new(StaticSource::new(vec![]), SentimentLexicon::default());
        let err = agent.run(&AgentState::default()).await.unwrap_err();
        assert!(matches!(err, FeedError::MissingInput(ref field) if field == "data.ticker"));
    }

    #[tokio::test]
    async fn test_source_error_propagates() {
        let agent = SentimentAgent::new(FailingSource, SentimentLexicon::default());
        let state = AgentState::new("BTC", "2024-01-01", "2024-01-07");

        let err = agent.run(&state).await.unwrap_err();
        assert_eq!(err.status_code(), Some(401));
    }
}
