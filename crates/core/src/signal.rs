//! Signal and agent-message types.
//!
//! A [`SignalResult`] is the classification an analyst produces; an
//! [`AgentMessage`] is the `{signal, confidence, reasoning}` mapping it is
//! published as.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Expect price to go up
    Bullish,
    /// Expect price to go down (or no evidence it will go up)
    Bearish,
}

impl Direction {
    /// Returns the lowercase label used in agent messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a signal classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    /// The predicted direction
    pub direction: Direction,
    /// Non-negative confidence; not clamped to [0, 1]
    pub confidence: f64,
    /// Human-readable explanation embedding the raw input
    pub rationale: String,
}

/// The message an analyst agent publishes for downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMessage {
    pub signal: Direction,
    pub confidence: f64,
    pub reasoning: String,
}

impl From<SignalResult> for AgentMessage {
    fn from(result: SignalResult) -> Self {
        Self {
            signal: result.direction,
            confidence: result.confidence,
            reasoning: result.rationale,
        }
    }
}

impl AgentMessage {
    /// Serializes the message to the JSON text carried in a [`NamedMessage`].
    ///
    /// # Errors
    /// Returns error if the message cannot be serialized.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Wraps the message in a named envelope.
    ///
    /// # Errors
    /// Returns error if the message cannot be serialized.
    pub fn into_named(self, name: impl Into<String>) -> Result<NamedMessage> {
        Ok(NamedMessage {
            name: name.into(),
            content: self.to_json()?,
        })
    }
}

/// A message envelope: the producing agent's name plus JSON content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedMessage {
    pub name: String,
    pub content: String,
}

/// A single social-media post used as sentiment evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentObservation {
    /// Provider-assigned post id
    pub id: Option<String>,
    /// Author identifier
    pub author_id: Option<String>,
    /// When the post was created
    pub created_at: Option<DateTime<Utc>>,
    /// Post body
    pub text: String,
}

impl SentimentObservation {
    /// Creates an observation with only text set.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            id: None,
            author_id: None,
            created_at: None,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Bullish).unwrap(), "\"bullish\"");
        assert_eq!(serde_json::to_string(&Direction::Bearish).unwrap(), "\"bearish\"");
        assert_eq!(Direction::Bullish.to_string(), "bullish");
    }

    #[test]
    fn agent_message_has_fixed_keys() {
        let message = AgentMessage::from(SignalResult {
            direction: Direction::Bullish,
            confidence: 2.5,
            rationale: "Sentiment score: 2.5".to_string(),
        });

        let value: serde_json::Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();
        assert_eq!(value["signal"], "bullish");
        assert_eq!(value["confidence"], 2.5);
        assert_eq!(value["reasoning"], "Sentiment score: 2.5");
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn named_message_wraps_json_content() {
        let named = AgentMessage {
            signal: Direction::Bearish,
            confidence: 1.0,
            reasoning: "Sentiment score: -1.0".to_string(),
        }
        .into_named("sentiment_agent")
        .unwrap();

        assert_eq!(named.name, "sentiment_agent");
        let round: AgentMessage = serde_json::from_str(&named.content).unwrap();
        assert_eq!(round.signal, Direction::Bearish);
    }
}
