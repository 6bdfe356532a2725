//! Shared state passed between analyst agents.
//!
//! Agents never mutate the state they are given in place; they return a
//! [`StateUpdate`] which is folded in with [`AgentState::apply`]: messages
//! are appended, `data` and `metadata` are shallow-merged with the update
//! winning on key collisions.

use crate::error::{FeedError, Result};
use crate::signal::{AgentMessage, NamedMessage};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which per-agent signals are stored in `data`.
pub const ANALYST_SIGNALS_KEY: &str = "analyst_signals";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub messages: Vec<NamedMessage>,
    pub data: Map<String, Value>,
    pub metadata: Map<String, Value>,
}

/// Partial state produced by one agent step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub messages: Vec<NamedMessage>,
    pub data: Map<String, Value>,
    pub metadata: Map<String, Value>,
}

/// Shallow merge: keys from `b` overwrite keys from `a`.
#[must_use]
pub fn merge_dicts(mut a: Map<String, Value>, b: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in b {
        a.insert(key, value);
    }
    a
}

impl AgentState {
    /// Seeds a state with the standard analyst inputs.
    pub fn new(
        ticker: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        let mut data = Map::new();
        data.insert("ticker".to_string(), Value::String(ticker.into()));
        data.insert("start_date".to_string(), Value::String(start_date.into()));
        data.insert("end_date".to_string(), Value::String(end_date.into()));
        data.insert(ANALYST_SIGNALS_KEY.to_string(), Value::Object(Map::new()));

        Self {
            messages: Vec::new(),
            data,
            metadata: Map::new(),
        }
    }

    /// Folds an agent's update into this state.
    pub fn apply(&mut self, update: StateUpdate) {
        self.messages.extend(update.messages);
        self.data = merge_dicts(std::mem::take(&mut self.data), update.data);
        self.metadata = merge_dicts(std::mem::take(&mut self.metadata), update.metadata);
    }

    /// Returns the ticker under analysis.
    #[must_use]
    pub fn ticker(&self) -> Option<&str> {
        self.data_str("ticker")
    }

    #[must_use]
    pub fn start_date(&self) -> Option<&str> {
        self.data_str("start_date")
    }

    #[must_use]
    pub fn end_date(&self) -> Option<&str> {
        self.data_str("end_date")
    }

    /// Returns the ticker or a `MissingInput` error.
    ///
    /// # Errors
    /// Returns error if `data.ticker` is absent or not a string.
    pub fn require_ticker(&self) -> Result<&str> {
        self.ticker()
            .ok_or_else(|| FeedError::MissingInput("data.ticker".to_string()))
    }

    /// Reads a metadata flag, treating anything but `true` as false.
    #[must_use]
    pub fn metadata_flag(&self, key: &str) -> bool {
        self.metadata.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Returns the signal an agent previously recorded.
    #[must_use]
    pub fn analyst_signal(&self, agent_name: &str) -> Option<AgentMessage> {
        let signal = self.data.get(ANALYST_SIGNALS_KEY)?.get(agent_name)?;
        serde_json::from_value(signal.clone()).ok()
    }

    /// Stores `message` under `data.analyst_signals.<agent_name>`.
    ///
    /// Creates the `analyst_signals` mapping when it is absent or not a mapping.
    ///
    /// # Errors
    /// Returns error if the message cannot be serialized.
    pub fn record_analyst_signal(&mut self, agent_name: &str, message: &AgentMessage) -> Result<()> {
        let value = serde_json::to_value(message)?;
        let signals = self
            .data
            .entry(ANALYST_SIGNALS_KEY.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !signals.is_object() {
            *signals = Value::Object(Map::new());
        }
        if let Value::Object(map) = signals {
            map.insert(agent_name.to_string(), value);
        }
        Ok(())
    }

    fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}
