//! Human-readable dump of agent output.
//!
//! Only a closed set of shapes can be rendered: scalars, sequences, mappings,
//! and time-indexed tables. Types opt in by implementing [`ToReport`]; there
//! is no fallback to a debug string for anything else.

use crate::signal::{AgentMessage, SignalResult};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Width of the centered agent name in the banner.
const BANNER_NAME_WIDTH: usize = 28;
/// Width of the closing rule.
const RULE_WIDTH: usize = 48;

/// A renderable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// A JSON scalar: null, bool, number, or string
    Scalar(Value),
    Sequence(Vec<Report>),
    Mapping(BTreeMap<String, Report>),
    /// Column-major table keyed by an index label per row
    Table {
        columns: Vec<String>,
        index: Vec<String>,
        /// `values[row][column]`; `None` renders as null
        values: Vec<Vec<Option<f64>>>,
    },
}

impl Report {
    /// Builds a scalar report.
    pub fn scalar(value: impl Into<Value>) -> Self {
        Self::Scalar(value.into())
    }

    /// Converts the report into JSON.
    ///
    /// Tables become `{column: {index: value}}`; a repeated index label keeps
    /// the last row's value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::Sequence(items) => Value::Array(items.iter().map(Report::to_json).collect()),
            Self::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Self::Table {
                columns,
                index,
                values,
            } => {
                let mut out = Map::new();
                for (col_idx, column) in columns.iter().enumerate() {
                    let mut series = Map::new();
                    for (label, row) in index.iter().zip(values) {
                        let cell = row
                            .get(col_idx)
                            .copied()
                            .flatten()
                            .map_or(Value::Null, Value::from);
                        series.insert(label.clone(), cell);
                    }
                    out.insert(column.clone(), Value::Object(series));
                }
                Value::Object(out)
            }
        }
    }
}

impl From<&Value> for Report {
    fn from(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::Sequence(items.iter().map(Report::from).collect()),
            Value::Object(map) => Self::Mapping(
                map.iter()
                    .map(|(key, value)| (key.clone(), Report::from(value)))
                    .collect(),
            ),
            scalar => Self::Scalar(scalar.clone()),
        }
    }
}

/// Types that can be rendered in a reasoning dump.
pub trait ToReport {
    fn to_report(&self) -> Report;
}

impl ToReport for Report {
    fn to_report(&self) -> Report {
        self.clone()
    }
}

impl ToReport for Value {
    fn to_report(&self) -> Report {
        Report::from(self)
    }
}

impl ToReport for f64 {
    fn to_report(&self) -> Report {
        Report::scalar(*self)
    }
}

impl ToReport for String {
    fn to_report(&self) -> Report {
        Report::scalar(self.as_str())
    }
}

impl<T: ToReport> ToReport for Option<T> {
    fn to_report(&self) -> Report {
        self.as_ref()
            .map_or(Report::Scalar(Value::Null), ToReport::to_report)
    }
}

impl<T: ToReport> ToReport for [T] {
    fn to_report(&self) -> Report {
        Report::Sequence(self.iter().map(ToReport::to_report).collect())
    }
}

impl<T: ToReport> ToReport for Vec<T> {
    fn to_report(&self) -> Report {
        self.as_slice().to_report()
    }
}

impl ToReport for AgentMessage {
    fn to_report(&self) -> Report {
        Report::Mapping(BTreeMap::from([
            ("signal".to_string(), Report::scalar(self.signal.as_str())),
            ("confidence".to_string(), Report::scalar(self.confidence)),
            ("reasoning".to_string(), Report::scalar(self.reasoning.as_str())),
        ]))
    }
}

impl ToReport for SignalResult {
    fn to_report(&self) -> Report {
        Report::Mapping(BTreeMap::from([
            ("direction".to_string(), Report::scalar(self.direction.as_str())),
            ("confidence".to_string(), Report::scalar(self.confidence)),
            ("rationale".to_string(), Report::scalar(self.rationale.as_str())),
        ]))
    }
}

fn banner(agent_name: &str) -> String {
    let rule = "=".repeat(10);
    format!(
        "\n{rule} {agent_name:^width$} {rule}",
        width = BANNER_NAME_WIDTH
    )
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Renders structured agent output between banner lines.
#[must_use]
pub fn render_agent_reasoning(output: &dyn ToReport, agent_name: &str) -> String {
    let body = pretty(&output.to_report().to_json());
    format!("{}\n{}\n{}", banner(agent_name), body, "=".repeat(RULE_WIDTH))
}

/// Renders textual agent output, pretty-printing it when it is JSON.
#[must_use]
pub fn render_agent_text(text: &str, agent_name: &str) -> String {
    let body = match serde_json::from_str::<Value>(text) {
        Ok(parsed) => pretty(&parsed),
        Err(_) => text.to_string(),
    };
    format!("{}\n{}\n{}", banner(agent_name), body, "=".repeat(RULE_WIDTH))
}

/// Prints [`render_agent_reasoning`] to stdout.
pub fn show_agent_reasoning(output: &dyn ToReport, agent_name: &str) {
    println!("{}", render_agent_reasoning(output, agent_name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Direction;
    use serde_json::json;

    #[test]
    fn banner_centers_agent_name() {
        let rendered = render_agent_text("plain", "sentiment_agent");
        let header = rendered.lines().nth(1).unwrap();
        assert_eq!(header.len(), 10 + 1 + 28 + 1 + 10);
        assert!(header.starts_with("========== "));
        assert!(header.ends_with(" =========="));
        assert!(header.contains("      sentiment_agent       "));
    }

    #[test]
    fn closing_rule_is_48_wide() {
        let rendered = render_agent_text("plain", "agent");
        assert_eq!(rendered.lines().last().unwrap(), "=".repeat(48));
    }

    #[test]
    fn text_that_is_json_is_pretty_printed() {
        let rendered = render_agent_text(r#"{"signal":"bullish"}"#, "agent");
        assert!(rendered.contains("{\n  \"signal\": \"bullish\"\n}"));
    }

    #[test]
    fn text_that_is_not_json_is_printed_verbatim() {
        let rendered = render_agent_text("not { json", "agent");
        assert!(rendered.contains("\nnot { json\n"));
    }

    #[test]
    fn agent_message_renders_fixed_keys() {
        let message = AgentMessage {
            signal: Direction::Bearish,
            confidence: 1.0,
            reasoning: "Sentiment score: -1.0".to_string(),
        };
        let json = message.to_report().to_json();
        assert_eq!(
            json,
            json!({"signal": "bearish", "confidence": 1.0, "reasoning": "Sentiment score: -1.0"})
        );
    }

    #[test]
    fn table_renders_column_major() {
        let report = Report::Table {
            columns: vec!["close".to_string(), "open".to_string()],
            index: vec!["2024-01-02".to_string(), "2024-01-03".to_string()],
            values: vec![vec![Some(10.0), Some(9.5)], vec![None, Some(10.5)]],
        };

        assert_eq!(
            report.to_json(),
            json!({
                "close": {"2024-01-02": 10.0, "2024-01-03": null},
                "open": {"2024-01-02": 9.5, "2024-01-03": 10.5},
            })
        );
    }

    #[test]
    fn nested_json_round_trips_through_report() {
        let value = json!({"items": [1, "two", null, {"three": true}]});
        assert_eq!(value.to_report().to_json(), value);
    }

    #[test]
    fn option_and_sequence_reports() {
        let values: Vec<Option<f64>> = vec![Some(1.5), None];
        assert_eq!(values.to_report().to_json(), json!([1.5, null]));
    }
}
