//! Canonical price rows and the time-ordered table built from them.
//!
//! Every upstream shape (equities bars, crypto OHLCV quotes) is normalized
//! into [`PriceBar`] rows collected in a [`PriceTable`].

use alpha_feed_core::{Report, ToReport};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One canonical OHLCV row.
///
/// Numeric fields are `None` when the upstream value was missing or could not
/// be read as a number. `market_cap` is only carried by crypto quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
    pub market_cap: Option<f64>,
}

impl PriceBar {
    /// Returns the value of a numeric column.
    #[must_use]
    pub fn get(&self, column: Column) -> Option<f64> {
        match column {
            Column::Open => self.open,
            Column::High => self.high,
            Column::Low => self.low,
            Column::Close => self.close,
            Column::Volume => self.volume,
            Column::MarketCap => self.market_cap,
        }
    }
}

/// Numeric columns of a [`PriceTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Open,
    High,
    Low,
    Close,
    Volume,
    MarketCap,
}

impl Column {
    /// The five OHLCV columns shared by every shape.
    pub const OHLCV: [Column; 5] = [
        Column::Open,
        Column::High,
        Column::Low,
        Column::Close,
        Column::Volume,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Open => "open",
            Column::High => "high",
            Column::Low => "low",
            Column::Close => "close",
            Column::Volume => "volume",
            Column::MarketCap => "market_cap",
        }
    }
}

/// Rows ordered ascending by timestamp.
///
/// Equal timestamps are kept, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPriceTable")]
pub struct PriceTable {
    rows: Vec<PriceBar>,
}

#[derive(Deserialize)]
struct RawPriceTable {
    rows: Vec<PriceBar>,
}

impl From<RawPriceTable> for PriceTable {
    fn from(raw: RawPriceTable) -> Self {
        Self::from_rows(raw.rows)
    }
}

impl PriceTable {
    /// Builds a table, sorting rows by timestamp.
    #[must_use]
    pub fn from_rows(mut rows: Vec<PriceBar>) -> Self {
        // Stable: duplicates stay in arrival order.
        rows.sort_by_key(|row| row.timestamp);
        Self { rows }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn rows(&self) -> &[PriceBar] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceBar> {
        self.rows.iter()
    }

    #[must_use]
    pub fn first(&self) -> Option<&PriceBar> {
        self.rows.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&PriceBar> {
        self.rows.last()
    }

    /// Returns the ordering key of every row.
    #[must_use]
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.rows.iter().map(|row| row.timestamp).collect()
    }

    /// Returns one numeric column in row order.
    #[must_use]
    pub fn column(&self, column: Column) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row.get(column)).collect()
    }

    #[must_use]
    pub fn closes(&self) -> Vec<Option<f64>> {
        self.column(Column::Close)
    }

    /// Returns true if any row carries a market cap.
    #[must_use]
    pub fn has_market_cap(&self) -> bool {
        self.rows.iter().any(|row| row.market_cap.is_some())
    }

    pub fn into_rows(self) -> Vec<PriceBar> {
        self.rows
    }
}

impl IntoIterator for PriceTable {
    type Item = PriceBar;
    type IntoIter = std::vec::IntoIter<PriceBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a PriceTable {
    type Item = &'a PriceBar;
    type IntoIter = std::slice::Iter<'a, PriceBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl ToReport for PriceTable {
    fn to_report(&self) -> Report {
        let mut columns: Vec<Column> = Column::OHLCV.to_vec();
        if self.has_market_cap() {
            columns.push(Column::MarketCap);
        }

        Report::Table {
            columns: columns.iter().map(|c| c.as_str().to_string()).collect(),
            index: self
                .rows
                .iter()
                .map(|row| row.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true))
                .collect(),
            values: self
                .rows
                .iter()
                .map(|row| columns.iter().map(|c| row.get(*c)).collect())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn bar(day: u32, close: Option<f64>) -> PriceBar {
        PriceBar {
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            open: Some(1.0),
            high: Some(2.0),
            low: Some(0.5),
            close,
            volume: Some(100.0),
            market_cap: None,
        }
    }

    #[test]
    fn deserialize_sorts_rows() {
        let unsorted = json!({"rows": [bar(3, Some(3.0)), bar(1, Some(1.0)), bar(2, Some(2.0))]});
        let table: PriceTable = serde_json::from_value(unsorted).unwrap();
        assert_eq!(table.closes(), vec![Some(1.0), Some(2.0), Some(3.0)]);

        let round_trip: PriceTable =
            serde_json::from_value(serde_json::to_value(&table).unwrap()).unwrap();
        assert_eq!(round_trip, table);
    }

    #[test]
    fn from_rows_sorts_ascending() {
        let table = PriceTable::from_rows(vec![bar(3, Some(3.0)), bar(1, Some(1.0)), bar(2, Some(2.0))]);
        assert_eq!(table.closes(), vec![Some(1.0), Some(2.0), Some(3.0)]);
        assert!(table.timestamps().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn duplicate_timestamps_are_kept_in_input_order() {
        let table = PriceTable::from_rows(vec![bar(2, Some(20.0)), bar(1, Some(1.0)), bar(2, Some(21.0))]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.closes(), vec![Some(1.0), Some(20.0), Some(21.0)]);
    }

    #[test]
    fn empty_table() {
        let table = PriceTable::default();
        assert!(table.is_empty());
        assert!(table.first().is_none());
        assert!(table.last().is_none());
    }

    #[test]
    fn report_omits_market_cap_for_equities() {
        let table = PriceTable::from_rows(vec![bar(1, None)]);
        let json = table.to_report().to_json();
        assert_eq!(json["close"], json!({"2024-01-01T00:00:00Z": null}));
        assert_eq!(json["open"], json!({"2024-01-01T00:00:00Z": 1.0}));
        assert!(json.get("market_cap").is_none());
    }

    #[test]
    fn report_includes_market_cap_when_present() {
        let mut row = bar(1, Some(1.0));
        row.market_cap = Some(5.0e9);
        let json = PriceTable::from_rows(vec![row]).to_report().to_json();
        assert_eq!(json["market_cap"]["2024-01-01T00:00:00Z"], json!(5.0e9));
    }
}
