//! Data models for market data normalization.
//!
//! Numeric values are `f64`; a value the upstream could not provide is `None`.

pub mod price_bar;
pub mod raw;

pub use price_bar::{Column, PriceBar, PriceTable};
pub use raw::{into_raw_records, RawRecord, RawRecordShape};
