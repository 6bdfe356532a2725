//! Market data normalization.
//!
//! This crate provides:
//! - Raw record shapes returned by upstream providers
//! - The canonical, time-ordered price table
//! - Normalizers from each raw shape to the canonical table

pub mod models;
pub mod normalizer;

// Re-export models
pub use models::{into_raw_records, Column, PriceBar, PriceTable, RawRecord, RawRecordShape};

// Re-export normalizers
pub use normalizer::{
    coerce_f64, normalize, normalize_crypto_ohlcv, normalize_equities, parse_timestamp,
    QUOTE_CURRENCY,
};
