//! Technical analysis and confidence scoring for gold/silver candle series.
//!
//! Pure, synchronous computation: a candle series (and optionally a
//! previous-period reference bar) goes in, a [`TechnicalSignals`] bundle with
//! classical indicators, smart-money structures and a regime-weighted
//! confidence score comes out. [`enrich`] is the entry point that merges the
//! computed values into an upstream [`AnalysisReport`].

pub mod config;
pub mod confidence;
pub mod enrichment;
pub mod insight;
pub mod oscillators;
pub mod pivots;
pub mod series;
pub mod smart_money;
pub mod trend;
pub mod types;
pub mod validation;

pub use confidence::{technical_action, trend_confidence, weight_table};
pub use enrichment::{analyze, enrich};
pub use types::{AnalysisReport, Candle, ReferenceBar, TechnicalSignals, TradingAction};
pub use validation::{CandleError, SeriesError};
