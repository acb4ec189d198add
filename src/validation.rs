//! Boundary checks for candle input.
//!
//! The indicator functions assume finite, positive, ascending, deduplicated
//! candles. [`sanitize_series`] repairs a series into that shape and is what
//! the enrichment entry point uses; [`validate_series`] reports the first
//! violation instead.

use thiserror::Error;

use crate::types::{Candle, ReferenceBar};

#[derive(Debug, Error, PartialEq)]
pub enum CandleError {
    #[error("non-finite {field} at ts={timestamp}")]
    NonFinite { timestamp: i64, field: &'static str },

    #[error("non-positive {field} at ts={timestamp}: {value}")]
    NonPositive { timestamp: i64, field: &'static str, value: f64 },

    #[error("inconsistent OHLC at ts={timestamp}: open={open} high={high} low={low} close={close}")]
    InconsistentRange { timestamp: i64, open: f64, high: f64, low: f64, close: f64 },
}

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("empty candle series")]
    Empty,

    #[error("invalid candle at index {index}: {source}")]
    Candle {
        index: usize,
        #[source]
        source: CandleError,
    },

    #[error("non-ascending timestamp at index {index}: {timestamp} <= {previous}")]
    NonAscending { index: usize, timestamp: i64, previous: i64 },
}

fn check_prices(timestamp: i64, fields: [(&'static str, f64); 4]) -> Result<(), CandleError> {
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(CandleError::NonFinite { timestamp, field });
        }
        if value <= 0.0 {
            return Err(CandleError::NonPositive { timestamp, field, value });
        }
    }
    Ok(())
}

pub fn validate_candle(c: &Candle) -> Result<(), CandleError> {
    check_prices(
        c.timestamp,
        [("open", c.open), ("high", c.high), ("low", c.low), ("close", c.close)],
    )?;

    if c.low > c.high
        || c.low > c.open
        || c.low > c.close
        || c.high < c.open
        || c.high < c.close
    {
        return Err(CandleError::InconsistentRange {
            timestamp: c.timestamp,
            open: c.open,
            high: c.high,
            low: c.low,
            close: c.close,
        });
    }
    Ok(())
}

/// `open` may be zero (unknown); pivots then fall back to the close.
pub fn validate_reference_bar(bar: &ReferenceBar) -> Result<(), CandleError> {
    let open = if bar.open == 0.0 { bar.close } else { bar.open };
    let as_candle = Candle { timestamp: 0, open, high: bar.high, low: bar.low, close: bar.close };
    validate_candle(&as_candle)
}

/// Strict check: every candle valid, timestamps strictly ascending.
pub fn validate_series(candles: &[Candle]) -> Result<(), SeriesError> {
    if candles.is_empty() {
        return Err(SeriesError::Empty);
    }
    for (index, c) in candles.iter().enumerate() {
        validate_candle(c).map_err(|source| SeriesError::Candle { index, source })?;
        if index > 0 && c.timestamp <= candles[index - 1].timestamp {
            return Err(SeriesError::NonAscending {
                index,
                timestamp: c.timestamp,
                previous: candles[index - 1].timestamp,
            });
        }
    }
    Ok(())
}

/// Drops invalid candles, sorts ascending and deduplicates by timestamp. When
/// a timestamp repeats, the later occurrence wins (a live update of the bar).
pub fn sanitize_series(candles: &[Candle]) -> Vec<Candle> {
    let mut out: Vec<Candle> = Vec::with_capacity(candles.len());
    for c in candles {
        match validate_candle(c) {
            Ok(()) => out.push(*c),
            Err(e) => log::warn!("Dropping candle {}: {}", format_ts(c.timestamp), e),
        }
    }

    // stable: equal timestamps keep input order, so the last one is the newest
    out.sort_by_key(|c| c.timestamp);

    let mut deduped: Vec<Candle> = Vec::with_capacity(out.len());
    for c in out {
        if deduped.last().map(|l| l.timestamp) == Some(c.timestamp) {
            if let Some(last) = deduped.last_mut() {
                *last = c;
            }
        } else {
            deduped.push(c);
        }
    }

    if deduped.len() != candles.len() {
        log::debug!("Sanitized series: {} -> {} candles", candles.len(), deduped.len());
    }
    deduped
}

pub(crate) fn format_ts(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}
