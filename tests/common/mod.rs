#![allow(dead_code)]

use proptest::prelude::*;
use xau_confluence::Candle;

pub const START_TS: i64 = 1_735_689_600; // 2025-01-01 00:00:00 UTC
pub const STEP_SECS: i64 = 3_600;

/// Closes rising (or falling) linearly from `start` to `end` over `n` bars.
/// Each bar opens at the previous close and has no wicks.
pub fn linear_series(n: usize, start: f64, end: f64) -> Vec<Candle> {
    let step = if n > 1 { (end - start) / (n - 1) as f64 } else { 0.0 };
    let mut prev_close = start;
    (0..n)
        .map(|i| {
            let close = start + step * i as f64;
            let open = prev_close;
            prev_close = close;
            Candle {
                timestamp: START_TS + i as i64 * STEP_SECS,
                open,
                high: open.max(close),
                low: open.min(close),
                close,
            }
        })
        .collect()
}

pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

fn valid_candle() -> impl Strategy<Value = Candle> {
    (
        1_500.0f64..3_000.0, // base price (XAU range)
        -1.0f64..1.0,        // body as a fraction of the range
        0.1f64..25.0,        // range
        0.0f64..5.0,         // wick
    )
        .prop_map(|(base, body, range, wick)| {
            let open = base;
            let close = base + body * range;
            Candle {
                timestamp: 0, // overwritten in candle_series
                open,
                high: open.max(close) + wick,
                low: open.min(close) - wick,
                close,
            }
        })
}

/// Valid, ascending, deduplicated candle series.
pub fn candle_series(len: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = Vec<Candle>> {
    prop::collection::vec(valid_candle(), len).prop_map(|mut candles| {
        for (i, c) in candles.iter_mut().enumerate() {
            c.timestamp = START_TS + i as i64 * STEP_SECS;
        }
        candles
    })
}

/// Strictly monotone closes: positive increments accumulated from `base`.
pub fn monotone_closes(len: std::ops::RangeInclusive<usize>, rising: bool) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.01f64..10.0, len).prop_map(move |steps| {
        let mut price = 5_000.0;
        let mut out = vec![price];
        for s in steps {
            price += if rising { s } else { -s };
            out.push(price);
        }
        out
    })
}
