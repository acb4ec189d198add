use crate::config::{ICHIMOKU_KIJUN, ICHIMOKU_SPAN_B, ICHIMOKU_TENKAN, SAR_LOOKBACK};
use crate::series::{highest, lowest, round2, tail};
use crate::types::{CloudSignal, IchimokuCloud, ParabolicSar, TrendDirection};

fn midpoint(highs: &[f64], lows: &[f64], n: usize) -> f64 {
    (highest(tail(highs, n)) + lowest(tail(lows, n))) / 2.0
}

/// Ichimoku cloud from the trailing 9/26/52 bar midpoints.
///
/// `None` with fewer than 26 bars. Span B falls back to the whole series
/// while it is shorter than 52 bars. Spans are the current values, not
/// shifted forward.
pub fn ichimoku(highs: &[f64], lows: &[f64], closes: &[f64]) -> Option<IchimokuCloud> {
    let len = highs.len().min(lows.len()).min(closes.len());
    if len < ICHIMOKU_KIJUN {
        return None;
    }

    let tenkan = midpoint(highs, lows, ICHIMOKU_TENKAN);
    let kijun = midpoint(highs, lows, ICHIMOKU_KIJUN);
    let span_a = (tenkan + kijun) / 2.0;
    let span_b = midpoint(highs, lows, ICHIMOKU_SPAN_B.min(len));
    let close = closes[closes.len() - 1];

    let mut signal = if close > span_a && close > span_b {
        CloudSignal::Bullish
    } else if close < span_a && close < span_b {
        CloudSignal::Bearish
    } else {
        CloudSignal::Neutral
    };

    // TK cross confirmed against span B overrides the cloud position
    if tenkan > kijun && close > span_b {
        signal = CloudSignal::Bullish;
    }
    if tenkan < kijun && close < span_b {
        signal = CloudSignal::Bearish;
    }

    Some(IchimokuCloud {
        tenkan: round2(tenkan),
        kijun: round2(kijun),
        span_a: round2(span_a),
        span_b: round2(span_b),
        signal,
    })
}

/// Directional SAR estimate, not the iterative Wilder SAR.
///
/// Trend is UP when the last close is above the previous one. The value trails
/// price: lowest low of the last 5 bars in an uptrend, highest high otherwise.
pub fn parabolic_sar_direction(highs: &[f64], lows: &[f64], closes: &[f64]) -> ParabolicSar {
    let len = closes.len();
    if len < 2 || highs.is_empty() || lows.is_empty() {
        return ParabolicSar { value: 0.0, trend: TrendDirection::Up };
    }

    let trend = if closes[len - 1] > closes[len - 2] {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };
    let value = match trend {
        TrendDirection::Up => lowest(tail(lows, SAR_LOOKBACK)),
        TrendDirection::Down => highest(tail(highs, SAR_LOOKBACK)),
    };

    ParabolicSar { value: round2(value), trend }
}
