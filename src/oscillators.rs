use crate::config::{RSI_NEUTRAL, STOCHASTIC_NEUTRAL};
use crate::series::{highest, lowest, round2, tail};

/// RSI with Wilder's smoothing.
///
/// The first `period` changes are averaged plainly, every later change is
/// folded in with `avg = (avg * (period - 1) + x) / period`. Returns 50 with
/// fewer than `period + 1` closes and 100 when the average loss is zero.
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return RSI_NEUTRAL;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for w in closes[..=period].windows(2) {
        let change = w[1] - w[0];
        if change > 0.0 { gains += change } else { losses -= change }
    }

    let p = period as f64;
    let mut avg_gain = gains / p;
    let mut avg_loss = losses / p;

    for w in closes[period..].windows(2) {
        let change = w[1] - w[0];
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        avg_gain = (avg_gain * (p - 1.0) + gain) / p;
        avg_loss = (avg_loss * (p - 1.0) + loss) / p;
    }

    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    round2(100.0 - 100.0 / (1.0 + rs))
}

/// Stochastic %K over the trailing `period` bars.
///
/// Returns 50 when any input is shorter than `period` or the window is flat.
pub fn stochastic_k(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> f64 {
    if period == 0 || highs.len() < period || lows.len() < period || closes.len() < period {
        return STOCHASTIC_NEUTRAL;
    }

    let highest_high = highest(tail(highs, period));
    let lowest_low = lowest(tail(lows, period));
    if highest_high == lowest_low {
        return STOCHASTIC_NEUTRAL;
    }

    let close = closes[closes.len() - 1];
    round2((close - lowest_low) / (highest_high - lowest_low) * 100.0)
}
