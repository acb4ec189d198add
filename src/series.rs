/// Mean of the last `period` values. Returns 0.0 when there is not enough data.
pub fn sma(data: &[f64], period: usize) -> f64 {
    if period == 0 || data.len() < period {
        return 0.0;
    }
    data[data.len() - period..].iter().sum::<f64>() / period as f64
}

/// Full-length EMA, seeded with the first value. Multiplier = 2 / (period + 1).
pub fn ema(data: &[f64], period: usize) -> Vec<f64> {
    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(data.len());
    let mut iter = data.iter();
    if let Some(&first) = iter.next() {
        out.push(first);
        let mut prev = first;
        for &value in iter {
            prev = value * k + prev * (1.0 - k);
            out.push(prev);
        }
    }
    out
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn highest(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

pub(crate) fn lowest(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Trailing window of at most `n` elements.
pub(crate) fn tail<T>(values: &[T], n: usize) -> &[T] {
    &values[values.len().saturating_sub(n)..]
}
