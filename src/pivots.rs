use crate::config::{CAMARILLA_MULT, FIB_PIVOT_RATIOS, FIB_RATIOS};
use crate::series::round2;
use crate::types::{FibonacciLevels, PivotLevelSet, PivotPoints, ReferenceBar, TrendDirection};

impl PivotLevelSet {
    fn rounded(self) -> Self {
        PivotLevelSet {
            pivot: round2(self.pivot),
            r1: round2(self.r1),
            r2: round2(self.r2),
            r3: round2(self.r3),
            r4: self.r4.map(round2),
            s1: round2(self.s1),
            s2: round2(self.s2),
            s3: round2(self.s3),
            s4: self.s4.map(round2),
        }
    }
}

pub fn classic_pivots(high: f64, low: f64, close: f64) -> PivotLevelSet {
    let p = (high + low + close) / 3.0;
    let range = high - low;
    PivotLevelSet {
        pivot: p,
        r1: 2.0 * p - low,
        r2: p + range,
        r3: p + 2.0 * range,
        r4: None,
        s1: 2.0 * p - high,
        s2: p - range,
        s3: p - 2.0 * range,
        s4: None,
    }
}

pub fn woodie_pivots(high: f64, low: f64, close: f64) -> PivotLevelSet {
    let p = (high + low + 2.0 * close) / 4.0;
    let range = high - low;
    PivotLevelSet {
        pivot: p,
        r1: 2.0 * p - low,
        r2: p + range,
        r3: high + 2.0 * (p - low),
        r4: None,
        s1: 2.0 * p - high,
        s2: p - range,
        s3: low - 2.0 * (high - p),
        s4: None,
    }
}

/// Camarilla levels hang off the close. The pivot slot carries the classic
/// pivot since Camarilla has no central level of its own.
pub fn camarilla_pivots(high: f64, low: f64, close: f64) -> PivotLevelSet {
    let band = (high - low) * CAMARILLA_MULT;
    PivotLevelSet {
        pivot: (high + low + close) / 3.0,
        r1: close + band / 12.0,
        r2: close + band / 6.0,
        r3: close + band / 4.0,
        r4: Some(close + band / 2.0),
        s1: close - band / 12.0,
        s2: close - band / 6.0,
        s3: close - band / 4.0,
        s4: None,
    }
}

pub fn fibonacci_pivots(high: f64, low: f64, close: f64) -> PivotLevelSet {
    let p = (high + low + close) / 3.0;
    let range = high - low;
    let [f1, f2, f3] = FIB_PIVOT_RATIOS;
    PivotLevelSet {
        pivot: p,
        r1: p + range * f1,
        r2: p + range * f2,
        r3: p + range * f3,
        r4: None,
        s1: p - range * f1,
        s2: p - range * f2,
        s3: p - range * f3,
        s4: None,
    }
}

/// All four pivot variants for the bar, rounded to 2 decimals.
pub fn pivot_points(bar: &ReferenceBar) -> PivotPoints {
    let ReferenceBar { high, low, close, .. } = *bar;
    PivotPoints {
        classic: classic_pivots(high, low, close).rounded(),
        woodie: woodie_pivots(high, low, close).rounded(),
        camarilla: camarilla_pivots(high, low, close).rounded(),
        fibonacci: fibonacci_pivots(high, low, close).rounded(),
    }
}

/// Retracement levels inside the bar's range.
///
/// An up bar (`close >= open`) measures pullbacks down from the high; a down
/// bar measures bounces up from the low.
pub fn fibonacci_levels(bar: &ReferenceBar) -> FibonacciLevels {
    let diff = bar.high - bar.low;
    let trend = if bar.close >= bar.open { TrendDirection::Up } else { TrendDirection::Down };
    let level = |ratio: f64| {
        round2(match trend {
            TrendDirection::Up => bar.high - diff * ratio,
            TrendDirection::Down => bar.low + diff * ratio,
        })
    };
    let [l236, l382, l500, l618] = FIB_RATIOS;
    FibonacciLevels {
        level236: level(l236),
        level382: level(l382),
        level500: level(l500),
        level618: level(l618),
        trend,
    }
}
