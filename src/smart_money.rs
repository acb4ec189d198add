use crate::config::{FVG_WINDOW, ORDER_BLOCK_IMPULSE_MULT, ORDER_BLOCK_MAX, ORDER_BLOCK_WINDOW};
use crate::series::tail;
use crate::types::{Candle, Direction, FairValueGap, HarmonicPattern, OrderBlock, Significance, SmartMoney};

fn body(c: &Candle) -> f64 {
    (c.close - c.open).abs()
}

fn is_bullish(c: &Candle) -> bool {
    c.close > c.open
}

fn is_bearish(c: &Candle) -> bool {
    c.close < c.open
}

/// Order blocks in the last 20 candles, most recent first, at most 2.
///
/// Bullish OB: the bearish candle right before a bullish impulse candle whose
/// body is more than 2× the previous body. Bearish OB is the mirror case.
/// The block spans the opposing candle's full high/low range.
pub fn detect_order_blocks(candles: &[Candle]) -> Vec<OrderBlock> {
    let window = tail(candles, ORDER_BLOCK_WINDOW);
    let mut blocks = Vec::with_capacity(ORDER_BLOCK_MAX);

    for i in (1..window.len()).rev() {
        let prev = &window[i - 1];
        let impulse = &window[i];
        if body(impulse) <= body(prev) * ORDER_BLOCK_IMPULSE_MULT {
            continue;
        }

        let kind = if is_bullish(impulse) && is_bearish(prev) {
            Direction::Bullish
        } else if is_bearish(impulse) && is_bullish(prev) {
            Direction::Bearish
        } else {
            continue;
        };

        blocks.push(OrderBlock {
            kind,
            top: prev.high,
            bottom: prev.low,
            significance: Significance::High,
        });
        if blocks.len() == ORDER_BLOCK_MAX {
            break;
        }
    }
    blocks
}

/// Three-candle imbalances in the last 10 candles, most recent first.
///
/// Bullish FVG: c3.low > c1.high  →  zone = [c1.high, c3.low]
/// Bearish FVG: c3.high < c1.low  →  zone = [c3.high, c1.low]
pub fn detect_fair_value_gaps(candles: &[Candle]) -> Vec<FairValueGap> {
    let window = tail(candles, FVG_WINDOW);
    let mut gaps = Vec::new();
    if window.len() < 3 {
        return gaps;
    }

    for j in (0..window.len() - 2).rev() {
        let c1 = &window[j];
        let c3 = &window[j + 2];

        if c3.low > c1.high {
            gaps.push(FairValueGap {
                kind: Direction::Bullish,
                top: c3.low,
                bottom: c1.high,
                is_filled: false,
            });
        } else if c3.high < c1.low {
            gaps.push(FairValueGap {
                kind: Direction::Bearish,
                top: c1.low,
                bottom: c3.high,
                is_filled: false,
            });
        }
    }
    gaps
}

pub fn detect_smart_money(candles: &[Candle]) -> SmartMoney {
    SmartMoney {
        order_blocks: detect_order_blocks(candles),
        fair_value_gaps: detect_fair_value_gaps(candles),
    }
}

/// A bullish gap is filled once price trades below its bottom, a bearish gap
/// once price trades above its top.
pub fn check_fvg_filled(gap: &FairValueGap, current_price: f64) -> bool {
    match gap.kind {
        Direction::Bullish => current_price < gap.bottom,
        Direction::Bearish => current_price > gap.top,
    }
}

/// Fill tracking for callers that keep gaps across refreshes. Already filled
/// gaps stay filled.
pub fn mark_filled_gaps(gaps: &mut [FairValueGap], current_price: f64) -> usize {
    let mut newly_filled = 0;
    for gap in gaps.iter_mut().filter(|g| !g.is_filled) {
        if check_fvg_filled(gap, current_price) {
            gap.is_filled = true;
            newly_filled += 1;
        }
    }
    newly_filled
}

/// Harmonic pattern detection (Gartley, Bat, Butterfly, ...) is not
/// implemented; the hook exists so the output contract carries the field.
pub fn detect_harmonic_patterns(_candles: &[Candle]) -> Vec<HarmonicPattern> {
    Vec::new()
}
