//! Enrichment entry point.
//!
//! Takes an upstream [`AnalysisReport`] (possibly partial) plus a fresh candle
//! series and returns a new report with every indicator the data supports
//! filled in. Math overwrites upstream guesses for RSI and stochastic; an
//! upstream OBSERVE is replaced only by a decisive computed action. Running
//! the enrichment twice on its own output with the same candles changes
//! nothing.

use crate::config::{
    INSIGHT_MARKER, MACD_FAST, MACD_SIGNAL, MACD_SLOW, MA_FAST, MA_SLOW, RSI_PERIOD,
    STOCHASTIC_PERIOD,
};
use crate::confidence::{technical_action, trend_confidence};
use crate::insight::market_insight;
use crate::oscillators::{rsi, stochastic_k};
use crate::pivots::{fibonacci_levels, pivot_points};
use crate::series::{ema, sma};
use crate::smart_money::{detect_harmonic_patterns, detect_smart_money};
use crate::trend::{ichimoku, parabolic_sar_direction};
use crate::types::{
    AnalysisReport, Candle, MaPosition, ReferenceBar, SignalBias, TechnicalSignals, TradingAction,
};
use crate::validation::{format_ts, sanitize_series, validate_reference_bar};

struct Columns {
    highs: Vec<f64>,
    lows: Vec<f64>,
    closes: Vec<f64>,
}

impl Columns {
    fn from_candles(candles: &[Candle]) -> Self {
        Columns {
            highs: candles.iter().map(|c| c.high).collect(),
            lows: candles.iter().map(|c| c.low).collect(),
            closes: candles.iter().map(|c| c.close).collect(),
        }
    }
}

fn apply_reference_bar(signals: &mut TechnicalSignals, bar: &ReferenceBar) {
    if let Err(e) = validate_reference_bar(bar) {
        log::warn!("Ignoring reference bar: {}", e);
        return;
    }

    signals.pivot_points = Some(pivot_points(bar));

    // retracement direction needs a real open
    if bar.open != 0.0 {
        signals.fibonacci_levels = Some(fibonacci_levels(bar));
    }
}

fn ma_position(closes: &[f64], period: usize) -> Option<MaPosition> {
    if closes.len() < period {
        return None;
    }
    let last = closes[closes.len() - 1];
    Some(if last > sma(closes, period) { MaPosition::Above } else { MaPosition::Below })
}

/// MACD histogram sign: EMA(12) - EMA(26) against its EMA(9) signal line.
fn macd_bias(closes: &[f64]) -> Option<SignalBias> {
    if closes.len() < MACD_SLOW + MACD_SIGNAL {
        return None;
    }
    let line: Vec<f64> = ema(closes, MACD_FAST)
        .iter()
        .zip(ema(closes, MACD_SLOW))
        .map(|(fast, slow)| fast - slow)
        .collect();
    let signal = ema(&line, MACD_SIGNAL);
    let histogram = line.last()? - signal.last()?;
    Some(if histogram > 0.0 {
        SignalBias::Bullish
    } else if histogram < 0.0 {
        SignalBias::Bearish
    } else {
        SignalBias::Neutral
    })
}

fn apply_series(signals: &mut TechnicalSignals, series: &[Candle]) {
    let Columns { highs, lows, closes } = Columns::from_candles(series);

    if closes.len() >= RSI_PERIOD {
        signals.rsi = rsi(&closes, RSI_PERIOD);
        signals.stochastic = stochastic_k(&highs, &lows, &closes, STOCHASTIC_PERIOD);
    }

    if let Some(cloud) = ichimoku(&highs, &lows, &closes) {
        signals.ichimoku = Some(cloud);
    }

    if let Some(pos) = ma_position(&closes, MA_FAST) {
        signals.ma50 = pos;
    }
    if let Some(pos) = ma_position(&closes, MA_SLOW) {
        signals.ma200 = pos;
    }

    if signals.macd == SignalBias::Neutral {
        if let Some(bias) = macd_bias(&closes) {
            signals.macd = bias;
        }
    }

    signals.sar = Some(parabolic_sar_direction(&highs, &lows, &closes));
    signals.smart_money = Some(detect_smart_money(series));
    signals.harmonic_patterns = Some(detect_harmonic_patterns(series));

    log::debug!(
        "Indicators over {} candles (last {}): rsi={:.2} stoch={:.2} ichimoku={}",
        series.len(),
        format_ts(series[series.len() - 1].timestamp),
        signals.rsi,
        signals.stochastic,
        signals.ichimoku.is_some()
    );
}

/// Fills in and cross-verifies `report` from `candles` and an optional
/// previous-period bar. Invalid candles are dropped, the rest are sorted and
/// deduplicated before any computation. Never fails.
pub fn enrich(
    report: &AnalysisReport,
    candles: &[Candle],
    reference: Option<&ReferenceBar>,
) -> AnalysisReport {
    let mut out = report.clone();
    let signals = &mut out.technical_signals;

    if let Some(bar) = reference {
        apply_reference_bar(signals, bar);
    }

    let series = sanitize_series(candles);
    if !series.is_empty() {
        apply_series(signals, &series);
    }

    signals.confidence_score = Some(trend_confidence(signals));

    let computed = technical_action(signals);
    if out.trading_action == TradingAction::Observe && computed.is_decisive() {
        log::info!("Upstream action OBSERVE overridden by computed {:?}", computed);
        out.trading_action = computed;
    }

    if !out.technical_summary.contains(INSIGHT_MARKER) {
        let insight = market_insight(&out.technical_signals);
        out.technical_summary = if out.technical_summary.is_empty() {
            format!("{INSIGHT_MARKER} {insight}")
        } else {
            format!("{}\n\n{INSIGHT_MARKER} {insight}", out.technical_summary)
        };
    }

    out
}

/// Signals computed from scratch, with no upstream bundle.
pub fn analyze(candles: &[Candle], reference: Option<&ReferenceBar>) -> TechnicalSignals {
    enrich(&AnalysisReport::default(), candles, reference).technical_signals
}
