//! Regime-weighted confidence scoring.
//!
//! Every indicator casts a vote in `[-1, 1]`; the vote is scaled by the weight
//! the current [`Regime`] assigns to that indicator and added to a neutral
//! baseline of 50. The sum is clamped to `[0, 100]` before it is labelled.

use crate::config::{
    regime_weights, Regime, RegimeWeights, ACTION_BUY, ACTION_SELL, LABEL_BEARISH, LABEL_BULLISH,
    LABEL_VERY_BEARISH, LABEL_VERY_BULLISH, RSI_EXTREME_HIGH, RSI_EXTREME_LOW, RSI_NEUTRAL,
    RSI_OVERBOUGHT, RSI_OVERSOLD, SCORE_BASELINE, STOCHASTIC_OVERBOUGHT, STOCHASTIC_OVERSOLD,
};
use crate::types::{
    CloudSignal, ConfidenceLabel, ConfidenceScore, Direction, MaPosition, SignalBias,
    TechnicalSignals, TradingAction,
};

/// Weight table for the regime implied by the bundle's ADX.
pub fn weight_table(signals: &TechnicalSignals) -> &'static RegimeWeights {
    regime_weights(Regime::from_adx(signals.adx))
}

/// Healthy bands count fully with the trend. Either extreme is a stretched
/// market and costs half a vote.
fn rsi_vote(rsi: f64) -> f64 {
    if rsi >= RSI_OVERBOUGHT || rsi <= RSI_OVERSOLD {
        -0.5
    } else if rsi > RSI_NEUTRAL {
        1.0
    } else if rsi < RSI_NEUTRAL {
        -1.0
    } else {
        0.0
    }
}

fn stochastic_vote(k: f64) -> f64 {
    if k >= STOCHASTIC_OVERBOUGHT {
        -1.0
    } else if k <= STOCHASTIC_OVERSOLD {
        1.0
    } else {
        0.0
    }
}

fn ma_vote(position: MaPosition) -> f64 {
    match position {
        MaPosition::Above => 1.0,
        MaPosition::Below => -1.0,
    }
}

fn bias_vote(bias: SignalBias) -> f64 {
    match bias {
        SignalBias::Bullish => 1.0,
        SignalBias::Bearish => -1.0,
        SignalBias::Neutral => 0.0,
    }
}

fn ichimoku_vote(signals: &TechnicalSignals) -> f64 {
    match signals.ichimoku.map(|c| c.signal) {
        Some(CloudSignal::Bullish) => 1.0,
        Some(CloudSignal::Bearish) => -1.0,
        _ => 0.0,
    }
}

fn smart_money_vote(signals: &TechnicalSignals) -> f64 {
    let Some(smc) = &signals.smart_money else { return 0.0 };
    let mut vote = 0.0;
    if smc.has_order_block(Direction::Bullish) {
        vote += 1.0;
    }
    if smc.has_order_block(Direction::Bearish) {
        vote -= 1.0;
    }
    vote
}

/// Unclamped weighted sum around the baseline.
pub fn raw_score(signals: &TechnicalSignals, w: &RegimeWeights) -> f64 {
    SCORE_BASELINE
        + rsi_vote(signals.rsi) * w.rsi
        + stochastic_vote(signals.stochastic) * w.stochastic
        + ma_vote(signals.ma50) * w.ma50
        + ma_vote(signals.ma200) * w.ma200
        + ichimoku_vote(signals) * w.ichimoku
        + smart_money_vote(signals) * w.smart_money
        + bias_vote(signals.macd) * w.macd
}

pub fn label_for(score: u8) -> ConfidenceLabel {
    if score >= LABEL_VERY_BULLISH {
        ConfidenceLabel::VeryBullish
    } else if score >= LABEL_BULLISH {
        ConfidenceLabel::Bullish
    } else if score <= LABEL_VERY_BEARISH {
        ConfidenceLabel::VeryBearish
    } else if score <= LABEL_BEARISH {
        ConfidenceLabel::Bearish
    } else {
        ConfidenceLabel::Neutral
    }
}

pub fn trend_confidence(signals: &TechnicalSignals) -> ConfidenceScore {
    let raw = raw_score(signals, weight_table(signals));
    let score = raw.clamp(0.0, 100.0).round() as u8;
    ConfidenceScore { score, label: label_for(score) }
}

/// Action implied by the composite score.
///
/// Extreme RSI (>= 85 or <= 15) turns the action into WARNING, unless the
/// market is trending and the score already points the same way as the
/// extreme; that is momentum continuation and keeps BUY/SELL.
pub fn technical_action(signals: &TechnicalSignals) -> TradingAction {
    let score = trend_confidence(signals).score;
    let by_score = if score >= ACTION_BUY {
        TradingAction::Buy
    } else if score <= ACTION_SELL {
        TradingAction::Sell
    } else {
        TradingAction::Observe
    };

    let overbought = signals.rsi >= RSI_EXTREME_HIGH;
    let oversold = signals.rsi <= RSI_EXTREME_LOW;
    if overbought || oversold {
        let continuation = Regime::from_adx(signals.adx) == Regime::Trending
            && ((overbought && by_score == TradingAction::Buy)
                || (oversold && by_score == TradingAction::Sell));
        if !continuation {
            return TradingAction::Warning;
        }
    }
    by_score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RANGING_WEIGHTS, TRENDING_WEIGHTS};
    use crate::types::{IchimokuCloud, OrderBlock, Significance, SmartMoney};

    fn signals(rsi: f64, adx: f64, ma50: MaPosition, ma200: MaPosition) -> TechnicalSignals {
        TechnicalSignals { rsi, adx, ma50, ma200, ..TechnicalSignals::default() }
    }

    fn all_bullish(adx: f64) -> TechnicalSignals {
        TechnicalSignals {
            rsi: 60.0,
            stochastic: 10.0,
            adx,
            macd: SignalBias::Bullish,
            ma50: MaPosition::Above,
            ma200: MaPosition::Above,
            ichimoku: Some(IchimokuCloud {
                tenkan: 1.0,
                kijun: 1.0,
                span_a: 1.0,
                span_b: 1.0,
                signal: CloudSignal::Bullish,
            }),
            smart_money: Some(SmartMoney {
                order_blocks: vec![OrderBlock {
                    kind: Direction::Bullish,
                    top: 1.0,
                    bottom: 0.5,
                    significance: Significance::High,
                }],
                fair_value_gaps: vec![],
            }),
            ..TechnicalSignals::default()
        }
    }

    fn all_bearish(adx: f64) -> TechnicalSignals {
        let mut s = all_bullish(adx);
        s.rsi = 40.0;
        s.stochastic = 90.0;
        s.macd = SignalBias::Bearish;
        s.ma50 = MaPosition::Below;
        s.ma200 = MaPosition::Below;
        if let Some(cloud) = s.ichimoku.as_mut() {
            cloud.signal = CloudSignal::Bearish;
        }
        if let Some(smc) = s.smart_money.as_mut() {
            smc.order_blocks[0].kind = Direction::Bearish;
        }
        s
    }

    #[test]
    fn neutral_bundle_scores_baseline() {
        let mut s = TechnicalSignals::default();
        s.ma50 = MaPosition::Above;
        s.ma200 = MaPosition::Above;
        // rsi 50, stochastic 50, macd neutral -> only the MAs vote
        let ranging = trend_confidence(&s);
        assert_eq!(ranging.score, 65);
        assert_eq!(ranging.label, ConfidenceLabel::Bullish);
    }

    #[test]
    fn extremes_are_clamped() {
        for adx in [5.0, 40.0] {
            let bull = trend_confidence(&all_bullish(adx));
            assert_eq!(bull.score, 100);
            assert_eq!(bull.label, ConfidenceLabel::VeryBullish);
            let bear = trend_confidence(&all_bearish(adx));
            assert_eq!(bear.score, 0);
            assert_eq!(bear.label, ConfidenceLabel::VeryBearish);
        }
        assert!(raw_score(&all_bullish(40.0), &TRENDING_WEIGHTS) > 100.0);
    }

    #[test]
    fn regime_changes_weights_and_label() {
        let ranging = signals(45.0, 10.0, MaPosition::Above, MaPosition::Above);
        let trending = signals(45.0, 30.0, MaPosition::Above, MaPosition::Above);
        assert_eq!(weight_table(&ranging), &RANGING_WEIGHTS);
        assert_eq!(weight_table(&trending), &TRENDING_WEIGHTS);
        assert_ne!(weight_table(&ranging), weight_table(&trending));

        // ranging: 50 - 15 + 10 + 5 = 50, trending: 50 - 5 + 20 + 15 = 80
        assert_eq!(trend_confidence(&ranging).label, ConfidenceLabel::Neutral);
        assert_eq!(trend_confidence(&trending).label, ConfidenceLabel::VeryBullish);
    }

    #[test]
    fn rsi_extremes_both_cost_half_weight() {
        let w = &RANGING_WEIGHTS;
        let mut s = signals(50.0, 0.0, MaPosition::Above, MaPosition::Below);
        let base = raw_score(&s, w);
        assert_eq!(base, SCORE_BASELINE + w.ma50 - w.ma200);

        s.rsi = 75.0;
        assert_eq!(raw_score(&s, w), base - w.rsi / 2.0);
        // oversold is a warning too, not a bullish vote
        s.rsi = 25.0;
        assert_eq!(raw_score(&s, w), 47.5);
        assert!(raw_score(&s, w) < base);
    }

    #[test]
    fn label_thresholds() {
        assert_eq!(label_for(80), ConfidenceLabel::VeryBullish);
        assert_eq!(label_for(79), ConfidenceLabel::Bullish);
        assert_eq!(label_for(60), ConfidenceLabel::Bullish);
        assert_eq!(label_for(59), ConfidenceLabel::Neutral);
        assert_eq!(label_for(41), ConfidenceLabel::Neutral);
        assert_eq!(label_for(40), ConfidenceLabel::Bearish);
        assert_eq!(label_for(21), ConfidenceLabel::Bearish);
        assert_eq!(label_for(20), ConfidenceLabel::VeryBearish);
        assert_eq!(label_for(0), ConfidenceLabel::VeryBearish);
    }

    #[test]
    fn action_follows_score() {
        assert_eq!(technical_action(&all_bullish(30.0)), TradingAction::Buy);
        assert_eq!(technical_action(&all_bearish(30.0)), TradingAction::Sell);
        let s = signals(50.0, 10.0, MaPosition::Above, MaPosition::Below);
        assert_eq!(technical_action(&s), TradingAction::Observe);
    }

    #[test]
    fn extreme_rsi_warns_in_ranging_market() {
        let mut s = all_bullish(10.0);
        s.rsi = 90.0;
        assert_eq!(technical_action(&s), TradingAction::Warning);
        let mut s = all_bearish(10.0);
        s.rsi = 10.0;
        assert_eq!(technical_action(&s), TradingAction::Warning);
    }

    #[test]
    fn extreme_rsi_against_score_warns_even_when_trending() {
        let mut s = all_bearish(30.0);
        s.rsi = 90.0;
        assert_eq!(technical_action(&s), TradingAction::Warning);
    }

    #[test]
    fn extreme_rsi_with_trending_confirmation_keeps_direction() {
        let mut s = all_bullish(30.0);
        s.rsi = 100.0;
        assert_eq!(technical_action(&s), TradingAction::Buy);
    }
}
