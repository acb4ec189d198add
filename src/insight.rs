use crate::config::{
    Regime, RSI_EXTREME_HIGH, RSI_EXTREME_LOW, RSI_OVERBOUGHT, RSI_OVERSOLD,
};
use crate::confidence::{technical_action, trend_confidence};
use crate::types::{CloudSignal, Direction, TechnicalSignals, TradingAction, TrendDirection};

fn rsi_zone(rsi: f64) -> &'static str {
    if rsi >= RSI_EXTREME_HIGH {
        "extremely overbought"
    } else if rsi >= RSI_OVERBOUGHT {
        "overbought"
    } else if rsi <= RSI_EXTREME_LOW {
        "extremely oversold"
    } else if rsi <= RSI_OVERSOLD {
        "oversold"
    } else if rsi > 50.0 {
        "in a healthy bullish band"
    } else if rsi < 50.0 {
        "in a healthy bearish band"
    } else {
        "neutral"
    }
}

fn action_text(action: TradingAction) -> &'static str {
    match action {
        TradingAction::Buy => "BUY",
        TradingAction::Sell => "SELL",
        TradingAction::Observe => "OBSERVE",
        TradingAction::Warning => "WARNING (stretched momentum, wait for a pullback)",
    }
}

/// Deterministic plain-text summary of the bundle.
pub fn market_insight(signals: &TechnicalSignals) -> String {
    let confidence = trend_confidence(signals);
    let regime = Regime::from_adx(signals.adx);

    let mut parts = vec![
        format!(
            "Trend confidence {}/100 ({}) in a {} market (ADX {:.1}).",
            confidence.score,
            confidence.label.as_str(),
            regime.as_str(),
            signals.adx
        ),
        format!("RSI {:.2} is {}.", signals.rsi, rsi_zone(signals.rsi)),
    ];

    if let Some(cloud) = &signals.ichimoku {
        let position = match cloud.signal {
            CloudSignal::Bullish => "above the cloud",
            CloudSignal::Bearish => "below the cloud",
            CloudSignal::Neutral => "inside the cloud",
        };
        parts.push(format!("Ichimoku: price {position} (Kijun {:.2}).", cloud.kijun));
    }

    if let Some(sar) = &signals.sar {
        let side = match sar.trend {
            TrendDirection::Up => "trailing below price",
            TrendDirection::Down => "capping price from above",
        };
        parts.push(format!("SAR {:.2} {side}.", sar.value));
    }

    if let Some(smc) = &signals.smart_money {
        if let Some(ob) = smc.order_blocks.first() {
            let kind = match ob.kind {
                Direction::Bullish => "Bullish",
                Direction::Bearish => "Bearish",
            };
            parts.push(format!("{kind} order block at {:.2}-{:.2}.", ob.bottom, ob.top));
        }
        let open_gaps = smc.fair_value_gaps.iter().filter(|g| !g.is_filled).count();
        if open_gaps > 0 {
            parts.push(format!("{open_gaps} open fair value gap(s) nearby."));
        }
    }

    parts.push(format!("Suggested action: {}.", action_text(technical_action(signals))));
    parts.join(" ")
}
