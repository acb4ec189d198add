use serde::{Deserialize, Serialize};

/// One OHLC bar. `timestamp` is unix seconds and is only used for ordering.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    #[serde(alias = "time")]
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Previous-period OHLC summary feeding the pivot and Fibonacci stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceBar {
    #[serde(default)]
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Bullish,
    Bearish,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    Up,
    Down,
}

/// Closed classification for the legacy free-text `macd` / `bollinger` fields.
///
/// Deserialization goes through [`SignalBias::from_legacy_text`], so both the
/// enum tags and upstream prose such as `"Bullish crossover"` are accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum SignalBias {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl SignalBias {
    const BULLISH_KEYWORDS: [&'static str; 3] = ["BUY", "BULLISH", "POSITIVE"];
    const BEARISH_KEYWORDS: [&'static str; 3] = ["SELL", "BEARISH", "NEGATIVE"];

    /// Keyword match against upstream text, case-insensitive. Bullish keywords
    /// win when both families appear.
    pub fn from_legacy_text(text: &str) -> Self {
        let upper = text.to_uppercase();
        if Self::BULLISH_KEYWORDS.iter().any(|k| upper.contains(k)) {
            SignalBias::Bullish
        } else if Self::BEARISH_KEYWORDS.iter().any(|k| upper.contains(k)) {
            SignalBias::Bearish
        } else {
            SignalBias::Neutral
        }
    }
}

impl From<String> for SignalBias {
    fn from(text: String) -> Self {
        SignalBias::from_legacy_text(&text)
    }
}

/// Price relative to a moving average.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaPosition {
    Above,
    #[default]
    Below,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotLevelSet {
    pub pivot: f64,
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r4: Option<f64>,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s4: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PivotPoints {
    pub classic: PivotLevelSet,
    pub woodie: PivotLevelSet,
    pub camarilla: PivotLevelSet,
    pub fibonacci: PivotLevelSet,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FibonacciLevels {
    pub level236: f64,
    pub level382: f64,
    pub level500: f64,
    pub level618: f64,
    pub trend: TrendDirection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloudSignal {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IchimokuCloud {
    pub tenkan: f64,
    pub kijun: f64,
    pub span_a: f64,
    pub span_b: f64,
    pub signal: CloudSignal,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParabolicSar {
    pub value: f64,
    pub trend: TrendDirection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Significance {
    High,
    Medium,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderBlock {
    #[serde(rename = "type")]
    pub kind: Direction,
    pub top: f64,
    pub bottom: f64,
    pub significance: Significance,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FairValueGap {
    #[serde(rename = "type")]
    pub kind: Direction,
    pub top: f64,
    pub bottom: f64,
    #[serde(default)]
    pub is_filled: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartMoney {
    #[serde(default)]
    pub order_blocks: Vec<OrderBlock>,
    #[serde(default)]
    pub fair_value_gaps: Vec<FairValueGap>,
}

impl SmartMoney {
    pub fn has_order_block(&self, kind: Direction) -> bool {
        self.order_blocks.iter().any(|ob| ob.kind == kind)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmonicPattern {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Direction,
    pub completion_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLabel {
    #[serde(alias = "VERY BULLISH")]
    VeryBullish,
    Bullish,
    Neutral,
    Bearish,
    #[serde(alias = "VERY BEARISH")]
    VeryBearish,
}

impl ConfidenceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLabel::VeryBullish => "VERY BULLISH",
            ConfidenceLabel::Bullish => "BULLISH",
            ConfidenceLabel::Neutral => "NEUTRAL",
            ConfidenceLabel::Bearish => "BEARISH",
            ConfidenceLabel::VeryBearish => "VERY BEARISH",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceScore {
    pub score: u8,
    pub label: ConfidenceLabel,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradingAction {
    Buy,
    Sell,
    #[default]
    Observe,
    Warning,
}

impl TradingAction {
    pub fn is_decisive(&self) -> bool {
        matches!(self, TradingAction::Buy | TradingAction::Sell)
    }
}

/// The engine's output contract. Optional sub-structures stay `None` until
/// their preconditions are met and are never defaulted to zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TechnicalSignals {
    pub rsi: f64,
    pub stochastic: f64,
    pub adx: f64,
    pub cci: f64,
    pub trend: String,
    pub support: f64,
    pub resistance: f64,
    pub macd: SignalBias,
    pub bollinger: SignalBias,
    pub ma50: MaPosition,
    pub ma200: MaPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pivot_points: Option<PivotPoints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fibonacci_levels: Option<FibonacciLevels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ichimoku: Option<IchimokuCloud>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sar: Option<ParabolicSar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_money: Option<SmartMoney>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harmonic_patterns: Option<Vec<HarmonicPattern>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<ConfidenceScore>,
}

impl Default for TechnicalSignals {
    fn default() -> Self {
        TechnicalSignals {
            rsi: 50.0,
            stochastic: 50.0,
            adx: 0.0,
            cci: 0.0,
            trend: String::new(),
            support: 0.0,
            resistance: 0.0,
            macd: SignalBias::Neutral,
            bollinger: SignalBias::Neutral,
            ma50: MaPosition::Below,
            ma200: MaPosition::Below,
            pivot_points: None,
            fibonacci_levels: None,
            ichimoku: None,
            sar: None,
            smart_money: None,
            harmonic_patterns: None,
            confidence_score: None,
        }
    }
}

/// Upstream analysis bundle: the signals plus the action and summary text the
/// upstream analyst proposed. Enrichment reads and returns this shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisReport {
    pub technical_summary: String,
    pub trading_action: TradingAction,
    pub technical_signals: TechnicalSignals,
}
