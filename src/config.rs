// ─── Oscillators ──────────────────────────────────────────────────────────────
pub const RSI_PERIOD: usize = 14;
pub const RSI_NEUTRAL: f64 = 50.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_EXTREME_HIGH: f64 = 85.0;
pub const RSI_EXTREME_LOW: f64 = 15.0;

pub const STOCHASTIC_PERIOD: usize = 14;
pub const STOCHASTIC_NEUTRAL: f64 = 50.0;
pub const STOCHASTIC_OVERBOUGHT: f64 = 80.0;
pub const STOCHASTIC_OVERSOLD: f64 = 20.0;

// ─── Trend / structure ────────────────────────────────────────────────────────
pub const ICHIMOKU_TENKAN: usize = 9;
pub const ICHIMOKU_KIJUN: usize = 26;
pub const ICHIMOKU_SPAN_B: usize = 52;
pub const SAR_LOOKBACK: usize = 5;

pub const MA_FAST: usize = 50;
pub const MA_SLOW: usize = 200;

// MACD(12, 26, 9); only used to fill a missing upstream classification
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

// ─── Smart money ──────────────────────────────────────────────────────────────
pub const ORDER_BLOCK_WINDOW: usize = 20;
pub const ORDER_BLOCK_MAX: usize = 2;
pub const ORDER_BLOCK_IMPULSE_MULT: f64 = 2.0;
pub const FVG_WINDOW: usize = 10;

// ─── Pivots / retracement ─────────────────────────────────────────────────────
pub const CAMARILLA_MULT: f64 = 1.1;
pub const FIB_RATIOS: [f64; 4] = [0.236, 0.382, 0.5, 0.618];
pub const FIB_PIVOT_RATIOS: [f64; 3] = [0.382, 0.618, 1.0];

// ─── Scoring ──────────────────────────────────────────────────────────────────
pub const ADX_TRENDING: f64 = 25.0;
pub const SCORE_BASELINE: f64 = 50.0;

pub const LABEL_VERY_BULLISH: u8 = 80;
pub const LABEL_BULLISH: u8 = 60;
pub const LABEL_BEARISH: u8 = 40;
pub const LABEL_VERY_BEARISH: u8 = 20;

pub const ACTION_BUY: u8 = 70;
pub const ACTION_SELL: u8 = 30;

/// Marker prefixed to the generated insight inside `technicalSummary`.
pub const INSIGHT_MARKER: &str = "[System]:";

/// Market regime, decided by ADX magnitude only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Regime {
    Trending,
    Ranging,
}

impl Regime {
    pub fn from_adx(adx: f64) -> Self {
        if adx > ADX_TRENDING { Regime::Trending } else { Regime::Ranging }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::Trending => "trending",
            Regime::Ranging => "ranging",
        }
    }
}

// ─── Regime weight table ──────────────────────────────────────────────────────
//
//             RSI  Stoch  MA50  MA200  MACD  Ichi  SMC
//  Trending     5      3    20     15    15    15   10
//  Ranging     15     10    10      5     5     5   10

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegimeWeights {
    pub rsi:         f64,
    pub stochastic:  f64,
    pub ma50:        f64,
    pub ma200:       f64,
    pub macd:        f64,
    pub ichimoku:    f64,
    pub smart_money: f64,
}

pub const fn weights(
    rsi: f64, stochastic: f64, ma50: f64, ma200: f64,
    macd: f64, ichimoku: f64, smart_money: f64,
) -> RegimeWeights {
    RegimeWeights { rsi, stochastic, ma50, ma200, macd, ichimoku, smart_money }
}

pub const TRENDING_WEIGHTS: RegimeWeights = weights( 5.0,  3.0, 20.0, 15.0, 15.0, 15.0, 10.0);
pub const RANGING_WEIGHTS:  RegimeWeights = weights(15.0, 10.0, 10.0,  5.0,  5.0,  5.0, 10.0);

pub fn regime_weights(regime: Regime) -> &'static RegimeWeights {
    match regime {
        Regime::Trending => &TRENDING_WEIGHTS,
        Regime::Ranging  => &RANGING_WEIGHTS,
    }
}
