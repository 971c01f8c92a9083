use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Direction of the short-term trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl Trend {
    /// +1 for bullish, -1 for bearish, 0 for neutral.
    pub fn multiplier(&self) -> f64 {
        match self {
            Trend::Bullish => 1.0,
            Trend::Bearish => -1.0,
            Trend::Neutral => 0.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Bullish => "bullish",
            Trend::Bearish => "bearish",
            Trend::Neutral => "neutral",
        }
    }
}

/// MACD proxy output.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacdReading {
    /// Sign of the MACD line: 1, -1, or 0 when there was not enough data.
    pub signal: i8,
    /// Raw MACD line value (EMA fast - EMA slow).
    pub histogram: f64,
}

/// Bollinger band levels. All zero when there was not enough data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BollingerReading {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Technical indicators derived from one history snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    /// Relative Strength Index, 0-100.
    pub rsi: f64,
    pub macd: MacdReading,
    pub bollinger: BollingerReading,
    /// Annualized volatility of simple returns, in percent.
    pub volatility: f64,
    pub trend: Trend,
    /// Percentage change over the last ten samples.
    pub momentum: f64,
    pub support: f64,
    pub resistance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Inputs that drove a risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactors {
    pub volatility: f64,
    /// Absolute momentum.
    pub trend_strength: f64,
    pub market_condition: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Risk score 0-100, after the asset class adjustment.
    pub score: u8,
    pub factors: RiskFactors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Buy,
    Sell,
    Risk,
    Timing,
}

impl RecommendationKind {
    pub fn is_directional(&self) -> bool {
        matches!(self, RecommendationKind::Buy | RecommendationKind::Sell)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationStrength {
    Strong,
    Moderate,
    Info,
}

/// A single trade, risk or timing recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub strength: RecommendationStrength,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,
    /// Suggested position size as a percentage of the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_size_hint: Option<f64>,
}

/// Projected prices at three horizons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "1h")]
    pub one_hour: f64,
    #[serde(rename = "24h")]
    pub one_day: f64,
    #[serde(rename = "7d")]
    pub one_week: f64,
    /// 50-95, inversely related to volatility.
    pub confidence: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketRegime {
    HighVolatility,
    LowVolatility,
    BullTrend,
    BearTrend,
    RangeBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VolatilityBucket {
    Extreme,
    High,
    Moderate,
    Low,
    VeryLow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LiquidityTier {
    VeryHigh,
    High,
    Medium,
    Low,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NewsImpact {
    VeryHigh,
    High,
    Moderate,
}

/// Major trading session active at a given time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradingSession {
    Asian,
    European,
    #[serde(rename = "US")]
    Us,
}

impl TradingSession {
    pub fn label(&self) -> &'static str {
        match self {
            TradingSession::Asian => "Asian",
            TradingSession::European => "European",
            TradingSession::Us => "US",
        }
    }
}

/// Categorical description of the market an instrument trades in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketContext {
    pub regime: MarketRegime,
    pub volatility_bucket: VolatilityBucket,
    pub liquidity: LiquidityTier,
    pub session: TradingSession,
    pub news_impact: NewsImpact,
}

/// Suggested holding period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeHorizon {
    ShortTerm,
    Intraday,
    Swing,
    Position,
}

/// Complete analysis of one instrument for one history snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSnapshot {
    pub symbol: String,
    /// Latest valid price in the analyzed history.
    pub price: f64,
    /// Number of valid samples the indicators were computed from.
    pub sample_count: usize,
    pub indicators: IndicatorSet,
    /// Composite sentiment, 0 (bearish) to 100 (bullish).
    pub sentiment: u8,
    pub risk: RiskAssessment,
    pub recommendations: Vec<Recommendation>,
    pub prediction: Prediction,
    pub context: MarketContext,
    /// Overall confidence in the analysis, 50-95.
    pub confidence: u8,
    pub time_horizon: TimeHorizon,
    /// Liquidity estimated from recorded volumes.
    pub liquidity: LiquidityTier,
    /// Rough correlation hints keyed by driver (e.g., "USD", "Risk").
    pub correlation: BTreeMap<String, f64>,
}

impl AnalysisSnapshot {
    /// First buy or sell recommendation, if any.
    pub fn top_recommendation(&self) -> Option<&Recommendation> {
        self.recommendations.iter().find(|r| r.kind.is_directional())
    }

    pub fn to_json(&self, pretty: bool) -> crate::error::Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
