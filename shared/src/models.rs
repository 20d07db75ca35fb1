use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sampled OHLCV interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Macd {
    pub macd_line: f64,
    pub signal_line: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    /// Band width relative to the middle band, in percent.
    pub fn width_percent(&self) -> f64 {
        if self.middle == 0.0 {
            0.0
        } else {
            (self.upper - self.lower) / self.middle * 100.0
        }
    }
}

/// Indicator values attached to a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    pub rsi: f64,
    pub macd: Macd,
    pub bollinger: BollingerBands,
    pub ema50: f64,
}

/// A bar together with the indicators computed at its index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedBar {
    #[serde(flatten)]
    pub bar: StockBar,
    pub indicators: Indicators,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerContext {
    pub price: f64,
    #[serde(rename = "price30DaysAgo")]
    pub price_30_days_ago: f64,
    pub change_percent: f64,
    pub company_name: String,
    pub sector: String,
    pub market_cap: String,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Buy,
    Sell,
    Wait,
}

impl SignalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Buy => "BUY",
            SignalType::Sell => "SELL",
            SignalType::Wait => "WAIT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Extreme,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Extreme => "EXTREME",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSignal {
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub score: f64,
    pub reasoning: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
}

/// What an analysis oracle returns for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub signal: MarketSignal,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    pub sentiment: Sentiment,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketRegion {
    #[default]
    Us,
    Pakistan,
}

impl MarketRegion {
    pub fn toggled(self) -> Self {
        match self {
            MarketRegion::Us => MarketRegion::Pakistan,
            MarketRegion::Pakistan => MarketRegion::Us,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarketRegion::Us => "NASDAQ/NYSE",
            MarketRegion::Pakistan => "PSX (PAKISTAN)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestResult {
    pub trades: u32,
    pub wins: u32,
    pub total_return: f64,
    pub win_rate: f64,
}

/// Everything derived for one ticker refresh. Replaced as a whole, never
/// patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub ticker: String,
    pub context: TickerContext,
    pub bars: Vec<AnalyzedBar>,
    pub generated_at: DateTime<Utc>,
}

impl MarketSnapshot {
    pub fn latest(&self) -> Option<&AnalyzedBar> {
        self.bars.last()
    }
}
