// Rule-based signal scoring over an analysis payload
//
// Each factor votes in [-1, 1] with a fixed weight; the weighted sum maps to
// a 0-100 score where 50 is neutral.
use shared::models::{AnalysisResult, MarketSignal, RiskLevel, SignalType};
use shared::utils::format_price;

use crate::payload::AnalysisPayload;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const BUY_THRESHOLD: f64 = 60.0;
pub const SELL_THRESHOLD: f64 = 40.0;

const STOP_DISTANCE: f64 = 0.02;
const ENTRY_BAND: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct SignalFactor {
    pub name: &'static str,
    pub weight: f64,
    /// +1.0 bullish, -1.0 bearish, 0.0 neutral.
    pub direction: f64,
    pub note: String,
}

impl SignalFactor {
    pub fn contribution(&self) -> f64 {
        self.weight * self.direction
    }
}

pub fn factors(payload: &AnalysisPayload) -> Vec<SignalFactor> {
    let price = payload.price;
    let mut factors = Vec::with_capacity(4);

    let (direction, note) = if payload.rsi < RSI_OVERSOLD {
        (1.0, format!("RSI {:.1} is oversold", payload.rsi))
    } else if payload.rsi > RSI_OVERBOUGHT {
        (-1.0, format!("RSI {:.1} is overbought", payload.rsi))
    } else {
        (0.0, format!("RSI {:.1} is neutral", payload.rsi))
    };
    factors.push(SignalFactor { name: "rsi", weight: 0.30, direction, note });

    let hist = payload.macd.histogram;
    let (direction, note) = if hist > 0.0 {
        (1.0, format!("MACD histogram positive ({:.4}), momentum building", hist))
    } else if hist < 0.0 {
        (-1.0, format!("MACD histogram negative ({:.4}), momentum fading", hist))
    } else {
        (0.0, "MACD histogram flat".to_string())
    };
    factors.push(SignalFactor { name: "macd", weight: 0.25, direction, note });

    let (direction, note) = if price > payload.ema50 {
        (1.0, format!("Price above EMA50 ({})", format_price(payload.ema50)))
    } else if price < payload.ema50 {
        (-1.0, format!("Price below EMA50 ({})", format_price(payload.ema50)))
    } else {
        (0.0, "Price sitting on EMA50".to_string())
    };
    factors.push(SignalFactor { name: "ema_trend", weight: 0.25, direction, note });

    let bands = payload.bollinger;
    let (direction, note) = if bands.upper > bands.lower && price <= bands.lower {
        (1.0, format!("Price at lower Bollinger band ({})", format_price(bands.lower)))
    } else if bands.upper > bands.lower && price >= bands.upper {
        (-1.0, format!("Price at upper Bollinger band ({})", format_price(bands.upper)))
    } else {
        (0.0, "Price inside Bollinger bands".to_string())
    };
    factors.push(SignalFactor { name: "bollinger", weight: 0.20, direction, note });

    factors
}

pub fn risk_level(payload: &AnalysisPayload) -> RiskLevel {
    let width = payload.bollinger.width_percent();
    if width < 5.0 {
        RiskLevel::Low
    } else if width < 10.0 {
        RiskLevel::Medium
    } else if width < 20.0 {
        RiskLevel::High
    } else {
        RiskLevel::Extreme
    }
}

/// Classifies the payload into BUY / SELL / WAIT with levels and a summary.
pub fn score_signal(payload: &AnalysisPayload) -> AnalysisResult {
    let factors = factors(payload);
    let total: f64 = factors.iter().map(SignalFactor::contribution).sum();
    let score = (50.0 + 50.0 * total).clamp(0.0, 100.0);

    let signal_type = if score >= BUY_THRESHOLD {
        SignalType::Buy
    } else if score <= SELL_THRESHOLD {
        SignalType::Sell
    } else {
        SignalType::Wait
    };

    let price = payload.price;
    let bands = payload.bollinger;
    let (entry_zone, stop_loss, target_price) = match signal_type {
        SignalType::Buy => {
            let target = if bands.upper > price { bands.upper } else { price * 1.04 };
            (
                Some(format!("{} - {}", format_price(price * (1.0 - ENTRY_BAND)), format_price(price))),
                Some(format_price(price * (1.0 - STOP_DISTANCE))),
                Some(format_price(target)),
            )
        }
        SignalType::Sell => {
            let target = if bands.lower < price { bands.lower } else { price * 0.96 };
            (
                Some(format!("{} - {}", format_price(price), format_price(price * (1.0 + ENTRY_BAND)))),
                Some(format_price(price * (1.0 + STOP_DISTANCE))),
                Some(format_price(target)),
            )
        }
        SignalType::Wait => (None, None, None),
    };

    let reasoning: Vec<String> = factors.iter().filter(|f| f.direction != 0.0).map(|f| f.note.clone()).collect();
    let reasoning = if reasoning.is_empty() {
        vec!["No indicator shows a directional edge".to_string()]
    } else {
        reasoning
    };

    let summary = format!(
        "{} at {}: {} with score {:.0}/100 across {} factors",
        payload.ticker,
        format_price(price),
        signal_type.as_str(),
        score,
        factors.len()
    );

    tracing::debug!(ticker = %payload.ticker, score, signal = ?signal_type, "Scored signal");

    AnalysisResult {
        signal: MarketSignal {
            signal_type,
            score,
            reasoning,
            entry_zone,
            stop_loss,
            target_price,
            risk_level: Some(risk_level(payload)),
        },
        summary,
    }
}
