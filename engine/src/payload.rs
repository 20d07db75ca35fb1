// Feature payload handed to the analysis oracle
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{AnalyzedBar, BollingerBands, Macd};
use shared::utils::format_price;

use crate::error::Result;

/// Latest bar plus every indicator computed for it. Built only from an
/// [`AnalyzedBar`], so no field can be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub ticker: String,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    pub rsi: f64,
    pub macd: Macd,
    pub bollinger: BollingerBands,
    pub ema50: f64,
}

impl AnalysisPayload {
    pub fn new(ticker: &str, latest: &AnalyzedBar) -> Self {
        let bar = &latest.bar;
        let ind = &latest.indicators;
        Self {
            ticker: ticker.to_string(),
            timestamp: bar.timestamp,
            price: bar.close,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            volume: bar.volume,
            rsi: ind.rsi,
            macd: ind.macd,
            bollinger: ind.bollinger,
            ema50: ind.ema50,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Instruction text for a language-model backed oracle.
    pub fn to_prompt(&self) -> String {
        format!(
            "Analyze {ticker} as of {ts}.\n\
             Price: {price} (open {open}, high {high}, low {low}, volume {volume:.0})\n\
             RSI(14): {rsi:.2}\n\
             MACD: line {macd:.4}, signal {signal:.4}, histogram {hist:.4}\n\
             Bollinger(20,2): upper {upper}, middle {middle}, lower {lower}\n\
             EMA(50): {ema}\n\
             Respond with a BUY, SELL or WAIT signal, a 0-100 confidence score, \
             the reasoning, entry zone, stop loss, target price and risk level.",
            ticker = self.ticker,
            ts = self.timestamp.format("%Y-%m-%d"),
            price = format_price(self.price),
            open = format_price(self.open),
            high = format_price(self.high),
            low = format_price(self.low),
            volume = self.volume,
            rsi = self.rsi,
            macd = self.macd.macd_line,
            signal = self.macd.signal_line,
            hist = self.macd.histogram,
            upper = format_price(self.bollinger.upper),
            middle = format_price(self.bollinger.middle),
            lower = format_price(self.bollinger.lower),
            ema = format_price(self.ema50),
        )
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{TimeZone, Utc};
    use shared::models::{AnalyzedBar, BollingerBands, Indicators, Macd, StockBar};

    pub fn analyzed_bar(close: f64, rsi: f64, histogram: f64, ema50: f64, bands: (f64, f64, f64)) -> AnalyzedBar {
        AnalyzedBar {
            bar: StockBar {
                timestamp: Utc.with_ymd_and_hms(2024, 6, 28, 0, 0, 0).unwrap(),
                open: close,
                high: close * 1.01,
                low: close * 0.99,
                close,
                volume: 1_500_000.0,
            },
            indicators: Indicators {
                rsi,
                macd: Macd { macd_line: histogram, signal_line: 0.0, histogram },
                bollinger: BollingerBands { upper: bands.0, middle: bands.1, lower: bands.2 },
                ema50,
            },
        }
    }
}
