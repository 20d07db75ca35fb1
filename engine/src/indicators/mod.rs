// Technical indicators module
//
// Every indicator is causal: the value at index i only reads bars[..=i].
// Short histories never fail; each indicator has a fixed warm-up rule
// (see the individual modules) so every bar always gets a full set of values.
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::Bollinger;
pub use ema::Ema;
pub use macd::MacdIndicator;
pub use rsi::{Rsi, NEUTRAL_RSI};
pub use sma::sma_series;

use crate::config::IndicatorSettings;
use serde_json::Value;
use shared::models::{AnalyzedBar, Indicators, StockBar};

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    type Output;

    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, data: &[StockBar]) -> Vec<Self::Output>; // One value per input bar
}

pub(crate) fn closes(data: &[StockBar]) -> Vec<f64> {
    data.iter().map(|bar| bar.close).collect()
}

/// Computes the full indicator set for a bar sequence.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    settings: IndicatorSettings,
    rsi: Rsi,
    macd: MacdIndicator,
    bollinger: Bollinger,
    ema: Ema,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new(IndicatorSettings::default())
    }
}

impl IndicatorEngine {
    pub fn new(settings: IndicatorSettings) -> Self {
        Self {
            rsi: Rsi::new(settings.rsi_period),
            macd: MacdIndicator::new(settings.macd_fast, settings.macd_slow, settings.macd_signal),
            bollinger: Bollinger::new(settings.bollinger_period, settings.bollinger_std_dev),
            ema: Ema::new(settings.ema_period),
            settings,
        }
    }

    pub fn settings(&self) -> &IndicatorSettings {
        &self.settings
    }

    /// One [`Indicators`] per input bar, same order.
    pub fn compute_indicators(&self, bars: &[StockBar]) -> Vec<Indicators> {
        let rsi = run(&self.rsi, bars);
        let macd = run(&self.macd, bars);
        let bollinger = run(&self.bollinger, bars);
        let ema50 = run(&self.ema, bars);

        rsi.into_iter()
            .zip(macd)
            .zip(bollinger)
            .zip(ema50)
            .map(|(((rsi, macd), bollinger), ema50)| Indicators { rsi, macd, bollinger, ema50 })
            .collect()
    }

    pub fn analyze(&self, bars: &[StockBar]) -> Vec<AnalyzedBar> {
        bars.iter()
            .cloned()
            .zip(self.compute_indicators(bars))
            .map(|(bar, indicators)| AnalyzedBar { bar, indicators })
            .collect()
    }
}

fn run<C: IndicatorCalculator>(calculator: &C, bars: &[StockBar]) -> Vec<C::Output> {
    let values = calculator.calculate(bars);
    tracing::debug!(
        indicator = calculator.name(),
        parameters = %calculator.parameters(),
        bars = bars.len(),
        "Calculated indicator"
    );
    values
}


#[cfg(test)]
mod tests {
    use super::test_support::bars_from_closes;
    use super::*;

    fn zigzag(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.3)
            .collect()
    }

    #[test]
    fn output_matches_input_length() {
        let engine = IndicatorEngine::default();
        assert!(engine.compute_indicators(&[]).is_empty());
        let bars = bars_from_closes(&zigzag(30));
        assert_eq!(engine.compute_indicators(&bars).len(), 30);
        assert_eq!(engine.analyze(&bars).len(), 30);
    }

    #[test]
    fn truncating_input_does_not_change_earlier_values() {
        let engine = IndicatorEngine::default();
        let bars = bars_from_closes(&zigzag(70));
        let full = engine.compute_indicators(&bars);

        for i in [0, 5, 13, 14, 19, 25, 49, 50, 69] {
            let prefix = engine.compute_indicators(&bars[..=i]);
            assert_eq!(prefix[i], full[i], "indicator at index {} changed after truncation", i);
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let engine = IndicatorEngine::default();
        let bars = bars_from_closes(&zigzag(45));
        assert_eq!(engine.compute_indicators(&bars), engine.compute_indicators(&bars));
    }

    #[test]
    fn short_history_reports_neutral_rsi() {
        let engine = IndicatorEngine::default();
        let bars = bars_from_closes(&zigzag(13));
        for indicators in engine.compute_indicators(&bars) {
            assert_eq!(indicators.rsi, NEUTRAL_RSI);
        }
    }

    #[test]
    fn values_stay_in_range_and_finite() {
        let engine = IndicatorEngine::default();
        let bars = bars_from_closes(&zigzag(60));
        for ind in engine.compute_indicators(&bars) {
            assert!((0.0..=100.0).contains(&ind.rsi));
            assert!(ind.bollinger.upper >= ind.bollinger.middle);
            assert!(ind.bollinger.middle >= ind.bollinger.lower);
            assert!(ind.ema50.is_finite());
            assert!(ind.macd.histogram.is_finite());
        }
    }

    #[test]
    fn engine_uses_configured_periods() {
        let settings = IndicatorSettings { rsi_period: 5, ema_period: 3, ..IndicatorSettings::default() };
        let engine = IndicatorEngine::new(settings);
        assert_eq!(engine.rsi.name(), "RSI(5)");
        assert_eq!(engine.ema.parameters()["period"], 3);

        let closes = zigzag(12);
        let computed = engine.compute_indicators(&bars_from_closes(&closes));
        let expected_rsi = rsi::rsi_series(&closes, 5);
        let expected_ema = ema::ema_series(&closes, 3);
        for (i, ind) in computed.iter().enumerate() {
            assert_eq!(ind.rsi, expected_rsi[i]);
            assert_eq!(ind.ema50, expected_ema[i]);
        }
        assert_ne!(computed[11].rsi, NEUTRAL_RSI);
    }

    #[test]
    fn analyzed_bar_keeps_original_bar() {
        let engine = IndicatorEngine::default();
        let bars = bars_from_closes(&[10.0, 11.0]);
        let analyzed = engine.analyze(&bars);
        assert_eq!(analyzed[1].bar, bars[1]);
        assert_eq!(analyzed[0].indicators.ema50, 10.0);
        assert_eq!(analyzed[1].indicators.ema50, 10.5);
    }
}
