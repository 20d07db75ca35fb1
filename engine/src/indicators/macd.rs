// Moving Average Convergence Divergence (MACD) indicator implementation
use super::ema::ema_series;
use super::{closes, IndicatorCalculator};
use serde_json::Value;
use shared::models::{Macd, StockBar};

#[derive(Debug, Clone)]
pub struct MacdIndicator {
    name: String,
    fast: usize,
    slow: usize,
    signal: usize,
}

impl MacdIndicator {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            name: format!("MACD({},{},{})", fast, slow, signal),
            fast,
            slow,
            signal,
        }
    }
}

impl IndicatorCalculator for MacdIndicator {
    type Output = Macd;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "fast": self.fast, "slow": self.slow, "signal": self.signal })
    }

    fn calculate(&self, data: &[StockBar]) -> Vec<Macd> {
        macd_series(&closes(data), self.fast, self.slow, self.signal)
    }
}

/// MACD line, signal line and histogram per index. All three EMAs share the
/// running-average warm-up of [`ema_series`]; the signal EMA runs over the
/// MACD line from index 0.
pub fn macd_series(values: &[f64], fast: usize, slow: usize, signal: usize) -> Vec<Macd> {
    let ema_fast = ema_series(values, fast);
    let ema_slow = ema_series(values, slow);
    let macd_line: Vec<f64> = ema_fast.iter().zip(&ema_slow).map(|(f, s)| f - s).collect();
    let signal_line = ema_series(&macd_line, signal);

    macd_line
        .iter()
        .zip(&signal_line)
        .map(|(&macd_line, &signal_line)| Macd {
            macd_line,
            signal_line,
            histogram: macd_line - signal_line,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::bars_from_closes;

    #[test]
    fn test_macd_constant_series_is_zero() {
        let results = macd_series(&[100.0; 40], 12, 26, 9);
        assert_eq!(results.len(), 40);
        for m in results {
            assert!(m.macd_line.abs() < 1e-9);
            assert!(m.signal_line.abs() < 1e-9);
            assert!(m.histogram.abs() < 1e-9);
        }
    }

    #[test]
    fn test_macd_first_bar_is_zero() {
        let results = macd_series(&[42.0, 43.0], 12, 26, 9);
        assert_eq!(results[0], Macd::default());
    }

    #[test]
    fn test_macd_uptrend_is_positive() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let indicator = MacdIndicator::new(12, 26, 9);
        let results = indicator.calculate(&bars_from_closes(&closes));
        let last = results.last().unwrap();
        assert!(last.macd_line > 0.0);
        assert!((last.histogram - (last.macd_line - last.signal_line)).abs() < 1e-12);
    }

    #[test]
    fn test_macd_parameters() {
        let indicator = MacdIndicator::new(12, 26, 9);
        assert_eq!(indicator.name(), "MACD(12,26,9)");
        assert_eq!(indicator.parameters()["slow"], 26);
    }
}
