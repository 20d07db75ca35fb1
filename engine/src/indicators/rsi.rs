// Relative Strength Index (RSI) indicator implementation
use super::{closes, IndicatorCalculator};
use serde_json::Value;
use shared::models::StockBar;

/// Value reported while fewer than `period` price changes are available.
pub const NEUTRAL_RSI: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        let period = period.max(1);
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Rsi {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period, "warm_up_value": NEUTRAL_RSI })
    }

    fn calculate(&self, data: &[StockBar]) -> Vec<f64> {
        rsi_series(&closes(data), self.period)
    }
}

/// Wilder RSI. Indices below `period` report [`NEUTRAL_RSI`]; the first real
/// value at index `period` uses simple averages of the first `period` deltas.
pub fn rsi_series(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    if values.len() <= period {
        return vec![NEUTRAL_RSI; values.len()];
    }

    let mut results = vec![NEUTRAL_RSI; period];

    let mut gains = 0.0;
    let mut losses = 0.0;
    for i in 1..=period {
        let change = values[i] - values[i - 1];
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change; // losses are positive values
        }
    }

    let mut avg_gain = gains / period as f64;
    let mut avg_loss = losses / period as f64;
    results.push(rsi_from_averages(avg_gain, avg_loss));

    for i in (period + 1)..values.len() {
        let change = values[i] - values[i - 1];
        let (current_gain, current_loss) = if change > 0.0 { (change, 0.0) } else { (0.0, -change) };

        avg_gain = (avg_gain * (period - 1) as f64 + current_gain) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + current_loss) / period as f64;
        results.push(rsi_from_averages(avg_gain, avg_loss));
    }
    results
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // flat window
        if avg_gain == 0.0 {
            return NEUTRAL_RSI;
        }
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - (100.0 / (1.0 + rs))).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::bars_from_closes;

    #[test]
    fn test_rsi_calculation() {
        let closes = [
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03, 45.61, 46.28,
            46.28, 46.00, 46.03, 46.41, 46.22, 45.64, 46.25,
        ];
        let rsi = Rsi::new(14);
        let results = rsi.calculate(&bars_from_closes(&closes));

        assert_eq!(results.len(), closes.len());
        for (i, value) in results.iter().enumerate().take(14) {
            assert_eq!(*value, NEUTRAL_RSI, "Expected warm-up value at index {}", i);
        }
        // Reference values for this data set (Wilder smoothing)
        assert!((results[14] - 70.46).abs() < 0.1, "RSI[14] = {}", results[14]);
        assert!((results[15] - 66.25).abs() < 0.1, "RSI[15] = {}", results[15]);
        assert!((results[16] - 66.48).abs() < 0.1, "RSI[16] = {}", results[16]);
        for value in &results {
            assert!((0.0..=100.0).contains(value));
        }
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let closes: Vec<f64> = (0..13).map(|i| 100.0 + i as f64).collect();
        let results = rsi_series(&closes, 14);
        assert_eq!(results, vec![NEUTRAL_RSI; 13]);
    }

    #[test]
    fn test_rsi_all_gains() {
        let closes: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let results = rsi_series(&closes, 14);
        assert!(results[..14].iter().all(|v| *v == NEUTRAL_RSI));
        assert!(results[14..].iter().all(|v| *v == 100.0));
    }

    #[test]
    fn test_rsi_all_losses() {
        let closes: Vec<f64> = (1..=20).map(|i| 20.0 - i as f64).collect();
        let results = rsi_series(&closes, 14);
        assert!(results[14..].iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_rsi_flat_series_is_neutral() {
        let results = rsi_series(&[10.0; 30], 14);
        assert!(results.iter().all(|v| *v == NEUTRAL_RSI));
    }
}
