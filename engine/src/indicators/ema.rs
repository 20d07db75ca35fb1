// Exponential Moving Average (EMA) indicator implementation
use super::{closes, IndicatorCalculator};
use serde_json::Value;
use shared::models::StockBar;

#[derive(Debug, Clone)]
pub struct Ema {
    name: String,
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        let period = period.max(1);
        Self {
            name: format!("EMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Ema {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, data: &[StockBar]) -> Vec<f64> {
        ema_series(&closes(data), self.period)
    }
}

/// EMA seeded with the running average.
///
/// Until `period` values exist the result is the plain mean of everything so
/// far, which at index `period - 1` is exactly the SMA seed. From then on the
/// usual `prev + (x - prev) * 2 / (period + 1)` recursion applies.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut results = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    let mut previous_ema = 0.0;

    for (i, &value) in values.iter().enumerate() {
        let ema = if i < period {
            sum += value;
            sum / (i + 1) as f64
        } else {
            (value - previous_ema) * multiplier + previous_ema
        };
        results.push(ema);
        previous_ema = ema;
    }
    results
}
