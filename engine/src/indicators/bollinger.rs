// Bollinger Bands indicator implementation
//
// middle = SMA(period), upper/lower = middle ± k·σ (population σ). Before
// `period` closes exist the same formula runs over whatever is available.
use super::sma::sma_series;
use super::{closes, IndicatorCalculator};
use serde_json::Value;
use shared::models::{BollingerBands, StockBar};

#[derive(Debug, Clone)]
pub struct Bollinger {
    name: String,
    period: usize,
    num_std: f64,
}

impl Bollinger {
    pub fn new(period: usize, num_std: f64) -> Self {
        let period = period.max(1);
        Self {
            name: format!("BB({},{})", period, num_std),
            period,
            num_std,
        }
    }
}

impl IndicatorCalculator for Bollinger {
    type Output = BollingerBands;

    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period, "num_std": self.num_std })
    }

    fn calculate(&self, data: &[StockBar]) -> Vec<BollingerBands> {
        bollinger_series(&closes(data), self.period, self.num_std)
    }
}

pub fn bollinger_series(values: &[f64], period: usize, num_std: f64) -> Vec<BollingerBands> {
    let period = period.max(1);
    let num_std = num_std.abs();

    sma_series(values, period)
        .into_iter()
        .enumerate()
        .map(|(i, middle)| {
            let window = &values[(i + 1).saturating_sub(period)..=i];
            let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / window.len() as f64;
            let std_dev = variance.sqrt();

            BollingerBands {
                upper: middle + num_std * std_dev,
                middle,
                lower: middle - num_std * std_dev,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::bars_from_closes;

    #[test]
    fn test_bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let results = bollinger_series(&closes, 20, 2.0);
        let last = results[19];
        assert!((last.middle - 10.5).abs() < 1e-9);
        // population σ of 1..=20 is sqrt(33.25)
        let sigma = 33.25f64.sqrt();
        assert!((last.upper - (10.5 + 2.0 * sigma)).abs() < 1e-9);
        assert!((last.lower - (10.5 - 2.0 * sigma)).abs() < 1e-9);
    }

    #[test]
    fn test_bollinger_first_bar_collapses_to_close() {
        let results = bollinger_series(&[55.0, 56.0], 20, 2.0);
        assert_eq!(results[0], BollingerBands { upper: 55.0, middle: 55.0, lower: 55.0 });
        assert!((results[1].middle - 55.5).abs() < 1e-12);
        assert!((results[1].upper - 56.5).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_band_ordering() {
        let closes = [10.0, 12.0, 9.0, 15.0, 11.0, 8.0, 13.0, 14.0, 7.0, 12.5];
        let bollinger = Bollinger::new(4, 2.0);
        for bands in bollinger.calculate(&bars_from_closes(&closes)) {
            assert!(bands.upper >= bands.middle);
            assert!(bands.middle >= bands.lower);
        }
    }
}
