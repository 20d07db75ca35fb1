// Simple Moving Average (SMA), the middle line of the Bollinger bands

/// SMA over the trailing `min(i + 1, period)` values at each index.
pub fn sma_series(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    let mut results = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for (i, value) in values.iter().enumerate() {
        sum += value;
        if i >= period {
            sum -= values[i - period];
        }
        let window = (i + 1).min(period);
        results.push(sum / window as f64);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_f64_vec_eq(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len(), "Vectors differ in length");
        for (i, (val_a, val_b)) in a.iter().zip(b.iter()).enumerate() {
            assert!((val_a - val_b).abs() < 1e-9, "Mismatch at index {}: {} != {}", i, val_a, val_b);
        }
    }

    #[test]
    fn test_sma_calculation() {
        let results = sma_series(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        // warm-up: 1, (1+2)/2, then full windows
        assert_f64_vec_eq(&results, &[1.0, 1.5, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_sma_shorter_than_period() {
        let results = sma_series(&[2.0, 4.0], 3);
        assert_f64_vec_eq(&results, &[2.0, 3.0]);
    }

    #[test]
    fn test_sma_period_one() {
        let results = sma_series(&[1.0, 2.0, 3.0], 1);
        assert_f64_vec_eq(&results, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sma_empty_data() {
        assert!(sma_series(&[], 3).is_empty());
    }

    #[test]
    fn test_sma_period_zero_is_clamped() {
        assert_f64_vec_eq(&sma_series(&[4.0, 6.0], 0), &[4.0, 6.0]);
    }
}
