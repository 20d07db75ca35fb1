// Engine settings, loaded from a JSON file or taken from defaults
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, Result};

/// Longest accepted bar interval: one year.
pub const MAX_BAR_INTERVAL_SECS: i64 = 365 * 86_400;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub synthesis: SynthesisSettings,
    pub indicators: IndicatorSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisSettings {
    /// Number of bars produced per series.
    pub bars: usize,
    pub base_volume: f64,
    /// Share of the volatility used for the high/low wicks.
    pub wick_fraction: f64,
    pub bar_interval_secs: i64,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        SynthesisSettings {
            bars: 30,
            base_volume: 1_000_000.0,
            wick_fraction: 0.5,
            bar_interval_secs: 86_400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub ema_period: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        IndicatorSettings {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            ema_period: 50,
        }
    }
}

impl EngineSettings {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let settings: EngineSettings = serde_json::from_str(&raw)?;
        settings.validate()?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded engine settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.synthesis.validate()?;
        self.indicators.validate()
    }
}

impl SynthesisSettings {
    pub fn validate(&self) -> Result<()> {
        if self.bars == 0 {
            return Err(EngineError::ConfigError("Series length must be at least 1 bar".to_string()));
        }
        if !(self.base_volume > 0.0) {
            return Err(EngineError::ConfigError(format!("Base volume must be positive, got {}", self.base_volume)));
        }
        if !(self.wick_fraction > 0.0 && self.wick_fraction <= 1.0) {
            return Err(EngineError::ConfigError(format!("Wick fraction must be in (0, 1], got {}", self.wick_fraction)));
        }
        if self.bar_interval_secs <= 0 || self.bar_interval_secs > MAX_BAR_INTERVAL_SECS {
            return Err(EngineError::ConfigError(format!(
                "Bar interval must be in 1..={}s, got {}s",
                MAX_BAR_INTERVAL_SECS, self.bar_interval_secs
            )));
        }
        Ok(())
    }
}

impl IndicatorSettings {
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("bollinger_period", self.bollinger_period),
            ("ema_period", self.ema_period),
        ];
        for (name, period) in periods {
            if period == 0 {
                return Err(EngineError::IndicatorError(format!("Indicator period '{}' cannot be 0", name)));
            }
        }
        if self.macd_fast >= self.macd_slow {
            return Err(EngineError::IndicatorError(format!(
                "MACD fast period ({}) must be shorter than slow period ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        if !(self.bollinger_std_dev > 0.0) {
            return Err(EngineError::IndicatorError(format!(
                "Bollinger standard deviation multiplier must be positive, got {}",
                self.bollinger_std_dev
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let settings = EngineSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.synthesis.bars, 30);
        assert_eq!(settings.indicators.rsi_period, 14);
        assert_eq!(settings.indicators.ema_period, 50);
    }

    #[test]
    fn test_zero_period_rejected() {
        let mut settings = EngineSettings::default();
        settings.indicators.rsi_period = 0;
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, EngineError::IndicatorError(_)));
        assert!(err.to_string().contains("rsi_period"));
    }

    #[test]
    fn test_macd_fast_must_be_shorter() {
        let mut settings = EngineSettings::default();
        settings.indicators.macd_fast = 26;
        assert!(matches!(settings.validate(), Err(EngineError::IndicatorError(_))));
    }

    #[test]
    fn test_zero_bars_rejected() {
        let mut settings = EngineSettings::default();
        settings.synthesis.bars = 0;
        assert!(matches!(settings.validate(), Err(EngineError::ConfigError(_))));
    }

    #[test]
    fn test_bar_interval_bounds() {
        let mut settings = EngineSettings::default();
        settings.synthesis.bar_interval_secs = 0;
        assert!(matches!(settings.validate(), Err(EngineError::ConfigError(_))));
        settings.synthesis.bar_interval_secs = i64::MAX / 100;
        assert!(matches!(settings.validate(), Err(EngineError::ConfigError(_))));
        settings.synthesis.bar_interval_secs = MAX_BAR_INTERVAL_SECS;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "synthesis": {{ "bars": 60 }}, "indicators": {{ "rsi_period": 7 }} }}"#).unwrap();
        file.flush().unwrap();

        let settings = EngineSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.synthesis.bars, 60);
        assert_eq!(settings.synthesis.wick_fraction, 0.5);
        assert_eq!(settings.indicators.rsi_period, 7);
        assert_eq!(settings.indicators.macd_slow, 26);
    }

    #[test]
    fn test_from_file_missing() {
        let err = EngineSettings::from_file("does_not_exist.json").unwrap_err();
        assert!(matches!(err, EngineError::IoError { .. }));
    }

    #[test]
    fn test_from_file_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();
        file.flush().unwrap();
        let err = EngineSettings::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Settings parsing error"));
    }
}
