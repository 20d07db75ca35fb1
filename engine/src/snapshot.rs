// Builds a complete MarketSnapshot from a ticker context: synthesize the
// anchored series, then attach indicators.
use chrono::{DateTime, Utc};
use rand::Rng;
use shared::models::{MarketSnapshot, TickerContext};

use crate::config::EngineSettings;
use crate::indicators::IndicatorEngine;
use crate::synth::{volatility_for_ticker, SeriesSynthesizer};

#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    synthesizer: SeriesSynthesizer,
    indicators: IndicatorEngine,
}

impl SnapshotBuilder {
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            synthesizer: SeriesSynthesizer::new(settings.synthesis.clone()),
            indicators: IndicatorEngine::new(settings.indicators.clone()),
        }
    }

    pub fn build(&self, ticker: &str, context: TickerContext) -> MarketSnapshot {
        self.build_with_rng(ticker, context, Utc::now(), &mut rand::rng())
    }

    pub fn build_with_rng<R: Rng>(
        &self,
        ticker: &str,
        context: TickerContext,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> MarketSnapshot {
        let volatility = volatility_for_ticker(ticker);
        let bars = self
            .synthesizer
            .generate_with_rng(context.price, context.price_30_days_ago, volatility, now, rng);
        let bars = self.indicators.analyze(&bars);

        tracing::info!(ticker = %ticker, bars = bars.len(), volatility, "Built market snapshot");

        MarketSnapshot {
            ticker: ticker.to_string(),
            context,
            bars,
            generated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn context(price: f64, price_30_days_ago: f64) -> TickerContext {
        TickerContext {
            price,
            price_30_days_ago,
            change_percent: 1.5,
            company_name: "Test Corp".to_string(),
            sector: "Testing".to_string(),
            market_cap: "1B".to_string(),
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn snapshot_is_anchored_and_fully_analyzed() {
        let builder = SnapshotBuilder::new(&EngineSettings::default());
        let now = Utc.with_ymd_and_hms(2024, 6, 28, 0, 0, 0).unwrap();
        let snapshot = builder.build_with_rng("NVDA", context(120.0, 100.0), now, &mut StdRng::seed_from_u64(1));

        assert_eq!(snapshot.ticker, "NVDA");
        assert_eq!(snapshot.bars.len(), 30);
        assert_eq!(snapshot.generated_at, now);
        let first = &snapshot.bars[0].bar;
        let last = snapshot.latest().unwrap();
        assert!((first.close - 100.0).abs() < 0.5);
        assert!((last.bar.close - 120.0).abs() < 0.6);
        assert!((0.0..=100.0).contains(&last.indicators.rsi));
    }

    #[test]
    fn custom_bar_count_is_honoured() {
        let mut settings = EngineSettings::default();
        settings.synthesis.bars = 60;
        let snapshot = SnapshotBuilder::new(&settings).build("BTC-USD", context(60_000.0, 50_000.0));
        assert_eq!(snapshot.bars.len(), 60);
    }
}
