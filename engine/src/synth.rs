// Synthetic OHLCV series anchored to two real prices (Brownian bridge)
//
// The close path is a log-space random walk whose accumulated noise is
// pulled back to zero at both ends, so bar 0 closes at the start anchor and
// the last bar closes at the end anchor while the shape in between stays
// random.
use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use rand_distr::StandardNormal;
use shared::models::StockBar;

use crate::config::SynthesisSettings;

/// Volatility used when the caller passes zero, a negative value or NaN.
pub const MIN_VOLATILITY: f64 = 1e-4;
/// Upper clamp; keeps the low wick strictly above zero.
pub const MAX_VOLATILITY: f64 = 0.5;
/// Anchor used when neither supplied price is usable.
pub const FALLBACK_ANCHOR_PRICE: f64 = 1.0;

/// Per-step volatility for a ticker: crypto pairs swing harder.
pub fn volatility_for_ticker(ticker: &str) -> f64 {
    if ticker.to_uppercase().contains("BTC") {
        0.05
    } else {
        0.025
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeriesSynthesizer {
    settings: SynthesisSettings,
}

impl SeriesSynthesizer {
    pub fn new(settings: SynthesisSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SynthesisSettings {
        &self.settings
    }

    /// Randomized series ending now.
    pub fn generate(&self, end_price: f64, start_price: f64, volatility: f64) -> Vec<StockBar> {
        self.generate_with_rng(end_price, start_price, volatility, Utc::now(), &mut rand::rng())
    }

    /// Same as [`generate`](Self::generate) with an explicit clock and random source.
    pub fn generate_with_rng<R: Rng>(
        &self,
        end_price: f64,
        start_price: f64,
        volatility: f64,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<StockBar> {
        let (end_price, start_price) = sanitize_anchors(end_price, start_price);
        let volatility = clamp_volatility(volatility);
        let n = self.settings.bars;

        if n < 2 {
            return vec![StockBar {
                timestamp: now,
                open: end_price,
                high: end_price,
                low: end_price,
                close: end_price,
                volume: self.sample_volume(rng),
            }];
        }

        let steps = (n - 1) as f64;
        let log_start = start_price.ln();
        let drift = (end_price.ln() - log_start) / steps;

        let mut walk = Vec::with_capacity(n);
        let mut cumulative = 0.0;
        walk.push(cumulative);
        for _ in 1..n {
            let shock: f64 = rng.sample(StandardNormal);
            cumulative += shock * volatility;
            walk.push(cumulative);
        }
        let total_shock = cumulative;

        let closes: Vec<f64> = walk
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let t = i as f64;
                let bridge = w - (t / steps) * total_shock;
                (log_start + drift * t + bridge).exp()
            })
            .collect();

        let wick_scale = self.settings.wick_fraction * volatility;
        let timestamps = bar_timestamps(now, self.settings.bar_interval_secs, n);
        let mut bars = Vec::with_capacity(n);
        let mut previous_close = closes[0];

        for (i, &close) in closes.iter().enumerate() {
            let open = previous_close;
            let high_wick: f64 = rng.random::<f64>() * wick_scale;
            let low_wick: f64 = rng.random::<f64>() * wick_scale;
            bars.push(StockBar {
                timestamp: timestamps[i],
                open,
                high: open.max(close) * (1.0 + high_wick),
                low: open.min(close) * (1.0 - low_wick),
                close,
                volume: self.sample_volume(rng),
            });
            previous_close = close;
        }

        tracing::debug!(bars = bars.len(), start_price, end_price, volatility, "Synthesized anchored series");
        bars
    }

    fn sample_volume<R: Rng>(&self, rng: &mut R) -> f64 {
        self.settings.base_volume * (0.5 + rng.random::<f64>())
    }
}

/// `n` timestamps spaced by the interval, the last one at `now`. Intervals
/// that push the series outside chrono's range fall back to daily spacing.
fn bar_timestamps(now: DateTime<Utc>, interval_secs: i64, n: usize) -> Vec<DateTime<Utc>> {
    let configured = TimeDelta::try_seconds(interval_secs.max(1));
    if let Some(stamps) = configured.and_then(|interval| stamps_ending_at(now, interval, n)) {
        return stamps;
    }
    tracing::warn!(interval_secs, bars = n, "Bar interval out of range, falling back to daily bars");
    stamps_ending_at(now, TimeDelta::days(1), n).unwrap_or_else(|| vec![now; n])
}

fn stamps_ending_at(now: DateTime<Utc>, interval: TimeDelta, n: usize) -> Option<Vec<DateTime<Utc>>> {
    (0..n)
        .rev()
        .map(|back| {
            let back = i32::try_from(back).ok()?;
            now.checked_sub_signed(interval.checked_mul(back)?)
        })
        .collect()
}

fn is_usable_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

fn sanitize_anchors(end_price: f64, start_price: f64) -> (f64, f64) {
    match (is_usable_price(end_price), is_usable_price(start_price)) {
        (true, true) => (end_price, start_price),
        (true, false) => {
            tracing::warn!(start_price, end_price, "Unusable start anchor, using end price for both anchors");
            (end_price, end_price)
        }
        (false, true) => {
            tracing::warn!(start_price, end_price, "Unusable end anchor, using start price for both anchors");
            (start_price, start_price)
        }
        (false, false) => {
            tracing::warn!(start_price, end_price, fallback = FALLBACK_ANCHOR_PRICE, "No usable anchor price");
            (FALLBACK_ANCHOR_PRICE, FALLBACK_ANCHOR_PRICE)
        }
    }
}

fn clamp_volatility(volatility: f64) -> f64 {
    if !volatility.is_finite() || volatility < MIN_VOLATILITY {
        tracing::warn!(volatility, floor = MIN_VOLATILITY, "Volatility below floor, clamping");
        MIN_VOLATILITY
    } else if volatility > MAX_VOLATILITY {
        tracing::warn!(volatility, ceiling = MAX_VOLATILITY, "Volatility above ceiling, clamping");
        MAX_VOLATILITY
    } else {
        volatility
    }
}
