// Price chart: close sparkline plus a table of the most recent bars
use shared::models::MarketSnapshot;
use shared::utils::{format_signed_percent, format_volume};

use super::heading;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One block character per value, scaled between the series min and max.
pub fn sparkline(values: &[f64]) -> String {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;
    let top = (SPARK_LEVELS.len() - 1) as f64;

    values
        .iter()
        .map(|&v| {
            let level = if range > 0.0 { ((v - min) / range * top).round() as usize } else { 0 };
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

pub fn render_chart(snapshot: Option<&MarketSnapshot>, rows: usize) -> Vec<String> {
    let Some(snapshot) = snapshot else {
        let mut lines = heading("PRICE ACTION");
        lines.push("NO DATA. SUBMIT A TICKER TO BEGIN SURVEILLANCE.".to_string());
        return lines;
    };

    let mut lines = heading(&format!("PRICE ACTION :: {}", snapshot.ticker));
    let closes: Vec<f64> = snapshot.bars.iter().map(|b| b.bar.close).collect();
    if let (Some(first), Some(last)) = (closes.first(), closes.last()) {
        let change = if *first > 0.0 { (last / first - 1.0) * 100.0 } else { 0.0 };
        lines.push(format!("{}  {} over {} bars", sparkline(&closes), format_signed_percent(change), closes.len()));
        lines.push(String::new());
    }

    lines.push(format!(
        "{:<10} {:>10} {:>10} {:>10} {:>10} {:>8} {:>6} {:>8} {:>10} {:>21}",
        "DATE", "OPEN", "HIGH", "LOW", "CLOSE", "VOL", "RSI", "MACD-H", "EMA50", "BOLLINGER"
    ));
    let skip = snapshot.bars.len().saturating_sub(rows);
    for analyzed in snapshot.bars.iter().skip(skip) {
        let bar = &analyzed.bar;
        let ind = &analyzed.indicators;
        lines.push(format!(
            "{:<10} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>8} {:>6.1} {:>8.3} {:>10.2} {:>10.2}-{:<10.2}",
            bar.timestamp.format("%Y-%m-%d"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            format_volume(bar.volume),
            ind.rsi,
            ind.macd.histogram,
            ind.ema50,
            ind.bollinger.lower,
            ind.bollinger.upper,
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use engine::SnapshotBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared::models::TickerContext;

    fn snapshot() -> MarketSnapshot {
        let context = TickerContext {
            price: 120.0,
            price_30_days_ago: 100.0,
            change_percent: 2.0,
            company_name: "Test".to_string(),
            sector: "-".to_string(),
            market_cap: "-".to_string(),
            currency: "USD".to_string(),
        };
        let now = Utc.with_ymd_and_hms(2024, 6, 28, 0, 0, 0).unwrap();
        SnapshotBuilder::default().build_with_rng("TEST", context, now, &mut StdRng::seed_from_u64(11))
    }

    #[test]
    fn sparkline_spans_min_to_max() {
        assert_eq!(sparkline(&[1.0, 2.0, 3.0]), "▁▅█");
        assert_eq!(sparkline(&[5.0, 5.0]), "▁▁");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn table_shows_most_recent_rows() {
        let snapshot = snapshot();
        let lines = render_chart(Some(&snapshot), 5);
        // heading, blank, sparkline, blank, header, 5 rows
        assert_eq!(lines.len(), 10);
        assert!(lines[0].contains("TEST"));
        assert!(lines[2].contains("over 30 bars"));
        assert!(lines.last().unwrap().starts_with("2024-06-28"));
        assert!(lines[5].starts_with("2024-06-24"));
    }

    #[test]
    fn empty_state_prompts_for_ticker() {
        let lines = render_chart(None, 10);
        assert!(lines.iter().any(|l| l.starts_with("NO DATA")));
    }
}
