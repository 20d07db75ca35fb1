// Backtest of the mean-reversion strategy over the current series
use engine::strategy::{backtest, simulate_trades};
use shared::models::MarketSnapshot;
use shared::utils::{format_price, format_signed_percent};

use super::{field, heading};

pub fn render_strategy(snapshot: Option<&MarketSnapshot>) -> Vec<String> {
    let mut lines = heading("STRATEGY SIMULATION");
    let Some(snapshot) = snapshot else {
        lines.push("NO DATA TO SIMULATE.".to_string());
        return lines;
    };

    lines.push("LONG ONLY: ENTER RSI < 30 OR CLOSE <= LOWER BAND, EXIT RSI > 70 OR CLOSE >= UPPER BAND".to_string());
    lines.push(String::new());

    let result = backtest(&snapshot.bars);
    lines.push(field("TRADES", &result.trades.to_string()));
    lines.push(field("WINS", &result.wins.to_string()));
    lines.push(field("WIN RATE", &format!("{:.1}%", result.win_rate)));
    lines.push(field("TOTAL RETURN", &format_signed_percent(result.total_return)));

    let trades = simulate_trades(&snapshot.bars);
    if !trades.is_empty() {
        lines.push(String::new());
        for trade in &trades {
            let entry = &snapshot.bars[trade.entry_index].bar;
            let exit = &snapshot.bars[trade.exit_index].bar;
            lines.push(format!(
                "  {} {} -> {} {}  {}",
                entry.timestamp.format("%m-%d"),
                format_price(trade.entry_price),
                exit.timestamp.format("%m-%d"),
                format_price(trade.exit_price),
                format_signed_percent(trade.return_ratio() * 100.0),
            ));
        }
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

    #[test]
    fn summary_matches_backtest() {
        let context = TickerContext {
            price: 80.0,
            price_30_days_ago: 100.0,
            change_percent: -3.0,
            company_name: "Test".to_string(),
            sector: "-".to_string(),
            market_cap: "-".to_string(),
            currency: "USD".to_string(),
        };
        let now = Utc.with_ymd_and_hms(2024, 6, 28, 0, 0, 0).unwrap();
        let snapshot = SnapshotBuilder::default().build_with_rng("TEST", context, now, &mut StdRng::seed_from_u64(5));
        let result = backtest(&snapshot.bars);

        let text = render_strategy(Some(&snapshot)).join("\n");
        assert!(text.contains(&format!("{:.1}%", result.win_rate)));
        assert!(text.contains(&format_signed_percent(result.total_return)));
        let trade_lines = text.lines().filter(|l| l.contains(" -> ")).count();
        assert_eq!(trade_lines as u32, result.trades);
    }

    #[test]
    fn no_snapshot() {
        assert!(render_strategy(None).join("\n").contains("NO DATA"));
    }
}
