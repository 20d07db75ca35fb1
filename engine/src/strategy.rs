// Long-only mean-reversion backtest over an analyzed series
use shared::models::{AnalyzedBar, BacktestResult};

use crate::signals::{RSI_OVERBOUGHT, RSI_OVERSOLD};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trade {
    pub entry_index: usize,
    pub exit_index: usize,
    pub entry_price: f64,
    pub exit_price: f64,
}

impl Trade {
    pub fn return_ratio(&self) -> f64 {
        self.exit_price / self.entry_price - 1.0
    }

    pub fn is_win(&self) -> bool {
        self.exit_price > self.entry_price
    }
}

fn entry_signal(bar: &AnalyzedBar) -> bool {
    let ind = &bar.indicators;
    ind.rsi < RSI_OVERSOLD || (ind.bollinger.upper > ind.bollinger.lower && bar.bar.close <= ind.bollinger.lower)
}

fn exit_signal(bar: &AnalyzedBar) -> bool {
    let ind = &bar.indicators;
    ind.rsi > RSI_OVERBOUGHT || (ind.bollinger.upper > ind.bollinger.lower && bar.bar.close >= ind.bollinger.upper)
}

/// Every round trip taken by the strategy. Fills happen at the bar close; a
/// position still open at the last bar is closed there.
pub fn simulate_trades(bars: &[AnalyzedBar]) -> Vec<Trade> {
    let mut trades = Vec::new();
    let mut open: Option<(usize, f64)> = None;

    for (i, bar) in bars.iter().enumerate() {
        match open {
            None if entry_signal(bar) => open = Some((i, bar.bar.close)),
            Some((entry_index, entry_price)) if exit_signal(bar) => {
                trades.push(Trade { entry_index, exit_index: i, entry_price, exit_price: bar.bar.close });
                open = None;
            }
            _ => {}
        }
    }

    if let (Some((entry_index, entry_price)), Some(last)) = (open, bars.last()) {
        let exit_index = bars.len() - 1;
        if exit_index > entry_index {
            trades.push(Trade { entry_index, exit_index, entry_price, exit_price: last.bar.close });
        }
    }
    trades
}

pub fn backtest(bars: &[AnalyzedBar]) -> BacktestResult {
    let trades = simulate_trades(bars);
    let wins = trades.iter().filter(|t| t.is_win()).count() as u32;
    let growth: f64 = trades.iter().map(|t| 1.0 + t.return_ratio()).product();
    let count = trades.len() as u32;

    let result = BacktestResult {
        trades: count,
        wins,
        total_return: (growth - 1.0) * 100.0,
        win_rate: if count == 0 { 0.0 } else { wins as f64 / count as f64 * 100.0 },
    };
    tracing::debug!(trades = result.trades, wins = result.wins, total_return = result.total_return, "Backtest finished");
    result
}
