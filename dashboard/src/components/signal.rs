// Oracle signal panel
use shared::models::{AnalyzedBar, MarketSignal, SignalType};
use shared::utils::format_price;

use super::{field, heading};

fn signal_badge(signal_type: SignalType) -> &'static str {
    match signal_type {
        SignalType::Buy => ">>> BUY <<<",
        SignalType::Sell => "<<< SELL >>>",
        SignalType::Wait => "=== WAIT ===",
    }
}

/// Signal details, or the current oracle status when there is none. When a
/// latest bar is given its indicator readings are listed underneath.
pub fn render_signal(signal: Option<&MarketSignal>, analyzing: bool, latest: Option<&AnalyzedBar>) -> Vec<String> {
    let mut lines = heading("ORACLE SIGNAL");

    match (signal, analyzing) {
        (_, true) => lines.push("ORACLE ANALYZING...".to_string()),
        (Some(signal), false) => {
            lines.push(field(signal_badge(signal.signal_type), &format!("CONFIDENCE {:.0}/100", signal.score)));
            if let Some(risk) = signal.risk_level {
                lines.push(field("RISK", risk.as_str()));
            }
            for (label, value) in [
                ("ENTRY", &signal.entry_zone),
                ("STOP LOSS", &signal.stop_loss),
                ("TARGET", &signal.target_price),
            ] {
                if let Some(value) = value {
                    lines.push(field(label, value));
                }
            }
            if !signal.reasoning.is_empty() {
                lines.push(String::new());
                lines.push("REASONING".to_string());
                lines.extend(signal.reasoning.iter().map(|r| format!("  - {}", r)));
            }
        }
        (None, false) => lines.push("NO SIGNAL. RUN ORACLE ANALYSIS TO CLASSIFY THE LATEST BAR.".to_string()),
    }

    if let Some(latest) = latest {
        let ind = &latest.indicators;
        lines.push(String::new());
        lines.push("LATEST READINGS".to_string());
        lines.push(field("CLOSE", &format_price(latest.bar.close)));
        lines.push(field("RSI(14)", &format!("{:.2}", ind.rsi)));
        lines.push(field(
            "MACD / SIGNAL / HIST",
            &format!("{:.3} / {:.3} / {:.3}", ind.macd.macd_line, ind.macd.signal_line, ind.macd.histogram),
        ));
        lines.push(field(
            "BOLLINGER L / M / U",
            &format!("{:.2} / {:.2} / {:.2}", ind.bollinger.lower, ind.bollinger.middle, ind.bollinger.upper),
        ));
        lines.push(field("EMA50", &format!("{:.2}", ind.ema50)));
    }
    lines
}
