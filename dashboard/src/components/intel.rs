// News feed and the oracle's written summary
use shared::models::{NewsItem, Sentiment};

use super::heading;

fn sentiment_tag(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "[+]",
        Sentiment::Negative => "[-]",
        Sentiment::Neutral => "[=]",
    }
}

pub fn render_intel(news: &[NewsItem], loading: bool, ticker: &str) -> Vec<String> {
    let mut lines = heading(&format!("GLOBAL INTEL :: {}", ticker));
    if loading {
        lines.push("SCANNING NEWS WIRES...".to_string());
        return lines;
    }
    if news.is_empty() {
        lines.push("NO INTEL INTERCEPTED.".to_string());
        return lines;
    }

    for item in news {
        lines.push(format!("{} {}", sentiment_tag(item.sentiment), item.title));
        let when = item.published_at.as_deref().unwrap_or("undated");
        lines.push(format!("    {} | {} | {}", item.source, when, item.url));
    }
    lines
}

/// Terminal-style echo of the last analysis summary.
pub fn render_summary(summary: &str, ticker: &str) -> Vec<String> {
    let mut lines = heading("INTEL TERMINAL");
    if summary.is_empty() {
        lines.push(format!("> awaiting oracle analysis for {}_", ticker));
    } else {
        lines.extend(summary.lines().map(|l| format!("> {}", l)));
    }
    lines
}
