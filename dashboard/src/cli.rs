use clap::{Parser, ValueEnum};
use shared::models::MarketRegion;
use std::path::PathBuf;

use crate::state::Tab;

#[derive(Debug, Parser)]
#[command(author, version, about = "Market surveillance dashboard over synthetic anchored series", long_about = None)]
pub struct Args {
    /// Ticker to load; defaults to the region's configured ticker.
    #[arg(short, long, value_parser = parse_ticker)]
    pub ticker: Option<String>,

    #[arg(short, long, value_enum, default_value_t = RegionArg::Us)]
    pub region: RegionArg,

    /// Alternative configuration file (JSON).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for reproducible series.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Run the analysis oracle after loading.
    #[arg(short, long)]
    pub analyze: bool,

    #[arg(long, value_enum)]
    pub tab: Option<Tab>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RegionArg {
    Us,
    Pakistan,
}

impl From<RegionArg> for MarketRegion {
    fn from(region: RegionArg) -> Self {
        match region {
            RegionArg::Us => MarketRegion::Us,
            RegionArg::Pakistan => MarketRegion::Pakistan,
        }
    }
}

pub fn parse_ticker(s: &str) -> Result<String, String> {
    let ticker = s.trim().to_uppercase();
    if ticker.is_empty() {
        return Err("Ticker must not be empty.".into());
    }
    if let Some(bad) = ticker.chars().find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='))) {
        return Err(format!("Invalid character '{}' in ticker.", bad));
    }
    Ok(ticker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_is_normalised() {
        assert_eq!(parse_ticker(" btc-usd ").unwrap(), "BTC-USD");
        assert_eq!(parse_ticker("sys.pa").unwrap(), "SYS.PA");
        assert!(parse_ticker("  ").is_err());
        assert!(parse_ticker("NV DA").is_err());
    }

    #[test]
    fn parses_full_command_line() {
        let args = Args::parse_from([
            "surveillance", "--ticker", "aapl", "--region", "pakistan", "--seed", "42", "--analyze", "--tab", "strategy",
        ]);
        assert_eq!(args.ticker.as_deref(), Some("AAPL"));
        assert_eq!(MarketRegion::from(args.region), MarketRegion::Pakistan);
        assert_eq!(args.seed, Some(42));
        assert!(args.analyze);
        assert_eq!(args.tab, Some(Tab::Strategy));
        assert!(args.config.is_none());
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["surveillance"]);
        assert_eq!(args.region, RegionArg::Us);
        assert!(args.ticker.is_none());
        assert!(!args.analyze);
        assert!(args.tab.is_none());
    }
}
