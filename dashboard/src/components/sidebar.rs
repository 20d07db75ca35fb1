// Surveillance target: region, ticker, company context and engine status
use shared::models::MarketRegion;
use shared::utils::{format_price, format_signed_percent};

use super::{field, heading};
use crate::state::AppState;

pub fn render_sidebar(state: &AppState) -> Vec<String> {
    let mut lines = heading("SURVEILLANCE TARGET");

    let regions: Vec<String> = [MarketRegion::Us, MarketRegion::Pakistan]
        .iter()
        .map(|&region| {
            if region == state.region {
                format!("[{}]", region.label())
            } else {
                format!(" {} ", region.label())
            }
        })
        .collect();
    lines.push(regions.join("  "));
    lines.push(format!("$ {}", state.ticker));
    lines.push(String::new());

    if let Some(context) = &state.context {
        lines.push(field("ASSET CLASS", &context.company_name));
        lines.push(field("SECTOR", &context.sector));
        lines.push(field("MKT CAP", &context.market_cap));
        lines.push(field(
            &format!("PRICE ({})", context.currency),
            &format!("{}  {}", format_price(context.price), format_signed_percent(context.change_percent)),
        ));
        lines.push(String::new());
    }

    lines.push("DATA ENGINE STATUS".to_string());
    let feed = if state.loading_data { "SYNCING" } else if state.context.is_some() { "LOCKED" } else { "IDLE" };
    lines.push(field("LAYER 1 (CONTEXT FEED)", feed));
    lines.push(field("LAYER 2 (BROWNIAN BRIDGE)", "ACTIVE"));
    lines.push(field("ORACLE", if state.analyzing { "ANALYZING" } else { "STANDBY" }));
    lines
}
