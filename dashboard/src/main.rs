// Headless market surveillance dashboard: loads a ticker, optionally runs the
// analysis oracle, and prints the selected panels.
use clap::Parser;
use std::sync::Arc;

mod app;
mod cli;
mod components;
mod config;
mod services;
mod state;

use cli::Args;
use config::AppConfig;
use engine::SnapshotBuilder;
use services::{Controller, FixtureProvider, Providers, RuleOracle};
use state::{AppEvent, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the rendered dashboard
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = Args::parse();

    let app_config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load_default()?,
    };
    tracing::info!(version = %app_config.version, "Loaded configuration");

    let fixtures = Arc::new(FixtureProvider::from_config(&app_config.fixtures));
    let providers = Providers {
        context: fixtures.clone(),
        intel: fixtures,
        oracle: Arc::new(RuleOracle),
    };
    let mut controller = Controller::new(providers, SnapshotBuilder::new(&app_config.engine), args.seed);

    let mut state = AppState::new(args.region.into(), app_config.regions.clone());
    if let Some(ticker) = args.ticker {
        state = controller.handle(state, AppEvent::TickerEdited(ticker));
    }
    state = controller.handle(state, AppEvent::TickerSubmitted);
    state = controller.settle(state).await;

    if state.snapshot.is_none() {
        anyhow::bail!("No market data available for {}", state.ticker);
    }

    if args.analyze {
        state = controller.handle(state, AppEvent::AnalyzeRequested);
        state = controller.settle(state).await;
    }
    if let Some(tab) = args.tab {
        state = controller.handle(state, AppEvent::TabSelected(tab));
    }

    println!("{}", app::render_app(&state, app_config.chart_rows));
    Ok(())
}
