// Application state for the dashboard and the pure function that advances it.
//
// `AppState::update` consumes the current state and an event and returns the
// next state plus the side effects (commands) the controller must run. Async
// results come back as events tagged with the generation they were issued
// under; anything from an older generation is dropped.

use engine::AnalysisPayload;
use serde::{Deserialize, Serialize};
use shared::models::{AnalysisResult, MarketRegion, MarketSignal, MarketSnapshot, NewsItem, TickerContext};
use std::sync::Arc;

use crate::config::RegionTickers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum Tab {
    #[default]
    Surveillance,
    Signals,
    Strategy,
    Intel,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Surveillance, Tab::Signals, Tab::Strategy, Tab::Intel];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Surveillance => "LIVE SURVEILLANCE",
            Tab::Signals => "TRADE SIGNALS",
            Tab::Strategy => "STRATEGY SIMULATION",
            Tab::Intel => "GLOBAL INTEL",
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Ticker input changed; not applied until submitted.
    TickerEdited(String),
    TickerSubmitted,
    RegionToggled,
    TabSelected(Tab),
    AnalyzeRequested,
    DataLoaded { generation: u64, snapshot: Arc<MarketSnapshot> },
    DataFailed { generation: u64, error: String },
    IntelLoaded { generation: u64, news: Vec<NewsItem> },
    IntelFailed { generation: u64, error: String },
    AnalysisCompleted { generation: u64, result: AnalysisResult },
    AnalysisFailed { generation: u64, error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadData { generation: u64, ticker: String },
    LoadIntel { generation: u64, ticker: String },
    Analyze { generation: u64, payload: AnalysisPayload },
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub ticker: String,
    pub region: MarketRegion,
    pub region_tickers: RegionTickers,
    pub active_tab: Tab,

    // Data related state
    pub context: Option<TickerContext>,
    pub snapshot: Option<Arc<MarketSnapshot>>,
    pub signal: Option<MarketSignal>,
    pub summary: String,
    pub news: Vec<NewsItem>,

    pub loading_data: bool,
    pub analyzing: bool,
    /// Bumped on every refresh; results tagged with an older value are stale.
    pub generation: u64,
}

impl AppState {
    pub fn new(region: MarketRegion, region_tickers: RegionTickers) -> Self {
        Self {
            ticker: region_tickers.for_region(region).to_string(),
            region,
            region_tickers,
            active_tab: Tab::default(),
            context: None,
            snapshot: None,
            signal: None,
            summary: String::new(),
            news: Vec::new(),
            loading_data: false,
            analyzing: false,
            generation: 0,
        }
    }

    pub fn update(mut self, event: AppEvent) -> (Self, Vec<Command>) {
        match event {
            AppEvent::TickerEdited(ticker) => {
                self.ticker = ticker.trim().to_uppercase();
                (self, Vec::new())
            }
            AppEvent::TickerSubmitted => self.refresh(),
            AppEvent::RegionToggled => {
                self.region = self.region.toggled();
                self.ticker = self.region_tickers.for_region(self.region).to_string();
                self.refresh()
            }
            AppEvent::TabSelected(tab) => {
                self.active_tab = tab;
                (self, Vec::new())
            }
            AppEvent::AnalyzeRequested => self.request_analysis(),
            AppEvent::DataLoaded { generation, snapshot } => {
                if self.is_stale(generation, "data") {
                    return (self, Vec::new());
                }
                let ticker = snapshot.ticker.clone();
                self.context = Some(snapshot.context.clone());
                self.snapshot = Some(snapshot);
                self.signal = None;
                self.summary.clear();
                self.loading_data = false;
                (self, vec![Command::LoadIntel { generation, ticker }])
            }
            AppEvent::DataFailed { generation, error } => {
                if !self.is_stale(generation, "data") {
                    tracing::warn!(ticker = %self.ticker, generation, error = %error, "Market data refresh failed, keeping previous data");
                    self.loading_data = false;
                }
                (self, Vec::new())
            }
            AppEvent::IntelLoaded { generation, news } => {
                if !self.is_stale(generation, "intel") {
                    self.news = news;
                }
                (self, Vec::new())
            }
            AppEvent::IntelFailed { generation, error } => {
                if !self.is_stale(generation, "intel") {
                    tracing::warn!(ticker = %self.ticker, generation, error = %error, "Intel fetch failed");
                }
                (self, Vec::new())
            }
            AppEvent::AnalysisCompleted { generation, result } => {
                if !self.is_stale(generation, "analysis") {
                    self.signal = Some(result.signal);
                    self.summary = result.summary;
                    self.analyzing = false;
                }
                (self, Vec::new())
            }
            AppEvent::AnalysisFailed { generation, error } => {
                if !self.is_stale(generation, "analysis") {
                    tracing::warn!(ticker = %self.ticker, generation, error = %error, "Oracle analysis failed");
                    self.analyzing = false;
                }
                (self, Vec::new())
            }
        }
    }

    fn refresh(mut self) -> (Self, Vec<Command>) {
        self.generation += 1;
        self.loading_data = true;
        // a pending analysis belongs to the old generation and will be dropped
        self.analyzing = false;
        self.signal = None;
        self.summary.clear();
        tracing::info!(ticker = %self.ticker, generation = self.generation, "Refreshing dashboard data");
        let command = Command::LoadData { generation: self.generation, ticker: self.ticker.clone() };
        (self, vec![command])
    }

    fn request_analysis(mut self) -> (Self, Vec<Command>) {
        // while loading, the snapshot still belongs to the previous ticker
        if self.analyzing || self.loading_data {
            return (self, Vec::new());
        }
        let payload = self
            .snapshot
            .as_deref()
            .and_then(|snapshot| snapshot.latest().map(|latest| AnalysisPayload::new(&snapshot.ticker, latest)));
        let Some(payload) = payload else {
            return (self, Vec::new());
        };
        self.analyzing = true;
        self.active_tab = Tab::Signals;
        let generation = self.generation;
        (self, vec![Command::Analyze { generation, payload }])
    }

    fn is_stale(&self, generation: u64, kind: &str) -> bool {
        let stale = generation != self.generation;
        if stale {
            tracing::debug!(kind, generation, current = self.generation, "Dropping stale result");
        }
        stale
    }
}
