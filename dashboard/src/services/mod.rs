// External collaborators of the dashboard and the controller that drives them.
//
// Implementations must be Send + Sync: every call runs on its own tokio task.
pub mod controller;
pub mod fixtures;
pub mod rule_oracle;

pub use controller::{Controller, Providers};
pub use fixtures::FixtureProvider;
pub use rule_oracle::RuleOracle;

use async_trait::async_trait;
use engine::AnalysisPayload;
use shared::models::{AnalysisResult, NewsItem, TickerContext};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Unknown ticker: {0}")]
    UnknownTicker(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Supplies the current price and the 30-day anchor for a ticker.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    async fn fetch_ticker_context(&self, ticker: &str) -> Result<TickerContext, ProviderError>;
}

/// Classifies the latest analyzed bar into a trading signal.
#[async_trait]
pub trait AnalysisOracle: Send + Sync {
    async fn analyze(&self, payload: &AnalysisPayload) -> Result<AnalysisResult, ProviderError>;
}

#[async_trait]
pub trait IntelProvider: Send + Sync {
    async fn fetch_intel(&self, ticker: &str) -> Result<Vec<NewsItem>, ProviderError>;
}
