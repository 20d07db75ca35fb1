// Dashboard configuration, mirroring assets/config/default.json
use anyhow::Context;
use engine::config::EngineSettings;
use serde::Deserialize;
use shared::models::{MarketRegion, NewsItem, TickerContext};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub version: String,
    #[serde(default)]
    pub engine: EngineSettings,
    pub regions: RegionTickers,
    /// Bars shown in the chart table.
    #[serde(default = "default_chart_rows")]
    pub chart_rows: usize,
    #[serde(default)]
    pub fixtures: FixtureData,
}

fn default_chart_rows() -> usize {
    10
}

/// Ticker selected when switching to a region.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RegionTickers {
    pub us: String,
    pub pakistan: String,
}

impl RegionTickers {
    pub fn for_region(&self, region: MarketRegion) -> &str {
        match region {
            MarketRegion::Us => &self.us,
            MarketRegion::Pakistan => &self.pakistan,
        }
    }
}

impl Default for RegionTickers {
    fn default() -> Self {
        Self {
            us: "NVDA".to_string(),
            pakistan: "SYS.PA".to_string(),
        }
    }
}

/// Offline data served by the fixture providers, keyed by ticker.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FixtureData {
    #[serde(default)]
    pub contexts: HashMap<String, TickerContext>,
    #[serde(default)]
    pub intel: HashMap<String, Vec<NewsItem>>,
}

impl AppConfig {
    /// The configuration embedded at build time.
    pub fn load_default() -> anyhow::Result<Self> {
        let config_str = include_str!("../../assets/config/default.json"); // Path relative to this .rs file
        Self::parse(config_str).context("Embedded default configuration is invalid")
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid configuration file {}", path.display()))
    }

    fn parse(raw: &str) -> anyhow::Result<Self> {
        let config: AppConfig = serde_json::from_str(raw)?;
        config.engine.validate()?;
        Ok(config)
    }
}
