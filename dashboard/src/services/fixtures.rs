// Offline context and intel providers backed by the configuration fixtures
use async_trait::async_trait;
use shared::models::{NewsItem, TickerContext};
use std::collections::HashMap;

use super::{ContextProvider, IntelProvider, ProviderError};
use crate::config::FixtureData;

#[derive(Debug, Clone, Default)]
pub struct FixtureProvider {
    contexts: HashMap<String, TickerContext>,
    intel: HashMap<String, Vec<NewsItem>>,
}

impl FixtureProvider {
    pub fn from_config(fixtures: &FixtureData) -> Self {
        Self {
            contexts: normalise_keys(&fixtures.contexts),
            intel: normalise_keys(&fixtures.intel),
        }
    }
}

fn normalise_keys<V: Clone>(map: &HashMap<String, V>) -> HashMap<String, V> {
    map.iter().map(|(k, v)| (k.trim().to_uppercase(), v.clone())).collect()
}

#[async_trait]
impl ContextProvider for FixtureProvider {
    async fn fetch_ticker_context(&self, ticker: &str) -> Result<TickerContext, ProviderError> {
        if self.contexts.is_empty() {
            return Err(ProviderError::Unavailable("no ticker contexts configured".to_string()));
        }
        let key = ticker.trim().to_uppercase();
        let context = self
            .contexts
            .get(&key)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownTicker(key.clone()))?;

        if !(context.price > 0.0) || !(context.price_30_days_ago > 0.0) {
            return Err(ProviderError::InvalidResponse(format!(
                "Fixture for '{}' has non-positive anchor prices ({}, {})",
                key, context.price, context.price_30_days_ago
            )));
        }
        tracing::debug!(ticker = %key, price = context.price, "Served ticker context from fixtures");
        Ok(context)
    }
}

#[async_trait]
impl IntelProvider for FixtureProvider {
    async fn fetch_intel(&self, ticker: &str) -> Result<Vec<NewsItem>, ProviderError> {
        let key = ticker.trim().to_uppercase();
        Ok(self.intel.get(&key).cloned().unwrap_or_default())
    }
}
