// Local analysis oracle backed by the engine's rule-based scorer
use async_trait::async_trait;
use engine::signals::score_signal;
use engine::AnalysisPayload;
use shared::models::AnalysisResult;

use super::{AnalysisOracle, ProviderError};

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleOracle;

#[async_trait]
impl AnalysisOracle for RuleOracle {
    async fn analyze(&self, payload: &AnalysisPayload) -> Result<AnalysisResult, ProviderError> {
        if !payload.price.is_finite() || payload.price <= 0.0 {
            return Err(ProviderError::InvalidResponse(format!(
                "Cannot analyze {} at price {}",
                payload.ticker, payload.price
            )));
        }
        tracing::debug!(prompt = %payload.to_prompt(), "Rule oracle received analysis request");
        Ok(score_signal(payload))
    }
}
