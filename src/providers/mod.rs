//! Provider adapter abstraction.
//!
//! Different providers tokenize differently (model-specific vocabularies,
//! message-formatting overhead) and own their own pricing tables, so token
//! and price accounting is delegated through an object-safe trait with one
//! concrete implementation per provider. `Box`/`Arc<dyn LlmProvider>` gives
//! the estimator runtime polymorphism over whichever provider is active.

pub mod anthropic;
pub mod openai;
pub mod pricing;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::settings::ProviderConfig;
use crate::types::Message;
use crate::Result;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;
pub use pricing::ModelPricing;

/// Which provider adapter handles a request; selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
}

/// Token accounting for one request body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenCount {
    /// Tokens the prompt body will consume.
    pub tokens: u32,
    /// Context-window ceiling for the active model.
    pub max_tokens: u32,
}

/// Capability set the estimator needs from the active provider.
///
/// Implementations own their accounting rules entirely; the estimator never
/// assumes a universal token-counting algorithm. `calc_tokens` and
/// `calc_price` are async because a provider may defer to a remote tokenizer
/// endpoint.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier.
    fn provider_id(&self) -> &str;

    /// Snapshot of the provider's own settings, independent of the global
    /// settings. Merged over the global layer before accounting.
    fn get_settings(&self) -> Map<String, Value>;

    /// Count the tokens a formatted message list will consume, and report
    /// the model's context-window ceiling.
    async fn calc_tokens(
        &self,
        messages: &[Message],
        config: &ProviderConfig,
    ) -> Result<TokenCount>;

    /// Price a request of `tokens` prompt tokens under the merged
    /// configuration. Non-negative, in the provider's currency units.
    async fn calc_price(&self, tokens: u32, config: &ProviderConfig) -> Result<f64>;
}

/// Select the adapter for a provider kind.
pub fn create_provider(kind: ProviderKind) -> Arc<dyn LlmProvider> {
    match kind {
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new()),
        ProviderKind::Anthropic => Arc::new(AnthropicProvider::new()),
    }
}

/// Saturating conversion for token totals; a pathological prompt reports
/// `u32::MAX` rather than wrapping.
pub(crate) fn clamp_tokens(total: usize) -> u32 {
    u32::try_from(total).unwrap_or(u32::MAX)
}

/// Completion budget from the merged configuration, defaulting to zero.
pub(crate) fn completion_budget(config: &ProviderConfig) -> u32 {
    config
        .get("max_tokens")
        .and_then(Value::as_u64)
        .unwrap_or(0) as u32
}

/// Active model from the merged configuration.
pub(crate) fn configured_model<'a>(config: &'a ProviderConfig, fallback: &'a str) -> &'a str {
    config
        .get("model")
        .and_then(Value::as_str)
        .unwrap_or(fallback)
}
