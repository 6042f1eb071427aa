//! Anthropic adapter: character-ratio token estimation.
//!
//! Anthropic publishes no local tokenizer, so counts are estimated from a
//! characters-per-token ratio with a whitespace adjustment.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{clamp_tokens, completion_budget, configured_model, LlmProvider, ModelPricing, TokenCount};
use crate::settings::ProviderConfig;
use crate::types::Message;
use crate::Result;

const CHARS_PER_TOKEN: f64 = 3.5;
/// Role framing and message separators.
const MESSAGE_OVERHEAD: usize = 3;

const DEFAULT_MODEL: &str = "claude-3-haiku";
const DEFAULT_CONTEXT_WINDOW: u32 = 200_000;

pub struct AnthropicProvider {
    settings: Map<String, Value>,
}

impl AnthropicProvider {
    pub fn new() -> Self {
        Self {
            settings: Map::new(),
        }
    }

    pub fn with_settings(settings: Map<String, Value>) -> Self {
        Self { settings }
    }

    fn estimate(text: &str) -> usize {
        let base = (text.len() as f64 / CHARS_PER_TOKEN).ceil() as usize;
        let whitespace = text.chars().filter(|c| c.is_whitespace()).count();
        base + (whitespace as f64 * 0.1) as usize
    }
}

impl Default for AnthropicProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn provider_id(&self) -> &str {
        "anthropic"
    }

    fn get_settings(&self) -> Map<String, Value> {
        self.settings.clone()
    }

    async fn calc_tokens(
        &self,
        messages: &[Message],
        config: &ProviderConfig,
    ) -> Result<TokenCount> {
        let model = configured_model(config, DEFAULT_MODEL);

        let mut total = 0usize;
        for message in messages {
            total += MESSAGE_OVERHEAD;
            total += Self::estimate(&message.content);
        }

        let max_tokens = ModelPricing::for_model(model)
            .map(|p| p.context_window)
            .unwrap_or(DEFAULT_CONTEXT_WINDOW);

        Ok(TokenCount {
            tokens: clamp_tokens(total),
            max_tokens,
        })
    }

    async fn calc_price(&self, tokens: u32, config: &ProviderConfig) -> Result<f64> {
        let model = configured_model(config, DEFAULT_MODEL);
        let cost = match ModelPricing::for_model(model) {
            Some(pricing) => pricing.cost(tokens, completion_budget(config)),
            None => 0.0,
        };
        Ok(cost)
    }
}
