//! OpenAI adapter: BPE-exact counting with chat-message overhead.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{clamp_tokens, completion_budget, configured_model, LlmProvider, ModelPricing, TokenCount};
use crate::settings::ProviderConfig;
use crate::types::Message;
use crate::vocab::Encoder;
use crate::Result;

/// Per-message framing overhead: `<|im_start|>{role}\n...<|im_end|>\n`.
const MESSAGE_OVERHEAD: usize = 4;
/// Every reply is primed with `<|im_start|>assistant`.
const REPLY_PRIMING: usize = 3;

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_CONTEXT_WINDOW: u32 = 4096;

pub struct OpenAiProvider {
    settings: Map<String, Value>,
}

impl OpenAiProvider {
    pub fn new() -> Self {
        Self {
            settings: Map::new(),
        }
    }

    /// Provider-level settings merged over the global layer.
    pub fn with_settings(settings: Map<String, Value>) -> Self {
        Self { settings }
    }
}

impl Default for OpenAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn provider_id(&self) -> &str {
        "openai"
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
        let encoder = Encoder::for_model(model);

        let mut total = 0usize;
        for message in messages {
            total += MESSAGE_OVERHEAD;
            total += encoder.count(message.role.as_str());
            total += encoder.count(&message.content);
        }
        if !messages.is_empty() {
            total += REPLY_PRIMING;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab;
    use serde_json::json;

    fn config(model: &str, max_tokens: u32) -> ProviderConfig {
        let mut c = ProviderConfig::new();
        c.insert("model".into(), json!(model));
        c.insert("max_tokens".into(), json!(max_tokens));
        c
    }

    #[tokio::test]
    async fn counts_include_message_overhead() {
        vocab::init().await.unwrap();
        let provider = OpenAiProvider::new();
        let messages = vec![Message::user("Hello, world!")];
        let count = provider
            .calc_tokens(&messages, &config("gpt-4", 100))
            .await
            .unwrap();
        let content_only = Encoder::for_model("gpt-4").count("Hello, world!");
        assert!(count.tokens as usize > content_only);
        assert_eq!(count.max_tokens, 8_192);
    }

    #[tokio::test]
    async fn empty_message_list_counts_zero() {
        vocab::init().await.unwrap();
        let provider = OpenAiProvider::new();
        let count = provider
            .calc_tokens(&[], &config("gpt-4", 100))
            .await
            .unwrap();
        assert_eq!(count.tokens, 0);
    }

    #[tokio::test]
    async fn price_uses_both_rates() {
        let provider = OpenAiProvider::new();
        // 1000 prompt tokens at $0.03/1k plus 500 completion at $0.06/1k.
        let cost = provider
            .calc_price(1000, &config("gpt-4", 500))
            .await
            .unwrap();
        assert!((cost - 0.06).abs() < 1e-12);
    }

    #[tokio::test]
    async fn unpriced_model_costs_nothing() {
        let provider = OpenAiProvider::new();
        let cost = provider
            .calc_price(1000, &config("experimental-model", 500))
            .await
            .unwrap();
        assert_eq!(cost, 0.0);
    }
}
