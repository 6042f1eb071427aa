//! Per-model pricing tables and context windows.

use serde::{Deserialize, Serialize};

/// Pricing and context-window information for one model family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPricing {
    pub model: String,
    /// Cost per 1000 prompt tokens, in `currency`.
    pub input_cost_per_1k: f64,
    /// Cost per 1000 completion tokens, in `currency`.
    pub output_cost_per_1k: f64,
    /// Context-window ceiling for the model.
    pub context_window: u32,
    pub currency: String,
}

impl ModelPricing {
    pub fn new(model: &str, input: f64, output: f64, context_window: u32) -> Self {
        Self {
            model: model.into(),
            input_cost_per_1k: input,
            output_cost_per_1k: output,
            context_window,
            currency: "USD".into(),
        }
    }

    /// Cost of a request: prompt tokens at the input rate plus the configured
    /// completion budget at the output rate.
    pub fn cost(&self, prompt_tokens: u32, completion_tokens: u32) -> f64 {
        (prompt_tokens as f64 / 1000.0) * self.input_cost_per_1k
            + (completion_tokens as f64 / 1000.0) * self.output_cost_per_1k
    }

    pub fn gpt_4o() -> Self {
        Self::new("gpt-4o", 0.005, 0.015, 128_000)
    }

    pub fn gpt_4o_mini() -> Self {
        Self::new("gpt-4o-mini", 0.00015, 0.0006, 128_000)
    }

    pub fn gpt_4() -> Self {
        Self::new("gpt-4", 0.03, 0.06, 8_192)
    }

    pub fn gpt_35_turbo() -> Self {
        Self::new("gpt-3.5-turbo", 0.0005, 0.0015, 16_385)
    }

    pub fn text_davinci_003() -> Self {
        Self::new("text-davinci-003", 0.02, 0.02, 4_097)
    }

    pub fn claude_35_sonnet() -> Self {
        Self::new("claude-3-5-sonnet", 0.003, 0.015, 200_000)
    }

    pub fn claude_3_haiku() -> Self {
        Self::new("claude-3-haiku", 0.00025, 0.00125, 200_000)
    }

    /// Look up pricing by model name. Substring matching, most specific
    /// first, so `gpt-4o-mini` does not fall into the `gpt-4o` bucket.
    pub fn for_model(model: &str) -> Option<Self> {
        let m = model.to_lowercase();
        if m.contains("gpt-4o-mini") {
            Some(Self::gpt_4o_mini())
        } else if m.contains("gpt-4o") {
            Some(Self::gpt_4o())
        } else if m.contains("gpt-4") {
            Some(Self::gpt_4())
        } else if m.contains("gpt-3.5") {
            Some(Self::gpt_35_turbo())
        } else if m.contains("text-davinci") {
            Some(Self::text_davinci_003())
        } else if m.contains("claude-3-5-sonnet") {
            Some(Self::claude_35_sonnet())
        } else if m.contains("claude-3-haiku") {
            Some(Self::claude_3_haiku())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_splits_input_and_output_rates() {
        let pricing = ModelPricing::new("test", 0.01, 0.03, 4096);
        let cost = pricing.cost(1000, 500);
        assert!((cost - (0.01 + 0.015)).abs() < 1e-12);
    }

    #[test]
    fn lookup_prefers_most_specific_match() {
        assert_eq!(
            ModelPricing::for_model("gpt-4o-mini-2024-07-18").unwrap().model,
            "gpt-4o-mini"
        );
        assert_eq!(ModelPricing::for_model("gpt-4o").unwrap().model, "gpt-4o");
        assert_eq!(
            ModelPricing::for_model("gpt-3.5-turbo-16k").unwrap().model,
            "gpt-3.5-turbo"
        );
        assert!(ModelPricing::for_model("unpriced-model").is_none());
    }
}
