//! Token and cost estimation for a pending generation request.
//!
//! The estimator orchestrates: resolve the effective prompt text, ask the
//! request formatter for the provider-shaped body, merge the configuration
//! layers, then delegate token counting and pricing to the active provider.
//! Steps run strictly in that order since the request-body shape determines
//! token accounting.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::Error;
use crate::providers::LlmProvider;
use crate::request::{ChatRequestFormatter, RequestFormatter, RequestParameters};
use crate::settings::{merge_config, Settings};
use crate::template::Template;
use crate::Result;

/// What to estimate: a literal prompt, or a template plus rendering options.
///
/// A non-empty literal `context` takes precedence over the template.
#[derive(Clone, Default)]
pub struct GenerationContext {
    pub context: Option<String>,
    pub template: Option<Arc<dyn Template>>,
    pub options: Map<String, Value>,
}

impl GenerationContext {
    pub fn from_text(context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            ..Self::default()
        }
    }

    pub fn from_template(template: Arc<dyn Template>, options: Map<String, Value>) -> Self {
        Self {
            context: None,
            template: Some(template),
            options,
        }
    }
}

impl fmt::Debug for GenerationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationContext")
            .field("context", &self.context)
            .field("template", &self.template.as_ref().map(|_| "<template>"))
            .field("options", &self.options)
            .finish()
    }
}

/// The advisory estimate shown before a generation request is sent.
///
/// Created fresh per call and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimationResult {
    /// Tokens the prompt body will consume.
    pub tokens: u32,
    /// Context-window ceiling for the active model.
    pub max_tokens: u32,
    /// Configured generation length budget.
    pub completion_tokens: u32,
    /// Estimated price in the provider's currency units.
    pub cost: f64,
}

/// Orchestrates prompt resolution, request formatting, and provider
/// delegation into a single [`EstimationResult`].
pub struct Estimator {
    formatter: Arc<dyn RequestFormatter>,
    provider: Arc<dyn LlmProvider>,
}

impl Estimator {
    /// Estimator over the default chat request formatter.
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            formatter: Arc::new(ChatRequestFormatter),
            provider,
        }
    }

    pub fn with_formatter(
        formatter: Arc<dyn RequestFormatter>,
        provider: Arc<dyn LlmProvider>,
    ) -> Self {
        Self { formatter, provider }
    }

    /// Estimate tokens and cost for a pending request.
    ///
    /// Fails with [`Error::MissingPromptSource`] when the context carries
    /// neither a literal prompt nor a template. Formatter and provider
    /// failures propagate unmodified; estimation is advisory and a failed
    /// estimate is surfaced, not defaulted.
    pub async fn estimate(
        &self,
        context: &GenerationContext,
        settings: &Settings,
    ) -> Result<EstimationResult> {
        debug!(?context, "estimating tokens");

        let prompt = match context.context.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => match &context.template {
                Some(template) => template.input_template(&context.options).await?,
                None => return Err(Error::MissingPromptSource),
            },
        };

        let RequestParameters { body_params } =
            self.formatter
                .get_request_parameters(settings, &prompt, true, "")?;

        let provider_settings = self.provider.get_settings();
        let config = merge_config(settings, &provider_settings, &body_params.params)?;

        let count = self
            .provider
            .calc_tokens(&body_params.messages, &config)
            .await?;
        let cost = self.provider.calc_price(count.tokens, &config).await?;

        let completion_tokens = config
            .get("max_tokens")
            .and_then(Value::as_u64)
            .unwrap_or(0) as u32;

        let result = EstimationResult {
            tokens: count.tokens,
            max_tokens: count.max_tokens,
            completion_tokens,
            cost,
        };
        debug!(?result, "token estimate assembled");
        Ok(result)
    }
}
