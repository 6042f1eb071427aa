//! Request formatting: turning settings plus a resolved prompt into a
//! provider-shaped request payload.

use serde_json::{Map, Value};

use crate::settings::Settings;
use crate::types::Message;
use crate::Result;

/// The provider-shaped request body plus its derived parameters.
///
/// The estimator forwards `messages` to token accounting and folds `params`
/// into the merged configuration; it does not interpret the shape beyond
/// that.
#[derive(Debug, Clone, Default)]
pub struct BodyParams {
    pub messages: Vec<Message>,
    pub params: Map<String, Value>,
}

#[derive(Debug, Clone, Default)]
pub struct RequestParameters {
    pub body_params: BodyParams,
}

/// Builds a provider request payload from the current settings and prompt.
///
/// `estimating` marks an estimation-only pass: transport-only parameters may
/// be left out since no request is actually sent. `continuation` carries the
/// conversation-continuation marker, empty when starting fresh.
pub trait RequestFormatter: Send + Sync {
    fn get_request_parameters(
        &self,
        settings: &Settings,
        prompt: &str,
        estimating: bool,
        continuation: &str,
    ) -> Result<RequestParameters>;
}

/// Default chat-style formatter: optional system message, then the prompt
/// (with continuation appended) as the user turn.
#[derive(Debug, Clone, Default)]
pub struct ChatRequestFormatter;

impl RequestFormatter for ChatRequestFormatter {
    fn get_request_parameters(
        &self,
        settings: &Settings,
        prompt: &str,
        estimating: bool,
        continuation: &str,
    ) -> Result<RequestParameters> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = settings.system_prompt.as_deref() {
            if !system.is_empty() {
                messages.push(Message::system(system));
            }
        }
        let body = if continuation.is_empty() {
            prompt.to_string()
        } else {
            format!("{prompt}{continuation}")
        };
        messages.push(Message::user(body));

        let mut params = Map::new();
        params.insert("model".into(), Value::String(settings.model.clone()));
        params.insert("max_tokens".into(), Value::from(settings.max_tokens));
        if let Some(temperature) = settings.temperature {
            params.insert("temperature".into(), Value::from(temperature));
        }
        if !estimating {
            params.insert("stream".into(), Value::Bool(false));
        }

        Ok(RequestParameters {
            body_params: BodyParams { messages, params },
        })
    }
}
