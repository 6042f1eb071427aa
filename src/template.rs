//! Prompt templates: the rendering capability the estimator invokes when no
//! literal context is supplied.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::Result;

/// A prompt template that renders against an options map.
///
/// Rendering may suspend: a template is free to call out to a provider for a
/// sub-generation before producing its prompt string.
#[async_trait]
pub trait Template: Send + Sync {
    async fn input_template(&self, options: &Map<String, Value>) -> Result<String>;
}

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_.-]+)\s*\}\}").expect("placeholder pattern"));

/// Built-in template substituting `{{key}}` placeholders from the options
/// map. Missing keys render as empty; non-string values render as their JSON
/// form.
#[derive(Debug, Clone)]
pub struct StringTemplate {
    body: String,
}

impl StringTemplate {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[async_trait]
impl Template for StringTemplate {
    async fn input_template(&self, options: &Map<String, Value>) -> Result<String> {
        let rendered = PLACEHOLDER.replace_all(&self.body, |caps: &Captures| {
            match options.get(&caps[1]) {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            }
        });
        Ok(rendered.into_owned())
    }
}
