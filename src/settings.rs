//! Global settings snapshot and the layered provider configuration merge.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::providers::ProviderKind;
use crate::Result;

/// Read-only snapshot of the plugin-wide settings.
///
/// Estimation receives this as an explicit parameter rather than reading
/// ambient shared state, so two calls with the same snapshot see the same
/// configuration even if the live store changes in between.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Default model name; providers may override it in their own settings.
    pub model: String,
    /// Generation length budget (completion tokens).
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Which provider adapter handles requests.
    pub provider: ProviderKind,
    /// System prompt prepended to every request, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Free-form keys forwarded into the merged configuration.
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 500,
            temperature: Some(0.7),
            provider: ProviderKind::OpenAi,
            system_prompt: None,
            extra: Map::new(),
        }
    }
}

/// Merged configuration view consumed by token-limit and pricing logic.
pub type ProviderConfig = Map<String, Value>;

/// Overlay configuration layers: global settings, then the provider's own
/// settings, then the formatted body parameters. Later layers win on key
/// collision; the merged view, not any single layer, is what `calc_tokens`
/// and `calc_price` consume.
pub fn merge_config(
    global: &Settings,
    provider_settings: &Map<String, Value>,
    body_params: &Map<String, Value>,
) -> Result<ProviderConfig> {
    let mut merged = match serde_json::to_value(global)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in provider_settings {
        merged.insert(key.clone(), value.clone());
    }
    for (key, value) in body_params {
        merged.insert(key.clone(), value.clone());
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn provider_settings_override_global() {
        let mut settings = Settings::default();
        settings
            .extra
            .insert("top_p".to_string(), json!(0.1));

        let mut provider = Map::new();
        provider.insert("top_p".to_string(), json!(0.5));

        let merged = merge_config(&settings, &provider, &Map::new()).unwrap();
        assert_eq!(merged["top_p"], json!(0.5));
    }

    #[test]
    fn body_params_override_provider_settings() {
        let settings = Settings::default();

        let mut provider = Map::new();
        provider.insert("model".to_string(), json!("gpt-4"));
        let mut body = Map::new();
        body.insert("model".to_string(), json!("gpt-4o"));

        let merged = merge_config(&settings, &provider, &body).unwrap();
        assert_eq!(merged["model"], json!("gpt-4o"));
    }

    #[test]
    fn global_keys_survive_when_not_overridden() {
        let settings = Settings {
            max_tokens: 256,
            ..Settings::default()
        };
        let merged = merge_config(&settings, &Map::new(), &Map::new()).unwrap();
        assert_eq!(merged["max_tokens"], json!(256));
        assert_eq!(merged["provider"], json!("openai"));
    }
}
