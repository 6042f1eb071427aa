use thiserror::Error;

/// Unified error type for the estimation service.
///
/// Formatter and provider failures pass through [`Estimator::estimate`]
/// verbatim; the estimator adds no retry or fallback layer of its own.
///
/// [`Estimator::estimate`]: crate::Estimator::estimate
#[derive(Debug, Error)]
pub enum Error {
    /// The generation context carried neither a literal prompt nor a template.
    #[error("no prompt source: generation context has neither a literal context nor a template")]
    MissingPromptSource,

    #[error("template rendering failed: {message}")]
    Template { message: String },

    #[error("request formatting failed: {message}")]
    Formatter { message: String },

    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("runtime error: {message}")]
    Runtime { message: String },
}

impl Error {
    pub fn template(msg: impl Into<String>) -> Self {
        Error::Template {
            message: msg.into(),
        }
    }

    pub fn formatter(msg: impl Into<String>) -> Self {
        Error::Formatter {
            message: msg.into(),
        }
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Error::Provider {
            message: msg.into(),
        }
    }

    pub fn runtime(msg: impl Into<String>) -> Self {
        Error::Runtime {
            message: msg.into(),
        }
    }
}
