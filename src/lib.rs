//! # promptgauge
//!
//! Token counting and cost estimation for AI text-generation plugins.
//!
//! Before a generation request is sent, the host wants to know what it will
//! cost: how many tokens the assembled prompt consumes, how they compare to
//! the model's context window, and what the provider will charge. This crate
//! implements that estimation end-to-end — BPE vocabulary loading, prompt
//! resolution (literal text or rendered template), provider-specific request
//! formatting, and per-provider token/price accounting — behind narrow trait
//! contracts so the host editor stays out of the picture.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use promptgauge::{
//!     create_provider, vocab, Estimator, GenerationContext, ProviderKind, Settings,
//! };
//!
//! #[tokio::main]
//! async fn main() -> promptgauge::Result<()> {
//!     // One-time tokenizer setup; must complete before encoders exist.
//!     vocab::init().await?;
//!
//!     let provider = create_provider(ProviderKind::OpenAi);
//!     let estimator = Estimator::new(provider);
//!
//!     let context = GenerationContext::from_text("Summarize this note.");
//!     let estimate = estimator.estimate(&context, &Settings::default()).await?;
//!     println!("{} tokens, ~${}", estimate.tokens, estimate.cost);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`vocab`] | BPE vocabulary loading, one-time runtime init, encoders |
//! | [`providers`] | Provider adapters: settings, token counting, pricing |
//! | [`estimator`] | Orchestration of prompt → request → count → price |
//! | [`request`] | Request formatter contract and default chat formatter |
//! | [`template`] | Prompt template contract and `{{var}}` substitution |
//! | [`settings`] | Settings snapshot and layered configuration merge |
//! | [`notice`] | Transient notification rendering of an estimate |
//! | [`types`] | Shared message payload types |

pub mod error;
pub mod estimator;
pub mod notice;
pub mod providers;
pub mod request;
pub mod settings;
pub mod template;
pub mod types;
pub mod vocab;

// Re-export main types for convenience
pub use error::Error;
pub use estimator::{Estimator, EstimationResult, GenerationContext};
pub use notice::{show_tokens, NotificationSurface, NOTICE_DURATION};
pub use providers::{create_provider, LlmProvider, ProviderKind, TokenCount};
pub use request::{ChatRequestFormatter, RequestFormatter, RequestParameters};
pub use settings::{merge_config, ProviderConfig, Settings};
pub use template::{StringTemplate, Template};
pub use types::{Message, MessageRole};
pub use vocab::{Encoder, Vocabulary, VocabularyKind};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
