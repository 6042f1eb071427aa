//! Vocabulary loader: one-time tokenizer-runtime setup and named BPE
//! vocabulary resolution.
//!
//! The byte-pair-encoding tables (merge ranks, special tokens, and the
//! pre-split pattern) are loaded once per process into an append-only cache.
//! [`init`] must complete before any encoder is constructed; it is idempotent
//! and safe to await from multiple call sites. Unknown vocabulary names
//! resolve to an empty vocabulary rather than an error so that model names
//! without a mapped encoding degrade gracefully instead of breaking
//! estimation.

pub mod encoder;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tiktoken_rs::CoreBPE;
use tokio::sync::OnceCell;

use crate::error::Error;
use crate::Result;

pub use encoder::Encoder;

/// The enumerated set of supported BPE vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VocabularyKind {
    /// GPT-4 and GPT-3.5-turbo family.
    Cl100kBase,
    /// text-davinci-003 and code models.
    P50kBase,
    /// Older GPT-3 base models.
    R50kBase,
}

impl VocabularyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VocabularyKind::Cl100kBase => "cl100k_base",
            VocabularyKind::P50kBase => "p50k_base",
            VocabularyKind::R50kBase => "r50k_base",
        }
    }

    pub const ALL: [VocabularyKind; 3] = [
        VocabularyKind::Cl100kBase,
        VocabularyKind::P50kBase,
        VocabularyKind::R50kBase,
    ];
}

impl fmt::Display for VocabularyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VocabularyKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "cl100k_base" => Ok(VocabularyKind::Cl100kBase),
            "p50k_base" => Ok(VocabularyKind::P50kBase),
            "r50k_base" => Ok(VocabularyKind::R50kBase),
            _ => Err(()),
        }
    }
}

/// A loaded BPE vocabulary, or the empty fallback for unmapped names.
///
/// The merge-rank table, special-token ids, and tokenization pattern live
/// inside the encoding table; `Vocabulary` carries it behind an `Arc` so
/// encoders share one loaded copy.
#[derive(Clone)]
pub struct Vocabulary {
    kind: Option<VocabularyKind>,
    bpe: Option<Arc<CoreBPE>>,
}

// CoreBPE has no Debug impl; report the kind and whether a table is loaded.
impl fmt::Debug for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vocabulary")
            .field("kind", &self.kind)
            .field("loaded", &self.bpe.is_some())
            .finish()
    }
}

impl Vocabulary {
    /// The fallback vocabulary with all fields absent.
    pub fn empty() -> Self {
        Self {
            kind: None,
            bpe: None,
        }
    }

    pub fn kind(&self) -> Option<VocabularyKind> {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.bpe.is_none()
    }

    pub(crate) fn bpe(&self) -> Option<&Arc<CoreBPE>> {
        self.bpe.as_ref()
    }
}

static VOCABULARIES: OnceCell<HashMap<VocabularyKind, Arc<CoreBPE>>> = OnceCell::const_new();

/// One-time setup of the tokenizer runtime.
///
/// Loads every enumerated vocabulary off the async thread and publishes the
/// cache. Must complete before any [`Encoder`] is constructed; concurrent
/// callers all await the same load. Teardown is a no-op: the tables are
/// immutable and live for the process.
pub async fn init() -> Result<()> {
    VOCABULARIES
        .get_or_try_init(|| async {
            tokio::task::spawn_blocking(load_all)
                .await
                .map_err(|e| Error::runtime(format!("vocabulary load task failed: {e}")))?
        })
        .await?;
    Ok(())
}

fn load_all() -> Result<HashMap<VocabularyKind, Arc<CoreBPE>>> {
    let mut cache = HashMap::with_capacity(VocabularyKind::ALL.len());
    for kind in VocabularyKind::ALL {
        let bpe = match kind {
            VocabularyKind::Cl100kBase => tiktoken_rs::cl100k_base(),
            VocabularyKind::P50kBase => tiktoken_rs::p50k_base(),
            VocabularyKind::R50kBase => tiktoken_rs::r50k_base(),
        }
        .map_err(|e| Error::runtime(format!("failed to load {kind} encoding: {e}")))?;
        cache.insert(kind, Arc::new(bpe));
    }
    Ok(cache)
}

/// Resolve a vocabulary by name.
///
/// Names outside the enumerated set return [`Vocabulary::empty`] — this
/// permissive fallback keeps estimation working for model names not yet
/// mapped to an encoding and must not be turned into an error.
///
/// # Panics
///
/// Calling this before [`init`] has completed is a programming error and
/// panics.
pub fn resolve(name: &str) -> Vocabulary {
    let cache = VOCABULARIES
        .get()
        .expect("vocab::init() must complete before resolving vocabularies");
    match name.parse::<VocabularyKind>() {
        Ok(kind) => Vocabulary {
            kind: Some(kind),
            bpe: cache.get(&kind).cloned(),
        },
        Err(()) => {
            tracing::warn!(vocabulary = name, "unknown vocabulary, using empty fallback");
            Vocabulary::empty()
        }
    }
}

/// Map a model name to its BPE vocabulary, if one is known.
pub fn kind_for_model(model: &str) -> Option<VocabularyKind> {
    let m = model.to_lowercase();
    if m.starts_with("gpt-") || m.starts_with("o1") || m.starts_with("chatgpt") {
        Some(VocabularyKind::Cl100kBase)
    } else if m.starts_with("text-davinci") || m.starts_with("code-") {
        Some(VocabularyKind::P50kBase)
    } else if m.starts_with("text-") || m.starts_with("davinci") || m.starts_with("curie") {
        Some(VocabularyKind::R50kBase)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_name_resolves_to_empty() {
        init().await.unwrap();
        let vocab = resolve("q99z_base");
        assert!(vocab.is_empty());
        assert_eq!(vocab.kind(), None);
    }

    #[tokio::test]
    async fn known_names_resolve_to_loaded_tables() {
        init().await.unwrap();
        for kind in VocabularyKind::ALL {
            let vocab = resolve(kind.as_str());
            assert!(!vocab.is_empty(), "{kind} should be loaded");
            assert_eq!(vocab.kind(), Some(kind));
        }
    }

    #[tokio::test]
    async fn init_is_idempotent() {
        init().await.unwrap();
        init().await.unwrap();
        assert!(!resolve("cl100k_base").is_empty());
    }

    #[test]
    fn model_mapping() {
        assert_eq!(kind_for_model("gpt-4"), Some(VocabularyKind::Cl100kBase));
        assert_eq!(
            kind_for_model("gpt-3.5-turbo"),
            Some(VocabularyKind::Cl100kBase)
        );
        assert_eq!(
            kind_for_model("text-davinci-003"),
            Some(VocabularyKind::P50kBase)
        );
        assert_eq!(kind_for_model("davinci"), Some(VocabularyKind::R50kBase));
        assert_eq!(kind_for_model("claude-3-haiku"), None);
    }
}
