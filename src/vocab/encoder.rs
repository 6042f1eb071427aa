//! Stateless encoders over a resolved vocabulary.

use super::{kind_for_model, resolve, Vocabulary};

/// A stateless text encoder bound to exactly one [`Vocabulary`].
///
/// Construction never fails, even for unknown vocabulary names: an encoder
/// over the empty vocabulary yields no ids and a zero count. Encoders are
/// cheap; callers may recreate one per call or cache by vocabulary name.
#[derive(Debug, Clone)]
pub struct Encoder {
    vocab: Vocabulary,
}

impl Encoder {
    /// Build an encoder for a vocabulary name (`"cl100k_base"` etc).
    ///
    /// Requires [`super::init`] to have completed.
    pub fn for_vocabulary(name: &str) -> Self {
        Self {
            vocab: resolve(name),
        }
    }

    /// Build an encoder for the vocabulary mapped from a model name, falling
    /// back to the empty vocabulary for unmapped models.
    pub fn for_model(model: &str) -> Self {
        match kind_for_model(model) {
            Some(kind) => Self::for_vocabulary(kind.as_str()),
            None => Self {
                vocab: Vocabulary::empty(),
            },
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Encode text into an ordered sequence of token ids.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        match self.vocab.bpe() {
            Some(bpe) => bpe
                .encode_ordinary(text)
                .into_iter()
                .map(|id| id as u32)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Count the tokens in `text`.
    ///
    /// An empty vocabulary counts zero tokens; callers that need an
    /// approximate count for unmapped models estimate at the provider layer
    /// instead.
    pub fn count(&self, text: &str) -> usize {
        match self.vocab.bpe() {
            Some(bpe) => bpe.encode_ordinary(text).len(),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::init;

    #[tokio::test]
    async fn encodes_with_known_vocabulary() {
        init().await.unwrap();
        let encoder = Encoder::for_vocabulary("cl100k_base");
        let ids = encoder.encode("Hello, world!");
        assert!(!ids.is_empty());
        assert_eq!(encoder.count("Hello, world!"), ids.len());
        assert_eq!(encoder.count(""), 0);
    }

    #[tokio::test]
    async fn unknown_vocabulary_counts_zero() {
        init().await.unwrap();
        let encoder = Encoder::for_vocabulary("not_a_real_encoding");
        assert!(encoder.vocabulary().is_empty());
        assert_eq!(encoder.encode("some text"), Vec::<u32>::new());
        assert_eq!(encoder.count("some text"), 0);
    }

    #[tokio::test]
    async fn model_lookup_selects_vocabulary() {
        init().await.unwrap();
        let encoder = Encoder::for_model("gpt-4");
        assert!(!encoder.vocabulary().is_empty());
        let unmapped = Encoder::for_model("mystery-model-9000");
        assert!(unmapped.vocabulary().is_empty());
    }
}
