use std::sync::Arc;

use pocket_abi::token::Token;

use super::basic::BasicTokenizer;
use super::vocab::Vocab;
use super::wordpiece::WordpieceTokenizer;
use crate::config::TokenizerConfig;
use crate::errors::{ChatError, Result};

/// Basic tokenization followed by wordpieces, with id lookup.
#[derive(Debug, Clone)]
pub struct FullTokenizer {
    basic: BasicTokenizer,
    wordpiece: WordpieceTokenizer,
}

impl FullTokenizer {
    pub fn new(vocab: Vocab, config: &TokenizerConfig) -> Self {
        Self {
            basic: BasicTokenizer::new(config.lowercase),
            wordpiece: WordpieceTokenizer::new(
                Arc::new(vocab),
                config.unk_token.clone(),
                config.max_input_chars_per_word,
            ),
        }
    }

    /// Load the vocab named by `config.vocab_path`.
    pub fn from_config(config: &TokenizerConfig) -> Result<Self> {
        let path = config
            .vocab_path
            .as_deref()
            .ok_or_else(|| ChatError::Vocab("no vocab_path configured".into()))?;
        Ok(Self::new(Vocab::load(path)?, config))
    }

    pub fn vocab(&self) -> &Vocab {
        self.wordpiece.vocab()
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.basic
            .tokenize(text)
            .iter()
            .flat_map(|word| self.wordpiece.tokenize(word))
            .collect()
    }

    /// Token ids for `text`. Pieces missing from the vocab map to the unk id.
    pub fn encode(&self, text: &str) -> Result<Vec<Token>> {
        let vocab = self.vocab();
        let unk = self.wordpiece.unk_token();
        let unk_id = vocab
            .id(unk)
            .ok_or_else(|| ChatError::Vocab(format!("unk token {unk:?} not in vocab")))?;
        Ok(self
            .tokenize(text)
            .iter()
            .map(|piece| vocab.id(piece).unwrap_or(unk_id))
            .collect())
    }
}
