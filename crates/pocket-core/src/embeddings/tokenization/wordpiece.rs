use std::sync::Arc;

use super::vocab::Vocab;
use super::whitespace_tokenize;

/// Prefix on every piece that continues a word.
pub const CONTINUATION_PREFIX: &str = "##";

/// Greedy longest-match-first subword splitter.
#[derive(Debug, Clone)]
pub struct WordpieceTokenizer {
    vocab: Arc<Vocab>,
    unk_token: String,
    max_input_chars_per_word: usize,
}

impl WordpieceTokenizer {
    pub fn new(
        vocab: Arc<Vocab>,
        unk_token: impl Into<String>,
        max_input_chars_per_word: usize,
    ) -> Self {
        Self {
            vocab,
            unk_token: unk_token.into(),
            max_input_chars_per_word,
        }
    }

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    pub fn unk_token(&self) -> &str {
        &self.unk_token
    }

    /// "unaffable" → ["un", "##aff", "##able"]. A word with any piece
    /// missing from the vocab, or longer than the limit, becomes one unk.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        for word in whitespace_tokenize(text) {
            match self.split_word(&word) {
                Some(pieces) => out.extend(pieces),
                None => out.push(self.unk_token.clone()),
            }
        }
        out
    }

    fn split_word(&self, word: &str) -> Option<Vec<String>> {
        let chars: Vec<char> = word.chars().collect();
        if chars.len() > self.max_input_chars_per_word {
            return None;
        }

        let mut pieces = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let mut end = chars.len();
            let mut found = None;
            while start < end {
                let sub: String = chars[start..end].iter().collect();
                let candidate = if start > 0 {
                    format!("{CONTINUATION_PREFIX}{sub}")
                } else {
                    sub
                };
                if self.vocab.contains(&candidate) {
                    found = Some(candidate);
                    break;
                }
                end -= 1;
            }
            pieces.push(found?);
            start = end;
        }
        Some(pieces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer(max: usize) -> WordpieceTokenizer {
        let vocab = Vocab::from_tokens([
            "[UNK]", "un", "##aff", "##able", "runn", "##ing", "want", "##ed", ",",
        ])
        .unwrap();
        WordpieceTokenizer::new(Arc::new(vocab), "[UNK]", max)
    }

    #[test]
    fn greedy_longest_match() {
        assert_eq!(
            tokenizer(100).tokenize("unaffable running"),
            ["un", "##aff", "##able", "runn", "##ing"]
        );
    }

    #[test]
    fn unknown_remainder_makes_whole_word_unk() {
        assert_eq!(
            tokenizer(100).tokenize("wanted wantx ,"),
            ["want", "##ed", "[UNK]", ","]
        );
    }

    #[test]
    fn overlong_word_is_unk() {
        assert_eq!(tokenizer(5).tokenize("unaffable want"), ["[UNK]", "want"]);
    }

    #[test]
    fn length_limit_counts_chars_not_bytes() {
        let vocab = Vocab::from_tokens(["[UNK]", "éé"]).unwrap();
        let t = WordpieceTokenizer::new(Arc::new(vocab), "[UNK]", 2);
        assert_eq!(t.tokenize("éé"), ["éé"]);
    }

    #[test]
    fn empty_input() {
        assert!(tokenizer(100).tokenize("   ").is_empty());
    }
}
