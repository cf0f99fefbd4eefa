use std::collections::HashMap;
use std::fs;
use std::path::Path;

use pocket_abi::token::Token;
use tracing::debug;

use crate::errors::{ChatError, Result};

/// Token → id map. `vocab.txt` holds one token per line; the id is the line index.
#[derive(Debug, Clone, Default)]
pub struct Vocab {
    ids: HashMap<String, Token>,
}

impl Vocab {
    /// Fails once a line index no longer fits a `Token` id.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids = HashMap::new();
        for (i, tok) in tokens.into_iter().enumerate() {
            let id = line_id(i)?;
            ids.entry(tok.into()).or_insert(id);
        }
        Ok(Self { ids })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| ChatError::Vocab(format!("read {}: {e}", path.display())))?;
        let vocab = Self::from_tokens(text.lines().map(str::trim))?;
        if vocab.is_empty() {
            return Err(ChatError::Vocab(format!("{} is empty", path.display())));
        }
        debug!(path = %path.display(), tokens = vocab.len(), "loaded vocab");
        Ok(vocab)
    }

    #[inline]
    pub fn id(&self, token: &str) -> Option<Token> {
        self.ids.get(token).copied()
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.ids.contains_key(token)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

fn line_id(index: usize) -> Result<Token> {
    i32::try_from(index)
        .map(Token)
        .map_err(|_| ChatError::Vocab(format!("line {index} exceeds the id range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_line_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.txt");
        fs::write(&path, "[PAD]\n[UNK]\nhello\r\n##ing\n").unwrap();
        let v = Vocab::load(&path).unwrap();
        assert_eq!(v.len(), 4);
        assert_eq!(v.id("[UNK]"), Some(Token(1)));
        assert_eq!(v.id("hello"), Some(Token(2)));
        assert_eq!(v.id("##ing"), Some(Token(3)));
        assert!(!v.contains("bye"));
    }

    #[test]
    fn duplicate_keeps_first_id() {
        let v = Vocab::from_tokens(["a", "b", "a"]).unwrap();
        assert_eq!(v.id("a"), Some(Token(0)));
    }

    #[test]
    fn ids_stop_at_i32_range() {
        assert_eq!(line_id(i32::MAX as usize).unwrap(), Token(i32::MAX));
        assert!(matches!(
            line_id(i32::MAX as usize + 1),
            Err(ChatError::Vocab(_))
        ));
    }

    #[test]
    fn missing_or_empty_file_is_vocab_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Vocab::load(&dir.path().join("nope.txt")),
            Err(ChatError::Vocab(_))
        ));
        let empty = dir.path().join("empty.txt");
        fs::write(&empty, "").unwrap();
        assert!(matches!(Vocab::load(&empty), Err(ChatError::Vocab(_))));
    }
}
