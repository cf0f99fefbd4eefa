use super::char_class::{is_cjk, is_control, is_punctuation, is_whitespace};
use super::whitespace_tokenize;

/// Cleanup, CJK isolation, optional lowercasing and punctuation splitting.
#[derive(Debug, Clone, Copy)]
pub struct BasicTokenizer {
    lowercase: bool,
}

impl Default for BasicTokenizer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl BasicTokenizer {
    pub fn new(lowercase: bool) -> Self {
        Self { lowercase }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = isolate_cjk(&clean_text(text));

        let mut split = Vec::new();
        for word in whitespace_tokenize(&text) {
            let word = if self.lowercase {
                word.to_lowercase()
            } else {
                word
            };
            split.extend(split_on_punctuation(&word));
        }

        whitespace_tokenize(&split.join(" "))
    }
}

/// Drop NUL, U+FFFD and control chars; fold every whitespace char to a space.
fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|&c| c != '\0' && c != '\u{FFFD}' && !is_control(c))
        .map(|c| if is_whitespace(c) { ' ' } else { c })
        .collect()
}

fn isolate_cjk(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_cjk(c) {
            out.push(' ');
            out.push(c);
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

/// "hi,there!" → ["hi", ",", "there", "!"]
fn split_on_punctuation(word: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        if is_punctuation(c) {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            out.push(c.to_string());
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}
