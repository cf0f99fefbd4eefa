//! BERT tokenization: basic cleanup and splitting, then greedy wordpieces.

pub mod basic;
pub mod char_class;
pub mod full;
pub mod vocab;
pub mod wordpiece;

pub use basic::BasicTokenizer;
pub use full::FullTokenizer;
pub use vocab::Vocab;
pub use wordpiece::WordpieceTokenizer;

/// Trim, then split on runs of whitespace.
pub(crate) fn whitespace_tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}
