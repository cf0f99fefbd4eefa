//! Text embedding support. The app embeds documents with a BERT-style
//! encoder; this module carries the tokenizer that feeds it.

pub mod tokenization;
