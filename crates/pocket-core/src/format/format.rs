//! Shared prompt carrier used between any formatter and the generator.
//!
//! Generators are expected to enforce stop sequences. Pocketchat itself does not;
//! this struct exists so a finished prompt travels with the stops that fit it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedPrompt {
    pub text: String,
    /// Optional textual stop sentinels for generators that want them.
    pub stop_sequences: Vec<String>,
    /// Some tokenizers prefer a leading space to avoid odd tokenization;
    /// generators can ignore this if they handle space-prefix internally.
    pub add_space_prefix: bool,
}

impl FormattedPrompt {
    pub fn new<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            stop_sequences: Vec::new(),
            add_space_prefix: true,
        }
    }

    pub fn with_stops<I, S>(mut self, stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_sequences = stops.into_iter().map(Into::into).collect();
        self
    }
}
