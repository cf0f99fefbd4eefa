//! Per-session formatter that tags each user turn and sends the preamble once.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::format::template::PromptTemplate;

/// Formats user turns for one conversation.
///
/// The first call returns the preamble plus the tagged turn; every later call
/// returns the tagged turn alone. The transition is one-way. The flag is
/// flipped with a single `swap`, so even a handler shared across threads
/// hands the preamble to exactly one caller.
#[derive(Debug)]
pub struct PromptHandler {
    template: PromptTemplate,
    first_turn: AtomicBool,
}

impl Default for PromptHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptHandler {
    /// Handler over the Phi delimiters.
    pub fn new() -> Self {
        Self::with_template(PromptTemplate::phi())
    }

    pub fn with_template(template: PromptTemplate) -> Self {
        Self {
            template,
            first_turn: AtomicBool::new(true),
        }
    }

    /// True until the first prompt has been formatted.
    #[inline]
    pub fn is_first_turn(&self) -> bool {
        self.first_turn.load(Ordering::Acquire)
    }

    #[inline]
    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Tag `user_text` for the model. Input is inserted verbatim.
    pub fn format(&self, user_text: &str) -> String {
        let first = self.first_turn.swap(false, Ordering::AcqRel);
        if first {
            debug!("formatting first turn with system preamble");
        }
        self.template.render_turn(user_text, first)
    }
}
