use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Prompt dialect a generator expects. Lets the host pick a matching formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptFlavor {
    Phi3,
    ChatMl,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    #[inline]
    pub fn system<S: Into<String>>(s: S) -> Self {
        Self {
            role: Role::System,
            content: s.into(),
        }
    }
    #[inline]
    pub fn user<S: Into<String>>(s: S) -> Self {
        Self {
            role: Role::User,
            content: s.into(),
        }
    }
    #[inline]
    pub fn assistant<S: Into<String>>(s: S) -> Self {
        Self {
            role: Role::Assistant,
            content: s.into(),
        }
    }
}

/// Engine-agnostic interface for text generators.
///
/// A generator keeps its own conversation context between calls, so the host
/// only sends the newest turn each time. The session preamble therefore rides
/// on the first prompt alone.
pub trait TextGenerator {
    /// Feed one fully formatted prompt and stream the reply through `on_delta`.
    /// Returns the complete reply.
    fn generate(&mut self, prompt: &str, on_delta: &mut dyn FnMut(&str))
    -> Result<String, String>;

    /// Hint so the host can choose a matching prompt wrapper.
    fn prompt_flavor(&self) -> PromptFlavor {
        PromptFlavor::Phi3
    }

    // ========== OPTIONAL HOOKS ==========

    /// Drop any cached conversation state while keeping the model loaded.
    fn reset(&mut self) {}
}
