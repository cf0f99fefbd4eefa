//! Prompt formatting for Phi-style instruction models.

pub mod format;
pub mod handler;
pub mod prompt_format;
pub mod prompting;
pub mod template;

pub use format::FormattedPrompt;
pub use handler::PromptHandler;
pub use prompt_format::{PromptKind, select_prompt};
pub use prompting::{Phi3Format, PlainFormat, PromptStrategy};
pub use template::{
    ASSISTANT_HEADER, END_MARKER, PromptTemplate, SYSTEM_PREAMBLE, USER_PREFIX,
};
