//! Pocketchat core: prompt formatting and chat sessions around an on-device
//! text generator, plus the asset layout and embedding tokenizer the app ships with.

pub mod assets;
pub mod config;
pub mod embeddings;
pub mod errors;
pub mod format;
pub mod memory;
pub mod paths;
pub mod session;

pub use config::{ChatConfig, TokenizerConfig};
pub use errors::{ChatError, Result};
pub use format::{
    FormattedPrompt, Phi3Format, PlainFormat, PromptHandler, PromptKind, PromptStrategy,
    PromptTemplate, select_prompt,
};
pub use memory::SessionMemory;
pub use session::ChatSession;
