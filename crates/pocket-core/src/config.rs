//! On-disk settings (`config.json` under the data root).
//!
//! Every field has a default, so a missing file or a partial file both load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Result;
use crate::format::template::PromptTemplate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Directory holding `genie_config.json`, `tokenizer.json` and the model binaries.
    pub model_dir: Option<PathBuf>,
    /// HTP backend config file for the accelerator. Relative names resolve
    /// under `<root>/htp_config`.
    pub htp_config: Option<PathBuf>,
    /// Delimiters for the target model family.
    pub template: PromptTemplate,
    /// Keep at most this many (user, assistant) pairs in the session transcript.
    pub max_history: Option<usize>,
    pub tokenizer: TokenizerConfig,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            htp_config: None,
            template: PromptTemplate::phi(),
            max_history: None,
            tokenizer: TokenizerConfig::default(),
        }
    }
}

/// Embedding tokenizer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    pub vocab_path: Option<PathBuf>,
    pub lowercase: bool,
    pub unk_token: String,
    pub max_input_chars_per_word: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            vocab_path: None,
            lowercase: true,
            unk_token: "[UNK]".to_string(),
            max_input_chars_per_word: 200,
        }
    }
}

impl ChatConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let buf = fs::read(path)?;
        let cfg = serde_json::from_slice(&buf)?;
        debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Missing file means defaults; a present but malformed file is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Write via a temp file in the same directory, then rename over the target.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(self)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
