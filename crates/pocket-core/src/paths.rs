use dirs::data_dir;
use std::ffi::OsString;
use std::path::PathBuf;

/// Env override for the data root.
pub const HOME_ENV: &str = "POCKETCHAT_HOME";

/// $POCKETCHAT_HOME, else ~/.local/share/Pocketchat (or platform-equivalent)
pub fn pocket_home() -> PathBuf {
    home_from(std::env::var_os(HOME_ENV))
}

/// Data root given the raw override value. Empty counts as unset.
fn home_from(var: Option<OsString>) -> PathBuf {
    if let Some(dir) = var.filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    default_home()
}

fn default_home() -> PathBuf {
    data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("Pocketchat")
}

/// <home>/models
pub fn models_dir() -> PathBuf {
    pocket_home().join("models")
}

/// <home>/models/llm
pub fn llm_model_dir() -> PathBuf {
    models_dir().join("llm")
}

/// <home>/htp_config
pub fn htp_config_dir() -> PathBuf {
    pocket_home().join("htp_config")
}

/// <home>/config.json
pub fn config_path() -> PathBuf {
    pocket_home().join("config.json")
}
