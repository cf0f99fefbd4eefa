//! On-device asset layout.
//!
//! The app ships a bundle with two subtrees, `models/` and `htp_config/`.
//! On first start they are copied into the writable data root:
//!
//! ```text
//! <root>/models/llm/genie_config.json
//! <root>/models/llm/tokenizer.json
//! <root>/models/llm/*.bin
//! <root>/htp_config/qualcomm-snapdragon-8-gen3.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::ChatConfig;
use crate::errors::{ChatError, Result};

pub const MODELS_SUBDIR: &str = "models";
pub const LLM_SUBDIR: &str = "llm";
pub const HTP_CONFIG_SUBDIR: &str = "htp_config";
pub const DEFAULT_HTP_CONFIG: &str = "qualcomm-snapdragon-8-gen3.json";
pub const GENIE_CONFIG: &str = "genie_config.json";
pub const TOKENIZER_JSON: &str = "tokenizer.json";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: usize,
    pub skipped: usize,
}

impl std::ops::AddAssign for CopyReport {
    fn add_assign(&mut self, rhs: Self) {
        self.copied += rhs.copied;
        self.skipped += rhs.skipped;
    }
}

/// Recursively copy `src` into `dst`.
///
/// A file that already exists at the destination is left alone, so a
/// partially installed tree can be completed by running this again.
pub fn copy_assets_dir(src: &Path, dst: &Path) -> Result<CopyReport> {
    let meta = fs::metadata(src).map_err(|e| ChatError::asset(src, e.to_string()))?;
    let mut report = CopyReport::default();

    if meta.is_file() {
        if dst.exists() {
            debug!(path = %dst.display(), "already present; skipping");
            report.skipped += 1;
        } else {
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            copy_atomic(src, dst)
                .map_err(|e| ChatError::asset(dst, format!("copy from {}: {e}", src.display())))?;
            report.copied += 1;
        }
        return Ok(report);
    }

    fs::create_dir_all(dst).map_err(|e| ChatError::asset(dst, format!("mkdir: {e}")))?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        report += copy_assets_dir(&entry.path(), &dst.join(entry.file_name()))?;
    }
    Ok(report)
}

fn copy_atomic(src: &Path, dest: &Path) -> std::io::Result<()> {
    let tmp = dest.with_extension("tmpcopy");
    if tmp.exists() {
        let _ = fs::remove_file(&tmp);
    }
    fs::copy(src, &tmp)?;
    fs::rename(&tmp, dest)?;
    Ok(())
}

/// Resolved paths of an installed asset tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAssets {
    pub root: PathBuf,
    pub model_dir: PathBuf,
    pub htp_config_path: PathBuf,
}

impl ModelAssets {
    pub fn new(root: &Path) -> Self {
        Self::with_htp_config(root, DEFAULT_HTP_CONFIG)
    }

    pub fn with_htp_config(root: &Path, htp_file: impl AsRef<Path>) -> Self {
        Self {
            root: root.to_path_buf(),
            model_dir: root.join(MODELS_SUBDIR).join(LLM_SUBDIR),
            htp_config_path: root.join(HTP_CONFIG_SUBDIR).join(htp_file),
        }
    }

    /// Layout under `root` with the configured overrides applied.
    ///
    /// A relative `htp_config` names a file in `<root>/htp_config`; an absolute
    /// one is used as is. `model_dir` replaces `<root>/models/llm` outright.
    pub fn from_config(root: &Path, config: &ChatConfig) -> Self {
        let mut assets = match &config.htp_config {
            Some(file) => Self::with_htp_config(root, file),
            None => Self::new(root),
        };
        if let Some(dir) = &config.model_dir {
            assets.model_dir = dir.clone();
        }
        assets
    }

    pub fn genie_config_path(&self) -> PathBuf {
        self.model_dir.join(GENIE_CONFIG)
    }

    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join(TOKENIZER_JSON)
    }

    /// Copy the `models` and `htp_config` subtrees of `bundle` under `self.root`.
    pub fn install(&self, bundle: &Path) -> Result<CopyReport> {
        let mut report = CopyReport::default();
        for sub in [MODELS_SUBDIR, HTP_CONFIG_SUBDIR] {
            let src = bundle.join(sub);
            if !src.is_dir() {
                return Err(ChatError::asset(src, "bundle subtree missing"));
            }
            report += copy_assets_dir(&src, &self.root.join(sub))?;
        }
        info!(
            root = %self.root.display(),
            copied = report.copied,
            skipped = report.skipped,
            "assets installed"
        );
        Ok(report)
    }

    /// Fail on the first required file that is missing.
    pub fn verify(&self) -> Result<()> {
        for path in [
            self.genie_config_path(),
            self.tokenizer_path(),
            self.htp_config_path.clone(),
        ] {
            if !path.is_file() {
                return Err(ChatError::asset(path, "required file missing"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, body: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    fn bundle(dir: &Path) {
        write(&dir.join("models/llm").join(GENIE_CONFIG), "{}");
        write(&dir.join("models/llm").join(TOKENIZER_JSON), "{}");
        write(&dir.join("models/llm/weights.bin"), "w");
        write(&dir.join("htp_config").join(DEFAULT_HTP_CONFIG), "{}");
    }

    #[test]
    fn copies_tree_and_skips_existing() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        write(&src.path().join("a/b/c.txt"), "new");
        write(&src.path().join("top.txt"), "top");
        write(&dst.path().join("out/a/b/c.txt"), "old");

        let report = copy_assets_dir(src.path(), &dst.path().join("out")).unwrap();
        assert_eq!(report, CopyReport { copied: 1, skipped: 1 });
        assert_eq!(
            fs::read_to_string(dst.path().join("out/a/b/c.txt")).unwrap(),
            "old"
        );
        assert_eq!(fs::read_to_string(dst.path().join("out/top.txt")).unwrap(), "top");
        assert!(!dst.path().join("out/top.tmpcopy").exists());
    }

    #[test]
    fn missing_source_is_an_asset_error() {
        let dst = tempfile::tempdir().unwrap();
        let err = copy_assets_dir(Path::new("/definitely/not/here"), dst.path()).unwrap_err();
        assert!(matches!(err, ChatError::Asset { .. }));
    }

    #[test]
    fn install_then_verify() {
        let src = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        bundle(src.path());

        let assets = ModelAssets::new(root.path());
        let report = assets.install(src.path()).unwrap();
        assert_eq!(report.copied, 4);
        assets.verify().unwrap();
        assert!(assets.model_dir.ends_with("models/llm"));

        let again = assets.install(src.path()).unwrap();
        assert_eq!(again, CopyReport { copied: 0, skipped: 4 });
    }

    #[test]
    fn configured_htp_file_is_installed_and_verified() {
        let src = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        write(&src.path().join("models/llm").join(GENIE_CONFIG), "{}");
        write(&src.path().join("models/llm").join(TOKENIZER_JSON), "{}");
        write(
            &src.path().join("htp_config/qualcomm-snapdragon-8-elite.json"),
            "{}",
        );

        let cfg = ChatConfig {
            htp_config: Some(PathBuf::from("qualcomm-snapdragon-8-elite.json")),
            ..ChatConfig::default()
        };
        let assets = ModelAssets::from_config(root.path(), &cfg);
        assert!(
            assets
                .htp_config_path
                .ends_with("htp_config/qualcomm-snapdragon-8-elite.json")
        );
        assets.install(src.path()).unwrap();
        assets.verify().unwrap();

        // The default layout would look for the 8-gen3 file instead.
        assert!(ModelAssets::new(root.path()).verify().is_err());
    }

    #[test]
    fn configured_model_dir_replaces_default() {
        let root = tempfile::tempdir().unwrap();
        let models = tempfile::tempdir().unwrap();
        write(&models.path().join(GENIE_CONFIG), "{}");
        write(&models.path().join(TOKENIZER_JSON), "{}");
        write(&root.path().join("htp_config").join(DEFAULT_HTP_CONFIG), "{}");

        let cfg = ChatConfig {
            model_dir: Some(models.path().to_path_buf()),
            ..ChatConfig::default()
        };
        let assets = ModelAssets::from_config(root.path(), &cfg);
        assert_eq!(assets.model_dir, models.path().to_path_buf());
        assert_eq!(assets.tokenizer_path(), models.path().join(TOKENIZER_JSON));
        assets.verify().unwrap();
    }

    #[test]
    fn absolute_htp_path_is_used_as_is() {
        let cfg = ChatConfig {
            htp_config: Some(PathBuf::from("/vendor/etc/htp.json")),
            ..ChatConfig::default()
        };
        let assets = ModelAssets::from_config(Path::new("/data/pocket"), &cfg);
        assert_eq!(assets.htp_config_path, PathBuf::from("/vendor/etc/htp.json"));
    }

    #[test]
    fn verify_names_missing_file() {
        let root = tempfile::tempdir().unwrap();
        write(&root.path().join("models/llm").join(GENIE_CONFIG), "{}");
        let err = ModelAssets::new(root.path()).verify().unwrap_err();
        match err {
            ChatError::Asset { path, .. } => assert!(path.ends_with(TOKENIZER_JSON)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn install_requires_both_subtrees() {
        let src = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        write(&src.path().join("models/llm/x"), "x");
        assert!(ModelAssets::new(root.path()).install(src.path()).is_err());
    }
}
