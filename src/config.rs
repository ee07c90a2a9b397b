//! Configuration management for maskline
//!
//! Loads and saves the user's preferred prompt defaults (mask character,
//! output stream, required flag) from `~/.maskline/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::options::{Mask, OutputTarget, PromptOptions};

/// maskline configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Echo policy: a single character, `""` to echo nothing, `false` to echo
    /// the typed characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<Mask>,

    /// "stdout" or "stderr"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputTarget>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl Config {
    /// Get config directory path (~/.maskline)
    pub fn config_dir() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".maskline"))
            .context("Could not find home directory")
    }

    /// Get config file path (~/.maskline/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, or return default if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        // Atomic write: write to temp file then rename
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, &contents)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to rename config file to {}", path.display()))?;

        Ok(())
    }

    /// Prompt options carried by this config
    pub fn prompt_options(&self) -> PromptOptions {
        PromptOptions {
            mask: self.mask,
            output: self.output,
            required: self.required,
            ..PromptOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "mask = \"•\"\noutput = \"stderr\"\nrequired = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.mask, Some(Mask::Char('•')));
        assert_eq!(config.output, Some(OutputTarget::Stderr));
        assert_eq!(config.required, Some(true));

        let options = config.prompt_options();
        assert_eq!(options.mask, Some(Mask::Char('•')));
        assert_eq!(options.default, None);
    }

    #[test]
    fn test_malformed_config_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "mask = \"too long\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            mask: Some(Mask::Hidden),
            output: Some(OutputTarget::Stdout),
            required: None,
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
        assert!(!path.with_extension("tmp").exists());
    }
}
