//! CLI configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::MAX_RESULTS;

/// Settings for the command-line tool, loadable from a TOML file. Every
/// field has a default, so a partial file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Local dictionary file to load instead of downloading the archive.
    pub dict: Option<PathBuf>,
    /// Maximum number of results printed per query.
    pub max_results: usize,
    /// Print numbered-tone pinyin instead of diacritics.
    pub numbered_tones: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dict: None,
            max_results: MAX_RESULTS,
            numbered_tones: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.dict, None);
        assert_eq!(cfg.max_results, MAX_RESULTS);
        assert!(!cfg.numbered_tones);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml_str("max_results = 5").unwrap();
        assert_eq!(cfg.max_results, 5);
        assert_eq!(cfg.dict, None);
        assert!(!cfg.numbered_tones);
    }

    #[test]
    fn full_toml() {
        let cfg = Config::from_toml_str(
            "dict = \"cedict.txt.gz\"\nmax_results = 10\nnumbered_tones = true",
        )
        .unwrap();
        assert_eq!(cfg.dict, Some(PathBuf::from("cedict.txt.gz")));
        assert_eq!(cfg.max_results, 10);
        assert!(cfg.numbered_tones);
    }
}
