use crate::error::ConfigurationError;
use crate::style::StyleSettings;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".proofreader.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selectors {
    #[serde(default, deserialize_with = "one_or_many")]
    pub whitelist: Vec<String>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub blacklist: Vec<String>,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            whitelist: vec!["p, li, h1, h2, h3, h4, th, td, dl, figcaption".to_string()],
            blacklist: vec!["pre, code".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionaries {
    #[serde(rename = "build-in", alias = "built-in", default)]
    pub built_in: Vec<String>,

    #[serde(default)]
    pub custom: Vec<PathBuf>,
}

impl Default for Dictionaries {
    fn default() -> Self {
        Self {
            built_in: vec!["en_US".to_string()],
            custom: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub selectors: Selectors,
    pub dictionaries: Dictionaries,

    #[serde(rename = "write-good")]
    pub write_good: StyleSettings,

    pub ignore_patterns: Vec<String>,
    pub max_suggestions: usize,
    pub dictionary_dir: Option<PathBuf>,
    pub max_unit_length: usize,
}

/// One settings document; absent sections leave lower layers untouched
#[derive(Debug, Deserialize)]
struct ConfigLayer {
    selectors: Option<Selectors>,
    dictionaries: Option<Dictionaries>,
    #[serde(rename = "write-good")]
    write_good: Option<StyleSettings>,
    ignore_patterns: Option<Vec<String>>,
    max_suggestions: Option<usize>,
    dictionary_dir: Option<PathBuf>,
    max_unit_length: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<String>, D::Error> {
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(selector) => vec![selector],
        OneOrMany::Many(selectors) => selectors,
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            dictionaries: Dictionaries::default(),
            write_good: StyleSettings::default(),
            ignore_patterns: vec![
                r"\b[A-Z0-9_]{2,}\b".to_string(),    // ALL_CAPS
                r"https?://\S+".to_string(),         // URLs
                r"\b[a-fA-F0-9]{32,}\b".to_string(), // Hashes
                r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}".to_string(), // Emails
            ],
            max_suggestions: crate::checker::DEFAULT_MAX_SUGGESTIONS,
            dictionary_dir: None,
            max_unit_length: 20_000,
        }
    }
}

impl Config {
    /// Load configuration with priority: explicit file > local config > global config > defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                log::debug!("loading global config {}", global_path.display());
                config.merge(Self::read_layer(&global_path)?);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            log::debug!("loading local config {}", local_path.display());
            config.merge(Self::read_layer(&local_path)?);
        }

        if let Some(path) = explicit {
            log::debug!("loading config {}", path.display());
            config.merge(Self::read_layer(path)?);
        }

        Ok(config)
    }

    /// Read a single settings document on top of the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.merge(Self::read_layer(path)?);
        Ok(config)
    }

    fn read_layer(path: &Path) -> Result<ConfigLayer> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        }
    }

    fn merge(&mut self, layer: ConfigLayer) {
        if let Some(selectors) = layer.selectors {
            self.selectors = selectors;
        }
        if let Some(dictionaries) = layer.dictionaries {
            self.dictionaries = dictionaries;
        }
        if let Some(write_good) = layer.write_good {
            self.write_good = write_good;
        }
        if let Some(patterns) = layer.ignore_patterns {
            self.ignore_patterns = patterns;
        }
        if let Some(max) = layer.max_suggestions {
            self.max_suggestions = max;
        }
        if layer.dictionary_dir.is_some() {
            self.dictionary_dir = layer.dictionary_dir;
        }
        if let Some(max) = layer.max_unit_length {
            self.max_unit_length = max;
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        if !self.selectors.whitelist.iter().any(|s| !s.trim().is_empty()) {
            return Err(ConfigurationError::MissingWhitelist);
        }
        if self.dictionaries.built_in.is_empty() {
            return Err(ConfigurationError::NoDictionaries);
        }
        Ok(())
    }

    /// Directories searched for built-in dictionaries, in order
    pub fn dictionary_search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(dir) = &self.dictionary_dir {
            dirs.push(dir.clone());
        }
        dirs.push(PathBuf::from("dictionaries"));
        if let Some(data_dir) = Self::data_dir() {
            dirs.push(data_dir.join("dictionaries"));
        }
        dirs
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "proofreader").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "proofreader").map(|dirs| dirs.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_suggestions, 5);
        assert_eq!(config.dictionaries.built_in, vec!["en_US".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_settings_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{
                "selectors": {"whitelist": "p, li", "blacklist": ["pre", ".ad"]},
                "dictionaries": {"build-in": ["en_GB"], "custom": ["team.dic"]},
                "write-good": {"weasel": false}
            }"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.selectors.whitelist, vec!["p, li".to_string()]);
        assert_eq!(config.selectors.blacklist.len(), 2);
        assert_eq!(config.dictionaries.built_in, vec!["en_GB".to_string()]);
        assert_eq!(config.dictionaries.custom, vec![PathBuf::from("team.dic")]);
        assert_eq!(config.write_good.rules.get("weasel"), Some(&false));
        assert_eq!(config.max_suggestions, 5);
    }

    #[test]
    fn test_toml_merges_by_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proofreader.toml");
        fs::write(
            &path,
            "max_suggestions = 3\n\n[dictionaries]\nbuilt-in = [\"de_DE\"]\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.max_suggestions, 3);
        assert_eq!(config.dictionaries.built_in, vec!["de_DE".to_string()]);
        assert_eq!(config.selectors, Selectors::default());
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.selectors.whitelist = vec!["  ".to_string()];
        assert_eq!(config.validate(), Err(ConfigurationError::MissingWhitelist));

        let mut config = Config::default();
        config.dictionaries.built_in.clear();
        assert_eq!(config.validate(), Err(ConfigurationError::NoDictionaries));
    }

    #[test]
    fn test_unparseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_search_dirs() {
        let config = Config {
            dictionary_dir: Some(PathBuf::from("/opt/dicts")),
            ..Default::default()
        };
        let dirs = config.dictionary_search_dirs();
        assert_eq!(dirs[0], PathBuf::from("/opt/dicts"));
        assert_eq!(dirs[1], PathBuf::from("dictionaries"));
    }
}
