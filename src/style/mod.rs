//! Heuristic style checks in the spirit of write-good.
//!
//! Each category is a [`StyleRule`] variant that can be switched on or off
//! through [`StyleSettings`]. A [`StyleChecker`] is immutable once built and
//! can be shared across threads.

mod phrases;
mod rules;

use crate::error::ConfigurationError;
use rules::PhraseMatchers;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleRule {
    Passive,
    Illusion,
    So,
    ThereIs,
    Weasel,
    Adverb,
    TooWordy,
    Cliches,
    Eprime,
    Agreement,
}

impl StyleRule {
    pub const ALL: [StyleRule; 10] = [
        StyleRule::Passive,
        StyleRule::Illusion,
        StyleRule::So,
        StyleRule::ThereIs,
        StyleRule::Weasel,
        StyleRule::Adverb,
        StyleRule::TooWordy,
        StyleRule::Cliches,
        StyleRule::Eprime,
        StyleRule::Agreement,
    ];

    /// Settings key for this category
    pub fn name(&self) -> &'static str {
        match self {
            StyleRule::Passive => "passive",
            StyleRule::Illusion => "illusion",
            StyleRule::So => "so",
            StyleRule::ThereIs => "thereIs",
            StyleRule::Weasel => "weasel",
            StyleRule::Adverb => "adverb",
            StyleRule::TooWordy => "tooWordy",
            StyleRule::Cliches => "cliches",
            StyleRule::Eprime => "eprime",
            StyleRule::Agreement => "agreement",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.name() == name)
    }

    pub fn enabled_by_default(&self) -> bool {
        !matches!(self, StyleRule::Eprime | StyleRule::Agreement)
    }
}

/// Style options as they appear under `write-good` in the settings file:
/// category toggles plus a `whitelist` of phrases that are never flagged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSettings {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub whitelist: Vec<String>,

    #[serde(flatten)]
    pub rules: BTreeMap<String, bool>,
}

impl StyleSettings {
    /// Toggle a category by its settings key
    pub fn set(&mut self, name: &str, enabled: bool) -> Result<(), ConfigurationError> {
        if StyleRule::from_name(name).is_none() {
            return Err(ConfigurationError::UnknownStyleSetting(name.to_string()));
        }
        self.rules.insert(name.to_string(), enabled);
        Ok(())
    }

    /// Resolve toggles against the defaults, rejecting unknown keys
    pub fn active_rules(&self) -> Result<Vec<StyleRule>, ConfigurationError> {
        if let Some(unknown) = self.rules.keys().find(|k| StyleRule::from_name(k).is_none()) {
            return Err(ConfigurationError::UnknownStyleSetting(unknown.clone()));
        }
        Ok(StyleRule::ALL
            .into_iter()
            .filter(|rule| {
                self.rules
                    .get(rule.name())
                    .copied()
                    .unwrap_or_else(|| rule.enabled_by_default())
            })
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSuggestion {
    pub reason: String,
    /// Byte offset of the match within the text unit
    pub index: usize,
    /// Byte length of the match
    pub offset: usize,
}

pub struct StyleChecker {
    rules: Vec<StyleRule>,
    matchers: PhraseMatchers,
    exceptions: HashSet<String>,
}

impl StyleChecker {
    pub fn new(settings: &StyleSettings) -> Result<Self, ConfigurationError> {
        Ok(Self {
            rules: settings.active_rules()?,
            matchers: PhraseMatchers::new()?,
            exceptions: settings.whitelist.iter().map(|p| p.to_lowercase()).collect(),
        })
    }

    pub fn active_rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Run every active rule over the text, ordered by match position
    pub fn analyze(&self, text: &str) -> Vec<StyleSuggestion> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut suggestions: Vec<StyleSuggestion> = self
            .rules
            .iter()
            .flat_map(|rule| rule.evaluate(text, &self.matchers))
            .filter(|s| {
                let matched = &text[s.index..s.index + s.offset];
                !self.exceptions.contains(&matched.to_lowercase())
            })
            .collect();

        suggestions.sort_by_key(|s| (s.index, s.offset));
        suggestions
    }
}
