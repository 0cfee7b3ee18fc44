pub mod affix;
pub mod dictionary;
pub mod suggestions;
pub mod tokenizer;

use crate::error::{ConfigurationError, DictionaryLoadError};
use crate::SpellingSuggestion;
use dictionary::Dictionary;
use regex::Regex;
use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// The set of active dictionaries, queried as a union
pub struct SpellChecker {
    dictionaries: Vec<Dictionary>,
    ignore_patterns: Vec<Regex>,
    max_suggestions: usize,
}

impl SpellChecker {
    pub fn new<S: AsRef<str>>(ignore_patterns: &[S], max_suggestions: usize) -> Result<Self, ConfigurationError> {
        let ignore_patterns = ignore_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern.as_ref()).map_err(|e| ConfigurationError::InvalidIgnorePattern {
                    pattern: pattern.as_ref().to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            dictionaries: Vec::new(),
            ignore_patterns,
            max_suggestions,
        })
    }

    /// Load a wordlist, with its affix file when given, and register it
    pub fn add_dictionary(&mut self, wordlist: &Path, affix: Option<&Path>) -> Result<(), DictionaryLoadError> {
        let name = wordlist
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("custom")
            .to_string();
        let dictionary = Dictionary::load(&name, wordlist, affix)?;
        self.add(dictionary);
        Ok(())
    }

    pub fn add(&mut self, dictionary: Dictionary) {
        log::debug!(
            "registered dictionary {} ({} stems, {} forms)",
            dictionary.name(),
            dictionary.stem_count(),
            dictionary.form_count()
        );
        self.dictionaries.push(dictionary);
    }

    pub fn dictionaries(&self) -> &[Dictionary] {
        &self.dictionaries
    }

    pub fn len(&self) -> usize {
        self.dictionaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionaries.is_empty()
    }

    /// A word is valid if any dictionary accepts it
    pub fn check(&self, word: &str) -> bool {
        let word = tokenizer::normalize(word);
        self.dictionaries.iter().any(|d| d.check(&word))
    }

    pub fn suggest(&self, word: &str) -> Vec<String> {
        let word = tokenizer::normalize(word);
        suggestions::generate(&word, &self.dictionaries, self.max_suggestions)
    }

    /// Spellcheck every word of a text unit
    pub fn analyze(&self, text: &str) -> Vec<SpellingSuggestion> {
        let masked = self.masked_ranges(text);
        let mut cache: HashMap<&str, Vec<String>> = HashMap::new();
        let mut found = Vec::new();

        for token in tokenizer::words(text) {
            if self.should_ignore(token.text) || overlaps(&masked, token.index..token.end()) {
                continue;
            }
            if self.check(token.text) {
                continue;
            }

            let suggestions = cache
                .entry(token.text)
                .or_insert_with(|| self.suggest(token.text))
                .clone();
            found.push(SpellingSuggestion {
                word: token.text.to_string(),
                suggestions,
                index: token.index,
            });
        }

        found
    }

    fn masked_ranges(&self, text: &str) -> Vec<Range<usize>> {
        self.ignore_patterns
            .iter()
            .flat_map(|pattern| pattern.find_iter(text).map(|m| m.range()))
            .collect()
    }

    fn should_ignore(&self, word: &str) -> bool {
        // Skip single characters
        if word.chars().count() <= 1 {
            return true;
        }

        // Skip anything with digits
        word.chars().any(|c| c.is_numeric())
    }
}

impl Default for SpellChecker {
    fn default() -> Self {
        Self {
            dictionaries: Vec::new(),
            ignore_patterns: Vec::new(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

fn overlaps(ranges: &[Range<usize>], token: Range<usize>) -> bool {
    ranges.iter().any(|r| r.start < token.end && token.start < r.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AFF: &str = "TRY esianrtolcdugmphbyfvkwzESIANRTOLCDUGMPHBYFVKWZ\nSFX S Y 1\nSFX S 0 s .\n";
    const DIC: &str = "5\nhe/S\ngo/S\nto\nmarket/S\nhello/S\n";

    fn checker() -> SpellChecker {
        let mut checker = SpellChecker::new(&[r"https?://\S+"], 5).unwrap();
        checker.add(Dictionary::from_sources("en", DIC, Some(AFF)).unwrap());
        checker
    }

    #[test]
    fn test_union_of_dictionaries() {
        let mut checker = checker();
        assert!(!checker.check("Kubernetes"));

        checker.add(Dictionary::from_sources("custom", "Kubernetes\n", None).unwrap());
        assert!(checker.check("Kubernetes"));
        assert!(checker.check("markets"));
        assert_eq!(checker.len(), 2);
    }

    #[test]
    fn test_clean_text() {
        assert!(checker().analyze("He go to market").is_empty());
        assert!(checker().analyze("").is_empty());
    }

    #[test]
    fn test_misspellings_with_offsets() {
        let found = checker().analyze("Helo, go to markte");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].word, "Helo");
        assert_eq!(found[0].index, 0);
        assert_eq!(found[0].suggestions.first().map(String::as_str), Some("Hello"));
        assert_eq!(found[1].word, "markte");
        assert_eq!(found[1].index, 12);
        assert!(found[1].suggestions.contains(&"market".to_string()));
    }

    #[test]
    fn test_ignored_tokens() {
        let found = checker().analyze("go to https://exampel.com/markte x 42nd");
        assert!(found.is_empty());
    }

    #[test]
    fn test_long_token_reported_without_suggestions() {
        let token = "qxz".repeat(1_700);
        let started = std::time::Instant::now();
        let found = checker().analyze(&format!("go to {}", token));

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].index, 6);
        assert!(found[0].suggestions.is_empty());
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        let err = SpellChecker::new(&["(unclosed"], 5).err();
        assert!(matches!(err, Some(ConfigurationError::InvalidIgnorePattern { .. })));
    }

    #[test]
    fn test_add_dictionary_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("team.dic");
        std::fs::write(&path, "Kubernetes\nkubectl\n").unwrap();

        let mut checker = SpellChecker::new::<&str>(&[], 3).unwrap();
        checker.add_dictionary(&path, None).unwrap();
        assert_eq!(checker.dictionaries()[0].name(), "team");
        assert!(checker.check("kubectl"));

        let missing = checker.add_dictionary(&dir.path().join("missing.dic"), None);
        assert!(matches!(missing, Err(DictionaryLoadError::Io { .. })));
    }
}
