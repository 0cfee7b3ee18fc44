//! The proofreading pipeline.
//!
//! A [`Proofreader`] is configured through its mutators. Selectors and style
//! rules are compiled on first use and reused until a mutator changes them.
//! Each call to [`Proofreader::proofread`] extracts the text units and
//! analyzes them in parallel. Results come back in document order no matter
//! which unit finishes first.

use crate::checker::dictionary::Dictionary;
use crate::checker::SpellChecker;
use crate::config::Config;
use crate::dict::manager;
use crate::error::{ConfigurationError, DictionaryLoadError, Result, UnitAnalysisError};
use crate::parser;
use crate::parser::html::{self, SelectorConfig, TextUnit};
use crate::source::Source;
use crate::style::{StyleChecker, StyleSettings};
use crate::{ProofreadResult, Suggestions};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_MAX_UNIT_LENGTH: usize = 20_000;

/// Findings for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    pub results: Vec<ProofreadResult>,
}

impl FileReport {
    /// Keep only units that need attention
    pub fn only_findings(&self) -> FileReport {
        FileReport {
            file: self.file.clone(),
            results: self
                .results
                .iter()
                .filter(|r| !r.is_clean() || r.is_degraded())
                .cloned()
                .collect(),
        }
    }

    pub fn has_suggestions(&self) -> bool {
        self.results.iter().any(|r| !r.is_clean())
    }
}

/// Compiled selectors and style rules, shared by every unit of every call
struct Session {
    selectors: SelectorConfig,
    style: StyleChecker,
}

pub struct Proofreader {
    whitelist: Vec<String>,
    blacklist: Vec<String>,
    style_settings: StyleSettings,
    spelling: SpellChecker,
    max_unit_length: usize,
    compiled: OnceLock<std::result::Result<Session, ConfigurationError>>,
}

impl Default for Proofreader {
    fn default() -> Self {
        Self::new(SpellChecker::default())
    }
}

impl Proofreader {
    pub fn new(spelling: SpellChecker) -> Self {
        Self {
            whitelist: Vec::new(),
            blacklist: Vec::new(),
            style_settings: StyleSettings::default(),
            spelling,
            max_unit_length: DEFAULT_MAX_UNIT_LENGTH,
            compiled: OnceLock::new(),
        }
    }

    /// Build a proofreader from settings, loading every configured dictionary
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let mut spelling = SpellChecker::new(&config.ignore_patterns, config.max_suggestions)?;
        let search_dirs = config.dictionary_search_dirs();
        for name in &config.dictionaries.built_in {
            spelling.add(manager::load_builtin(name, &search_dirs)?);
        }
        for path in &config.dictionaries.custom {
            spelling.add_dictionary(path, None)?;
        }

        let mut proofreader = Self::new(spelling);
        proofreader.set_whitelist(config.selectors.whitelist.clone());
        proofreader.set_blacklist(config.selectors.blacklist.clone());
        proofreader.set_style_settings(config.write_good.clone());
        proofreader.set_max_unit_length(config.max_unit_length);
        Ok(proofreader)
    }

    pub fn set_whitelist(&mut self, selectors: Vec<String>) {
        self.whitelist = selectors;
        self.compiled.take();
    }

    pub fn set_blacklist(&mut self, selectors: Vec<String>) {
        self.blacklist = selectors;
        self.compiled.take();
    }

    pub fn set_style_settings(&mut self, settings: StyleSettings) {
        self.style_settings = settings;
        self.compiled.take();
    }

    /// Units longer than this many characters are reported degraded
    pub fn set_max_unit_length(&mut self, limit: usize) {
        self.max_unit_length = limit;
    }

    pub fn add_dictionary(&mut self, wordlist: &Path, affix: Option<&Path>) -> std::result::Result<(), DictionaryLoadError> {
        self.spelling.add_dictionary(wordlist, affix)
    }

    pub fn add_loaded_dictionary(&mut self, dictionary: Dictionary) {
        self.spelling.add(dictionary);
    }

    pub fn spell_checker(&self) -> &SpellChecker {
        &self.spelling
    }

    fn session(&self) -> std::result::Result<&Session, ConfigurationError> {
        if !self.whitelist.iter().any(|s| !s.trim().is_empty()) {
            return Err(ConfigurationError::MissingWhitelist);
        }
        if self.spelling.is_empty() {
            return Err(ConfigurationError::NoDictionaries);
        }
        self.compiled
            .get_or_init(|| {
                log::debug!("compiling selectors and style rules");
                Ok(Session {
                    selectors: SelectorConfig::new(&self.whitelist, &self.blacklist)?,
                    style: StyleChecker::new(&self.style_settings)?,
                })
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Proofread one HTML document
    pub fn proofread(&self, html: &str) -> Result<Vec<ProofreadResult>> {
        let session = self.session()?;
        Ok(self.run(session, html))
    }

    /// Proofread loaded sources, skipping those that failed to load
    pub fn proofread_sources(&self, sources: &[Source]) -> Result<Vec<FileReport>> {
        let session = self.session()?;

        let loaded: Vec<&Source> = sources
            .iter()
            .filter(|source| match &source.error {
                Some(error) => {
                    log::warn!("skipping {}: {}", source.path, error);
                    false
                }
                None => true,
            })
            .collect();

        Ok(loaded
            .par_iter()
            .map(|source| {
                let html = parser::normalize(&source.path, &source.content, source.media_type.as_deref());
                FileReport {
                    file: source.path.clone(),
                    results: self.run(session, &html),
                }
            })
            .collect())
    }

    fn run(&self, session: &Session, html: &str) -> Vec<ProofreadResult> {
        self.run_with(session, html, |text| {
            let (spelling, write_good) = rayon::join(|| self.spelling.analyze(text), || session.style.analyze(text));
            Suggestions { spelling, write_good }
        })
    }

    fn run_with<F>(&self, session: &Session, html: &str, analyze: F) -> Vec<ProofreadResult>
    where
        F: Fn(&str) -> Suggestions + Sync,
    {
        let units = html::extract(html, &session.selectors);
        let results: Vec<ProofreadResult> = units
            .par_iter()
            .map(|unit| self.analyze_unit(unit, &analyze))
            .collect();

        log::debug!(
            "proofread {} units, {} with findings",
            results.len(),
            results.iter().filter(|r| !r.is_clean()).count()
        );
        results
    }

    fn analyze_unit(&self, unit: &TextUnit, analyze: &(impl Fn(&str) -> Suggestions + Sync)) -> ProofreadResult {
        match self.try_analyze(&unit.text, analyze) {
            Ok(suggestions) => ProofreadResult {
                text: unit.text.clone(),
                suggestions,
                error: None,
            },
            Err(e) => {
                log::warn!("text unit {} <{}> degraded: {}", unit.index, unit.element, e);
                ProofreadResult {
                    text: unit.text.clone(),
                    suggestions: Suggestions::default(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    fn try_analyze(
        &self,
        text: &str,
        analyze: &(impl Fn(&str) -> Suggestions + Sync),
    ) -> std::result::Result<Suggestions, UnitAnalysisError> {
        let length = text.chars().count();
        if length > self.max_unit_length {
            return Err(UnitAnalysisError::TooLong {
                length,
                limit: self.max_unit_length,
            });
        }

        panic::catch_unwind(AssertUnwindSafe(|| analyze(text)))
            .map_err(|payload| UnitAnalysisError::Panicked(panic_message(payload.as_ref())))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProofreadError;

    const AFF: &str = "SET UTF-8\nTRY esiarntolcdugmphbyfvkwz\nSFX S Y 1\nSFX S 0 s .\n";
    const DIC: &str = "9\nhe\ngo/S\nto\nmarket/S\nthis\nis\nvery\ngood\ntitle\n";

    fn proofreader(whitelist: &[&str]) -> Proofreader {
        let mut proofreader = Proofreader::default();
        proofreader.add_loaded_dictionary(Dictionary::from_sources("en", DIC, Some(AFF)).unwrap());
        proofreader.set_whitelist(whitelist.iter().map(|s| s.to_string()).collect());
        proofreader
    }

    #[test]
    fn test_clean_unit() {
        let results = proofreader(&[".content"])
            .proofread(r#"<p class="content">He go to market</p>"#)
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "He go to market");
        assert!(results[0].is_clean());
    }

    #[test]
    fn test_agreement_rule_when_enabled() {
        let mut proofreader = proofreader(&[".content"]);
        let mut settings = StyleSettings::default();
        settings.set("agreement", true).unwrap();
        proofreader.set_style_settings(settings);

        let results = proofreader.proofread(r#"<p class="content">He go to market</p>"#).unwrap();
        assert!(results[0].suggestions.spelling.is_empty());
        assert_eq!(results[0].suggestions.write_good.len(), 1);
        assert!(!results[0].suggestions.write_good[0].reason.is_empty());
    }

    #[test]
    fn test_markdown_source() {
        let source = Source {
            path: "notes.md".to_string(),
            content: "# Title\n\nThis is *very* good.".to_string(),
            ..Default::default()
        };
        let reports = proofreader(&["p"]).proofread_sources(&[source]).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].results.len(), 1);
        assert_eq!(reports[0].results[0].text, "This is very good.");
        assert_eq!(reports[0].results[0].suggestions.write_good.len(), 1);
    }

    #[test]
    fn test_spelling_and_order() {
        let html = "<p>Markets go</p><p>He goo to markte</p><p>Very good</p>";
        let results = proofreader(&["p"]).proofread(html).unwrap();
        let texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["Markets go", "He goo to markte", "Very good"]);

        let spelling = &results[1].suggestions.spelling;
        assert_eq!(spelling.len(), 2);
        assert_eq!(spelling[0].word, "goo");
        assert_eq!(spelling[0].index, 3);
        assert_eq!(spelling[1].word, "markte");
        assert!(spelling[1].suggestions.contains(&"market".to_string()));
    }

    #[test]
    fn test_idempotent() {
        let proofreader = proofreader(&["p, li"]);
        let html = "<ul><li>So it is very godo</li></ul><p>There is a markte.</p>";
        let first = serde_json::to_string(&proofreader.proofread(html).unwrap()).unwrap();
        let second = serde_json::to_string(&proofreader.proofread(html).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_configuration_errors() {
        let err = proofreader(&[]).proofread("<p>text</p>").unwrap_err();
        assert!(matches!(err, ProofreadError::Configuration(ConfigurationError::MissingWhitelist)));

        let mut empty = Proofreader::default();
        empty.set_whitelist(vec!["p".to_string()]);
        let err = empty.proofread("<p>text</p>").unwrap_err();
        assert!(matches!(err, ProofreadError::Configuration(ConfigurationError::NoDictionaries)));

        let mut bad_style = proofreader(&["p"]);
        let mut settings = StyleSettings::default();
        settings.rules.insert("grammar".to_string(), true);
        bad_style.set_style_settings(settings);
        assert!(bad_style.proofread("<p>text</p>").is_err());
    }

    #[test]
    fn test_oversized_unit_is_degraded() {
        let mut proofreader = proofreader(&["p"]);
        proofreader.set_max_unit_length(10);

        let results = proofreader
            .proofread("<p>He go to market</p><p>Very good</p>")
            .unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_degraded());
        assert!(results[0].is_clean());
        assert!(results[0].error.as_deref().unwrap_or("").contains("exceeds the limit"));
        assert!(!results[1].is_degraded());
    }

    #[test]
    fn test_failed_sources_are_skipped() {
        let sources = vec![
            Source {
                path: "missing.html".to_string(),
                error: Some("not found".to_string()),
                ..Default::default()
            },
            Source {
                path: "page.html".to_string(),
                content: "<p>Very godo</p>".to_string(),
                ..Default::default()
            },
        ];
        let reports = proofreader(&["p"]).proofread_sources(&sources).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].file, "page.html");
        assert!(reports[0].has_suggestions());
    }

    #[test]
    fn test_only_findings() {
        let report = FileReport {
            file: "page.html".to_string(),
            results: proofreader(&["p"])
                .proofread("<p>He go to market</p><p>Very godo</p>")
                .unwrap(),
        };
        let filtered = report.only_findings();
        assert_eq!(filtered.results.len(), 1);
        assert_eq!(filtered.results[0].text, "Very godo");
    }

    #[test]
    fn test_result_json_shape() {
        let results = proofreader(&["p"]).proofread("<p>Very godo</p>").unwrap();
        let json = serde_json::to_value(&results).unwrap();
        assert!(json[0]["suggestions"]["writeGood"].is_array());
        assert_eq!(json[0]["suggestions"]["spelling"][0]["word"], "godo");
        assert!(json[0].get("error").is_none());
    }

    #[test]
    fn test_compiled_rules_are_reused_until_changed() {
        let mut proofreader = proofreader(&["p"]);
        proofreader.proofread("<p>Very good</p>").unwrap();
        assert!(proofreader.compiled.get().is_some());

        let before = proofreader.proofread("<li>Very godo</li>").unwrap();
        assert!(before.is_empty());

        proofreader.set_whitelist(vec!["li".to_string()]);
        assert!(proofreader.compiled.get().is_none());
        let after = proofreader.proofread("<li>Very godo</li>").unwrap();
        assert_eq!(after.len(), 1);
        assert!(!after[0].suggestions.spelling.is_empty());
    }

    #[test]
    fn test_panicking_unit_is_degraded() {
        let proofreader = proofreader(&["p"]);
        let session = proofreader.session().unwrap();
        let html = "<p>Very godo</p><p>boom</p><p>He go to market</p>";

        let results = proofreader.run_with(session, html, |text| {
            if text == "boom" {
                panic!("analysis exploded");
            }
            Suggestions {
                spelling: proofreader.spelling.analyze(text),
                write_good: Vec::new(),
            }
        });

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].suggestions.spelling[0].word, "godo");
        assert!(!results[0].is_degraded());
        assert!(results[1].is_degraded());
        assert!(results[1].is_clean());
        assert!(results[1].error.as_deref().unwrap_or("").contains("analysis exploded"));
        assert_eq!(results[2].text, "He go to market");
        assert!(!results[2].is_degraded());
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
    }
}
