pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod error;
pub mod parser;
pub mod proofreader;
pub mod source;
pub mod style;

pub use checker::SpellChecker;
pub use config::Config;
pub use error::{ConfigurationError, DictionaryLoadError, ProofreadError, Result, UnitAnalysisError};
pub use parser::html::{SelectorConfig, TextUnit};
pub use proofreader::{FileReport, Proofreader};
pub use source::{Source, SourceLoader};
pub use style::{StyleChecker, StyleRule, StyleSettings, StyleSuggestion};

use serde::{Deserialize, Serialize};

/// A word no active dictionary accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellingSuggestion {
    pub word: String,
    pub suggestions: Vec<String>,
    /// Byte offset of the word within the text unit
    pub index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    pub spelling: Vec<SpellingSuggestion>,
    #[serde(rename = "writeGood")]
    pub write_good: Vec<StyleSuggestion>,
}

/// Findings for one text unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofreadResult {
    pub text: String,
    pub suggestions: Suggestions,
    /// Set when analysis of this unit failed and the suggestions are empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProofreadResult {
    pub fn is_clean(&self) -> bool {
        self.suggestions.spelling.is_empty() && self.suggestions.write_good.is_empty()
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}
