//! Error types for proofreading.
//!
//! Configuration and dictionary errors are fatal and abort a run before any
//! result is produced. [`UnitAnalysisError`] never escapes the pipeline; it is
//! attached to the degraded [`crate::ProofreadResult`] instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Whitelist has to be set.")]
    MissingWhitelist,

    #[error("At least one dictionary has to be set.")]
    NoDictionaries,

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Unknown style setting '{0}'")]
    UnknownStyleSetting(String),

    #[error("Invalid ignore pattern '{pattern}': {message}")]
    InvalidIgnorePattern { pattern: String, message: String },

    #[error("Failed to compile style rules: {0}")]
    StyleRules(String),
}

#[derive(Error, Debug)]
pub enum DictionaryLoadError {
    #[error("Failed to read dictionary file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dictionary '{0}' not found in any dictionary directory")]
    NotFound(String),

    #[error("Unknown encoding '{0}' in affix file")]
    UnknownEncoding(String),

    #[error("Malformed {kind} file at line {line}: {message}")]
    Malformed {
        kind: &'static str,
        line: usize,
        message: String,
    },

    #[error("Unknown flag alias {0}")]
    UnknownAlias(usize),

    #[error("Failed to build dictionary index: {0}")]
    Index(#[from] fst::Error),
}

impl DictionaryLoadError {
    pub(crate) fn affix(line: usize, message: impl Into<String>) -> Self {
        DictionaryLoadError::Malformed {
            kind: "affix",
            line,
            message: message.into(),
        }
    }

    pub(crate) fn wordlist(line: usize, message: impl Into<String>) -> Self {
        DictionaryLoadError::Malformed {
            kind: "wordlist",
            line,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitAnalysisError {
    #[error("Text unit of {length} characters exceeds the limit of {limit}")]
    TooLong { length: usize, limit: usize },

    #[error("Analysis aborted: {0}")]
    Panicked(String),
}

#[derive(Error, Debug)]
pub enum ProofreadError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    DictionaryLoad(#[from] DictionaryLoadError),
}

pub type Result<T> = std::result::Result<T, ProofreadError>;
