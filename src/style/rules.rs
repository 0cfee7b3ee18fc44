use crate::checker::tokenizer;
use crate::error::ConfigurationError;
use crate::style::phrases;
use crate::style::{StyleRule, StyleSuggestion};
use aho_corasick::{AhoCorasick, MatchKind};
use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Reverse;

lazy_static! {
    static ref PASSIVE: Regex = Regex::new(&format!(
        r"(?i)\b(?:am|are|were|being|is|been|was|be)\s+(?:\w+ed|{})\b",
        phrases::IRREGULAR_PARTICIPLES.join("|")
    ))
    .expect("passive voice pattern is valid");
    static ref SENTENCE_SO: Regex =
        Regex::new(r#"(?:^|[.!?]["')\]]?\s+)((?i:so))\b"#).expect("sentence start pattern is valid");
    static ref THERE_IS: Regex = Regex::new(r#"(?:^|[.!?]["')\]]?\s+)((?i:there\s+(?:is|are)))\b"#)
        .expect("sentence start pattern is valid");
    static ref SINGULAR_SUBJECT: Regex = Regex::new(
        r"(?i)\b(?:he|she|it)\s+(?:go|do|have|are|were|don't|need|want|say|make|take|come|know|think|seem|look)\b"
    )
    .expect("agreement pattern is valid");
    static ref PLURAL_SUBJECT: Regex =
        Regex::new(r"(?i)\b(?:they|we|you)\s+(?:is|was|has|goes|does|doesn't)\b").expect("agreement pattern is valid");
}

/// Compiled word lists, built once per checker
pub(crate) struct PhraseMatchers {
    weasel: AhoCorasick,
    adverb: AhoCorasick,
    too_wordy: AhoCorasick,
    cliches: AhoCorasick,
    to_be: AhoCorasick,
}

fn build(patterns: &[&str]) -> Result<AhoCorasick, ConfigurationError> {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::Standard)
        .build(patterns)
        .map_err(|e| ConfigurationError::StyleRules(e.to_string()))
}

impl PhraseMatchers {
    pub(crate) fn new() -> Result<Self, ConfigurationError> {
        Ok(Self {
            weasel: build(phrases::WEASEL_WORDS)?,
            adverb: build(phrases::ADVERBS)?,
            too_wordy: build(phrases::WORDY_PHRASES)?,
            cliches: build(phrases::CLICHES)?,
            to_be: build(phrases::TO_BE)?,
        })
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '_'
}

fn on_word_boundaries(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn suggestion(text: &str, start: usize, end: usize, describe: impl Fn(&str) -> String) -> StyleSuggestion {
    StyleSuggestion {
        reason: describe(&text[start..end]),
        index: start,
        offset: end - start,
    }
}

/// Longest whole-word matches, left to right, without overlaps
fn find_phrases(text: &str, matcher: &AhoCorasick, describe: impl Fn(&str) -> String) -> Vec<StyleSuggestion> {
    let mut spans: Vec<(usize, usize)> = matcher
        .find_overlapping_iter(text)
        .map(|m| (m.start(), m.end()))
        .filter(|&(start, end)| on_word_boundaries(text, start, end))
        .collect();
    spans.sort_by_key(|&(start, end)| (start, Reverse(end)));

    let mut found = Vec::new();
    let mut covered = 0;
    for (start, end) in spans {
        if start >= covered {
            found.push(suggestion(text, start, end, &describe));
            covered = end;
        }
    }
    found
}

fn find_pattern(text: &str, pattern: &Regex, describe: impl Fn(&str) -> String) -> Vec<StyleSuggestion> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(0)))
        .map(|m| suggestion(text, m.start(), m.end(), &describe))
        .collect()
}

fn repeated_words(text: &str) -> Vec<StyleSuggestion> {
    let tokens = tokenizer::words(text);
    tokens
        .windows(2)
        .filter(|pair| {
            let (first, second) = (pair[0], pair[1]);
            first.text.to_lowercase() == second.text.to_lowercase()
                && text[first.end()..second.index].chars().all(char::is_whitespace)
                && first.text.chars().any(char::is_alphabetic)
        })
        .map(|pair| StyleSuggestion {
            reason: format!("\"{}\" is repeated", pair[1].text),
            index: pair[0].index,
            offset: pair[1].end() - pair[0].index,
        })
        .collect()
}

fn disagreements(text: &str) -> Vec<StyleSuggestion> {
    let mut found = find_pattern(text, &PLURAL_SUBJECT, |m| {
        format!("\"{}\" may be a subject-verb disagreement", m)
    });

    for m in SINGULAR_SUBJECT.find_iter(text) {
        let preceding = tokenizer::words(&text[..m.start()]).last().map(|t| t.text.to_lowercase());
        if preceding.is_some_and(|word| phrases::AUXILIARIES.contains(&word.as_str())) {
            continue;
        }
        found.push(suggestion(text, m.start(), m.end(), |matched| {
            format!("\"{}\" may be a subject-verb disagreement", matched)
        }));
    }
    found
}

impl StyleRule {
    /// Every match of this rule in `text`, in no particular order
    pub(crate) fn evaluate(&self, text: &str, matchers: &PhraseMatchers) -> Vec<StyleSuggestion> {
        match self {
            StyleRule::Passive => find_pattern(text, &PASSIVE, |m| format!("\"{}\" may be passive voice", m)),
            StyleRule::Illusion => repeated_words(text),
            StyleRule::So => find_pattern(text, &SENTENCE_SO, |m| format!("\"{}\" adds no meaning", m)),
            StyleRule::ThereIs => {
                find_pattern(text, &THERE_IS, |m| format!("\"{}\" is unnecessary verbiage", m))
            }
            StyleRule::Weasel => find_phrases(text, &matchers.weasel, |m| format!("\"{}\" is a weasel word", m)),
            StyleRule::Adverb => find_phrases(text, &matchers.adverb, |m| format!("\"{}\" can weaken meaning", m)),
            StyleRule::TooWordy => {
                find_phrases(text, &matchers.too_wordy, |m| format!("\"{}\" is wordy or unneeded", m))
            }
            StyleRule::Cliches => find_phrases(text, &matchers.cliches, |m| format!("\"{}\" is a cliche", m)),
            StyleRule::Eprime => {
                find_phrases(text, &matchers.to_be, |m| format!("\"{}\" is a form of 'to be'", m))
            }
            StyleRule::Agreement => disagreements(text),
        }
    }
}
