use crate::checker::affix::{detect_encoding, AffixRules, FlagSet};
use crate::error::DictionaryLoadError;
use encoding_rs::{Encoding, UTF_8};
use fst::automaton::Levenshtein;
use fst::{IntoStreamer, Set, Streamer};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Casing {
    Lower,
    Title,
    Upper,
    Mixed,
}

impl Casing {
    pub(crate) fn of(word: &str) -> Self {
        let letters = word.chars().filter(|c| c.is_alphabetic());
        let (upper, total) = letters.fold((0, 0), |(u, t), c| (u + c.is_uppercase() as usize, t + 1));
        let first_upper = word.chars().next().is_some_and(char::is_uppercase);

        match upper {
            0 => Casing::Lower,
            n if n == total && total > 1 => Casing::Upper,
            1 if first_upper => Casing::Title,
            _ => Casing::Mixed,
        }
    }
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// One loaded dictionary: stems with their flags, the affix rules that
/// derive further forms, and an FST of known forms for fuzzy lookups.
pub struct Dictionary {
    name: String,
    rules: AffixRules,
    stems: HashMap<String, Vec<FlagSet>>,
    index: Set<Vec<u8>>,
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("name", &self.name)
            .field("stems", &self.stems.len())
            .field("forms", &self.index.len())
            .finish()
    }
}

impl Dictionary {
    /// Load a wordlist, optionally paired with an affix file.
    ///
    /// Without an affix file the wordlist is a flat list of valid words and
    /// any `/FLAGS` annotations carry no meaning.
    pub fn load(name: &str, wordlist: &Path, affix: Option<&Path>) -> Result<Self, DictionaryLoadError> {
        let (rules, encoding) = match affix {
            Some(path) => {
                let bytes = read_bytes(path)?;
                let encoding = detect_encoding(&bytes)?;
                (AffixRules::parse(&decode(&bytes, encoding))?, encoding)
            }
            None => (AffixRules::default(), UTF_8),
        };

        let bytes = read_bytes(wordlist)?;
        Self::build(name, &decode(&bytes, encoding), rules)
    }

    /// Build a dictionary from in-memory sources
    pub fn from_sources(name: &str, wordlist: &str, affix: Option<&str>) -> Result<Self, DictionaryLoadError> {
        let rules = match affix {
            Some(text) => AffixRules::parse(text)?,
            None => AffixRules::default(),
        };
        Self::build(name, wordlist, rules)
    }

    fn build(name: &str, wordlist: &str, rules: AffixRules) -> Result<Self, DictionaryLoadError> {
        let mut stems: HashMap<String, Vec<FlagSet>> = HashMap::new();

        for (i, line) in wordlist.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if i == 0 && line.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }

            let entry = line.split_whitespace().next().unwrap_or_default();
            let (word, raw_flags) = split_entry(entry);
            if word.is_empty() {
                continue;
            }

            let flags = if raw_flags.is_empty() {
                Vec::new()
            } else {
                rules.resolve_flags(&raw_flags).map_err(|e| {
                    if rules.has_aliases() {
                        DictionaryLoadError::UnknownAlias(raw_flags.parse().unwrap_or_default())
                    } else {
                        DictionaryLoadError::wordlist(i + 1, e)
                    }
                })?
            };
            stems.entry(word).or_default().push(FlagSet::new(flags));
        }

        let index = Set::from_iter(Self::expand_forms(&stems, &rules))?;
        log::debug!(
            "dictionary '{}': {} stems, {} indexed forms",
            name,
            stems.len(),
            index.len()
        );

        Ok(Self {
            name: name.to_string(),
            rules,
            stems,
            index,
        })
    }

    /// Every suggestable surface form, lowercased and sorted for the FST
    fn expand_forms(stems: &HashMap<String, Vec<FlagSet>>, rules: &AffixRules) -> BTreeSet<String> {
        let mut forms = BTreeSet::new();

        for (stem, homonyms) in stems {
            for flags in homonyms {
                if flags.has(rules.forbidden) || flags.has(rules.no_suggest) {
                    continue;
                }
                if !flags.has(rules.need_affix) {
                    forms.insert(stem.to_lowercase());
                }

                for flag in flags.iter() {
                    for suffix in rules.suffixes_with_flag(flag) {
                        let Some(suffixed) = suffix.apply_suffix(stem) else {
                            continue;
                        };
                        if suffix.cross_product {
                            for other in flags.iter() {
                                for prefix in rules.prefixes_with_flag(other).filter(|p| p.cross_product) {
                                    if let Some(form) = prefix.apply_prefix(&suffixed) {
                                        forms.insert(form.to_lowercase());
                                    }
                                }
                            }
                        }
                        forms.insert(suffixed.to_lowercase());
                    }
                    for prefix in rules.prefixes_with_flag(flag) {
                        if let Some(form) = prefix.apply_prefix(stem) {
                            forms.insert(form.to_lowercase());
                        }
                    }
                }
            }
        }

        forms
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &AffixRules {
        &self.rules
    }

    /// Check if a word is valid, applying case folding and affix stripping
    pub fn check(&self, word: &str) -> bool {
        if word.is_empty() || self.is_forbidden(word) {
            return false;
        }

        match Casing::of(word) {
            Casing::Lower | Casing::Mixed => self.check_form(word, false),
            Casing::Title => self.check_form(word, false) || self.check_form(&word.to_lowercase(), true),
            Casing::Upper => {
                self.check_form(word, false)
                    || self.check_form(&capitalize(word), true)
                    || self.check_form(&word.to_lowercase(), true)
            }
        }
    }

    fn check_form(&self, word: &str, folded: bool) -> bool {
        let rules = &self.rules;
        let case_ok = |flags: &FlagSet| !folded || !flags.has(rules.keep_case);

        if self.lookup(word, |flags| !flags.has(rules.need_affix) && case_ok(flags)) {
            return true;
        }

        for suffix in rules.suffixes_for(word) {
            if let Some(stem) = suffix.strip_suffix_from(word) {
                if self.lookup(&stem, |flags| flags.contains(suffix.flag) && case_ok(flags)) {
                    return true;
                }
            }
        }

        for prefix in rules.prefixes_for(word) {
            let Some(stem) = prefix.strip_prefix_from(word) else {
                continue;
            };
            if self.lookup(&stem, |flags| flags.contains(prefix.flag) && case_ok(flags)) {
                return true;
            }
            if !prefix.cross_product {
                continue;
            }
            for suffix in rules.suffixes_for(&stem).filter(|s| s.cross_product) {
                if let Some(root) = suffix.strip_suffix_from(&stem) {
                    let matched = self.lookup(&root, |flags| {
                        flags.contains(prefix.flag) && flags.contains(suffix.flag) && case_ok(flags)
                    });
                    if matched {
                        return true;
                    }
                }
            }
        }

        false
    }

    fn lookup(&self, stem: &str, accept: impl Fn(&FlagSet) -> bool) -> bool {
        self.stems.get(stem).is_some_and(|homonyms| {
            homonyms
                .iter()
                .any(|flags| !flags.has(self.rules.forbidden) && accept(flags))
        })
    }

    fn is_forbidden(&self, word: &str) -> bool {
        self.rules.forbidden.is_some()
            && self
                .stems
                .get(word)
                .is_some_and(|homonyms| homonyms.iter().any(|flags| flags.has(self.rules.forbidden)))
    }

    /// Whether the stem is marked as never to be offered as a suggestion
    pub fn is_no_suggest(&self, word: &str) -> bool {
        self.rules.no_suggest.is_some()
            && self
                .stems
                .get(word)
                .is_some_and(|homonyms| homonyms.iter().all(|flags| flags.has(self.rules.no_suggest)))
    }

    /// Indexed forms within `distance` edits of the lowercased word
    pub fn similar_words(&self, word: &str, distance: u32) -> Vec<String> {
        let automaton = match Levenshtein::new(&word.to_lowercase(), distance) {
            Ok(automaton) => automaton,
            Err(e) => {
                log::debug!("skipping fuzzy lookup for '{}': {}", word, e);
                return Vec::new();
            }
        };

        let mut results = Vec::new();
        let mut stream = self.index.search(automaton).into_stream();
        while let Some(key) = stream.next() {
            if let Ok(form) = String::from_utf8(key.to_vec()) {
                results.push(form);
            }
        }
        results
    }

    pub fn stem_count(&self) -> usize {
        self.stems.len()
    }

    pub fn form_count(&self) -> usize {
        self.index.len()
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, DictionaryLoadError> {
    fs::read(path).map_err(|source| DictionaryLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::warn!("dictionary contains bytes invalid for {}", encoding.name());
    }
    text.into_owned()
}

/// Split `word/FLAGS`, honouring `\/` escapes inside the word
fn split_entry(entry: &str) -> (String, String) {
    let mut word = String::new();
    let mut chars = entry.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    word.push(escaped);
                }
            }
            '/' => return (word, chars.collect()),
            other => word.push(other),
        }
    }
    (word, String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const AFF: &str = "SET UTF-8\nKEEPCASE K\nFORBIDDENWORD X\nNEEDAFFIX N\n\
        PFX A Y 1\nPFX A 0 re .\n\
        SFX S Y 2\nSFX S y ies [^aeiou]y\nSFX S 0 s [^y]\n\
        SFX D Y 2\nSFX D 0 d e\nSFX D 0 ed [^e]\n";

    const DIC: &str = "7\nwork/ADS\ncity/S\nmake/AD\nNASA/K\nParis\nfoo/N\nrecieve/X\n";

    fn dict() -> Dictionary {
        Dictionary::from_sources("test", DIC, Some(AFF)).unwrap()
    }

    #[test]
    fn test_stems_and_affixes() {
        let d = dict();
        assert!(d.check("work"));
        assert!(d.check("works"));
        assert!(d.check("worked"));
        assert!(d.check("rework"));
        assert!(d.check("reworked"));
        assert!(d.check("cities"));
        assert!(d.check("remake"));
        assert!(!d.check("citys"));
        assert!(!d.check("workz"));
    }

    #[test]
    fn test_casing_rules() {
        let d = dict();
        assert!(d.check("Work"));
        assert!(d.check("WORKED"));
        assert!(d.check("Paris"));
        assert!(d.check("PARIS"));
        assert!(!d.check("paris"));
        assert!(d.check("NASA"));
        assert!(!d.check("Nasa"));
    }

    #[test]
    fn test_flag_semantics() {
        let d = dict();
        assert!(!d.check("foo"));
        assert!(!d.check("recieve"));
        assert!(!d.check("Recieve"));
    }

    #[test]
    fn test_flat_wordlist() {
        let d = Dictionary::from_sources("custom", "Kubernetes\nrustacean\n", None).unwrap();
        assert!(d.check("Kubernetes"));
        assert!(d.check("KUBERNETES"));
        assert!(!d.check("kubernetes"));
        assert!(d.check("Rustacean"));
        assert_eq!(d.stem_count(), 2);
    }

    #[test]
    fn test_similar_words() {
        let d = dict();
        let similar = d.similar_words("wrked", 1);
        assert!(similar.contains(&"worked".to_string()));
        assert!(!d.similar_words("citiez", 1).is_empty());
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempdir().unwrap();
        let dic = dir.path().join("en.dic");
        let aff = dir.path().join("en.aff");
        fs::write(&dic, DIC).unwrap();
        fs::write(&aff, AFF).unwrap();

        let d = Dictionary::load("en", &dic, Some(&aff)).unwrap();
        assert_eq!(d.name(), "en");
        assert!(d.check("cities"));
    }

    #[test]
    fn test_latin1_dictionary() {
        let dir = tempdir().unwrap();
        let dic = dir.path().join("de.dic");
        let aff = dir.path().join("de.aff");
        fs::write(&aff, b"SET ISO8859-1\n").unwrap();
        fs::write(&dic, b"1\nStra\xdfe\n").unwrap();

        let d = Dictionary::load("de", &dic, Some(&aff)).unwrap();
        assert!(d.check("Straße"));
    }

    #[test]
    fn test_missing_file() {
        let err = Dictionary::load("nope", Path::new("/nonexistent/nope.dic"), None).unwrap_err();
        assert!(matches!(err, DictionaryLoadError::Io { .. }));
    }

    #[test]
    fn test_escaped_slash() {
        assert_eq!(split_entry("km\\/h"), ("km/h".to_string(), String::new()));
        assert_eq!(split_entry("work/ADS"), ("work".to_string(), "ADS".to_string()));
    }

    #[test]
    fn test_casing_detection() {
        assert_eq!(Casing::of("hello"), Casing::Lower);
        assert_eq!(Casing::of("Hello"), Casing::Title);
        assert_eq!(Casing::of("HELLO"), Casing::Upper);
        assert_eq!(Casing::of("iPhone"), Casing::Mixed);
        assert_eq!(capitalize("hELLO"), "Hello");
    }
}
