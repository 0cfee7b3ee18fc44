//! Hunspell `.aff` parsing: flag encodings, prefix/suffix rules and the
//! suggestion tables (`TRY`, `KEY`, `REP`).

use crate::error::DictionaryLoadError;
use encoding_rs::{Encoding, UTF_8};
use std::collections::HashMap;

pub type Flag = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagMode {
    #[default]
    Char,
    Long,
    Num,
    Utf8,
}

impl FlagMode {
    fn from_directive(value: &str) -> Option<Self> {
        match value {
            "long" => Some(FlagMode::Long),
            "num" => Some(FlagMode::Num),
            "UTF-8" | "utf-8" => Some(FlagMode::Utf8),
            "char" => Some(FlagMode::Char),
            _ => None,
        }
    }

    /// Decode a raw flag field into a sorted, deduplicated flag list
    pub fn parse_flags(&self, raw: &str) -> Result<Vec<Flag>, String> {
        let mut flags: Vec<Flag> = match self {
            FlagMode::Char | FlagMode::Utf8 => raw.chars().map(|c| c as Flag).collect(),
            FlagMode::Long => {
                let chars: Vec<char> = raw.chars().collect();
                if chars.len() % 2 != 0 {
                    return Err(format!("odd number of characters in long flag '{}'", raw));
                }
                chars
                    .chunks(2)
                    .map(|pair| ((pair[0] as Flag) << 16) | (pair[1] as Flag & 0xFFFF))
                    .collect()
            }
            FlagMode::Num => raw
                .split(',')
                .filter(|n| !n.is_empty())
                .map(|n| {
                    n.trim()
                        .parse::<Flag>()
                        .map_err(|_| format!("invalid numeric flag '{}'", n))
                })
                .collect::<Result<_, _>>()?,
        };
        flags.sort_unstable();
        flags.dedup();
        Ok(flags)
    }
}

/// Sorted flag list attached to a stem or an affix continuation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet(Vec<Flag>);

impl FlagSet {
    pub fn new(mut flags: Vec<Flag>) -> Self {
        flags.sort_unstable();
        flags.dedup();
        Self(flags)
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.0.binary_search(&flag).is_ok()
    }

    pub fn has(&self, flag: Option<Flag>) -> bool {
        flag.is_some_and(|f| self.contains(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.iter().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CondUnit {
    Any,
    Char(char),
    Set { negated: bool, chars: Vec<char> },
}

impl CondUnit {
    fn matches(&self, c: char) -> bool {
        match self {
            CondUnit::Any => true,
            CondUnit::Char(expected) => *expected == c,
            CondUnit::Set { negated, chars } => chars.contains(&c) != *negated,
        }
    }
}

/// Character-class condition an affix imposes on the stem edge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition(Vec<CondUnit>);

impl Condition {
    pub fn parse(pattern: &str) -> Result<Self, String> {
        if pattern == "." {
            return Ok(Self::default());
        }

        let mut units = Vec::new();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            match c {
                '.' => units.push(CondUnit::Any),
                '[' => {
                    let mut set = Vec::new();
                    let mut negated = false;
                    let mut closed = false;
                    for (i, inner) in chars.by_ref().enumerate() {
                        match inner {
                            '^' if i == 0 => negated = true,
                            ']' => {
                                closed = true;
                                break;
                            }
                            other => set.push(other),
                        }
                    }
                    if !closed {
                        return Err(format!("unterminated '[' in condition '{}'", pattern));
                    }
                    units.push(CondUnit::Set {
                        negated,
                        chars: set,
                    });
                }
                ']' => return Err(format!("unexpected ']' in condition '{}'", pattern)),
                other => units.push(CondUnit::Char(other)),
            }
        }
        Ok(Self(units))
    }

    pub fn matches_end(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        if chars.len() < self.0.len() {
            return false;
        }
        let tail = &chars[chars.len() - self.0.len()..];
        self.0.iter().zip(tail).all(|(unit, &c)| unit.matches(c))
    }

    pub fn matches_start(&self, word: &str) -> bool {
        let mut chars = word.chars();
        self.0
            .iter()
            .all(|unit| chars.next().is_some_and(|c| unit.matches(c)))
    }
}

#[derive(Debug, Clone)]
pub struct AffixEntry {
    pub flag: Flag,
    pub cross_product: bool,
    pub strip: String,
    pub append: String,
    pub condition: Condition,
    pub continuation: FlagSet,
}

impl AffixEntry {
    /// Recover the stem a suffixed word was derived from
    pub fn strip_suffix_from(&self, word: &str) -> Option<String> {
        let rest = word.strip_suffix(self.append.as_str())?;
        if rest.is_empty() && self.strip.is_empty() {
            return None;
        }
        let stem = format!("{}{}", rest, self.strip);
        self.condition.matches_end(&stem).then_some(stem)
    }

    /// Recover the stem a prefixed word was derived from
    pub fn strip_prefix_from(&self, word: &str) -> Option<String> {
        let rest = word.strip_prefix(self.append.as_str())?;
        if rest.is_empty() && self.strip.is_empty() {
            return None;
        }
        let stem = format!("{}{}", self.strip, rest);
        self.condition.matches_start(&stem).then_some(stem)
    }

    pub fn apply_suffix(&self, stem: &str) -> Option<String> {
        if !self.condition.matches_end(stem) {
            return None;
        }
        let rest = stem.strip_suffix(self.strip.as_str())?;
        let form = format!("{}{}", rest, self.append);
        (!form.is_empty()).then_some(form)
    }

    pub fn apply_prefix(&self, stem: &str) -> Option<String> {
        if !self.condition.matches_start(stem) {
            return None;
        }
        let rest = stem.strip_prefix(self.strip.as_str())?;
        let form = format!("{}{}", self.append, rest);
        (!form.is_empty()).then_some(form)
    }
}

#[derive(Debug, Default)]
pub struct AffixRules {
    pub flag_mode: FlagMode,
    pub try_chars: Vec<char>,
    pub keyboard: Vec<String>,
    pub replacements: Vec<(String, String)>,
    pub no_suggest: Option<Flag>,
    pub forbidden: Option<Flag>,
    pub keep_case: Option<Flag>,
    pub need_affix: Option<Flag>,
    aliases: Vec<Vec<Flag>>,
    prefixes: Vec<AffixEntry>,
    suffixes: Vec<AffixEntry>,
    prefix_index: HashMap<char, Vec<usize>>,
    prefix_empty: Vec<usize>,
    suffix_index: HashMap<char, Vec<usize>>,
    suffix_empty: Vec<usize>,
    prefixes_by_flag: HashMap<Flag, Vec<usize>>,
    suffixes_by_flag: HashMap<Flag, Vec<usize>>,
}

/// Resolve the `SET` directive of raw affix bytes, defaulting to UTF-8
pub fn detect_encoding(bytes: &[u8]) -> Result<&'static Encoding, DictionaryLoadError> {
    for line in bytes.split(|&b| b == b'\n') {
        let line = line.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(line);
        if let Some(label) = line.strip_prefix(b"SET") {
            let label = String::from_utf8_lossy(label).trim().to_string();
            return Encoding::for_label(label.as_bytes())
                .ok_or(DictionaryLoadError::UnknownEncoding(label));
        }
    }
    Ok(UTF_8)
}

impl AffixRules {
    pub fn parse(text: &str) -> Result<Self, DictionaryLoadError> {
        let mut rules = Self::default();

        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .collect();

        let mut cursor = 0;
        while cursor < lines.len() {
            let (line_no, line) = lines[cursor];
            cursor += 1;
            let fields: Vec<&str> = line.split_whitespace().collect();

            match fields[0] {
                "FLAG" => {
                    let value = fields.get(1).copied().unwrap_or_default();
                    rules.flag_mode = FlagMode::from_directive(value).ok_or_else(|| {
                        DictionaryLoadError::affix(line_no, format!("unknown FLAG type '{}'", value))
                    })?;
                }
                "TRY" => {
                    rules.try_chars = fields.get(1).map(|s| s.chars().collect()).unwrap_or_default();
                }
                "KEY" => {
                    rules.keyboard = fields
                        .get(1)
                        .map(|s| s.split('|').map(str::to_string).collect())
                        .unwrap_or_default();
                }
                "NOSUGGEST" => rules.no_suggest = rules.single_flag(&fields, line_no)?,
                "FORBIDDENWORD" => rules.forbidden = rules.single_flag(&fields, line_no)?,
                "KEEPCASE" => rules.keep_case = rules.single_flag(&fields, line_no)?,
                "NEEDAFFIX" | "PSEUDOROOT" => rules.need_affix = rules.single_flag(&fields, line_no)?,
                "REP" => {
                    let count = parse_count(&fields, 1, line_no)?;
                    for _ in 0..count {
                        let (entry_no, entry) = take_entry(&lines, &mut cursor, "REP", line_no)?;
                        let parts: Vec<&str> = entry.split_whitespace().collect();
                        if parts.len() < 3 {
                            return Err(DictionaryLoadError::affix(entry_no, "REP entry needs two fields"));
                        }
                        rules
                            .replacements
                            .push((parts[1].replace('_', " "), parts[2].replace('_', " ")));
                    }
                }
                "AF" => {
                    let count = parse_count(&fields, 1, line_no)?;
                    for _ in 0..count {
                        let (entry_no, entry) = take_entry(&lines, &mut cursor, "AF", line_no)?;
                        let raw = entry.split_whitespace().nth(1).unwrap_or_default();
                        let flags = rules
                            .flag_mode
                            .parse_flags(raw)
                            .map_err(|e| DictionaryLoadError::affix(entry_no, e))?;
                        rules.aliases.push(flags);
                    }
                }
                kind @ ("PFX" | "SFX") => {
                    rules.parse_affix_block(kind, &fields, line_no, &lines, &mut cursor)?;
                }
                _ => {}
            }
        }

        rules.build_indices();
        Ok(rules)
    }

    fn parse_affix_block(
        &mut self,
        kind: &str,
        header: &[&str],
        line_no: usize,
        lines: &[(usize, &str)],
        cursor: &mut usize,
    ) -> Result<(), DictionaryLoadError> {
        if header.len() < 4 {
            return Err(DictionaryLoadError::affix(
                line_no,
                format!("{} header needs flag, cross product and count", kind),
            ));
        }
        let flag = self.single_flag(header, line_no)?.ok_or_else(|| {
            DictionaryLoadError::affix(line_no, format!("{} header has an empty flag", kind))
        })?;
        let cross_product = header[2] == "Y";
        let count = parse_count(header, 3, line_no)?;

        for _ in 0..count {
            let (entry_no, entry) = take_entry(lines, cursor, kind, line_no)?;
            let fields: Vec<&str> = entry.split_whitespace().collect();
            if fields.len() < 4 {
                return Err(DictionaryLoadError::affix(
                    entry_no,
                    format!("{} entry needs flag, strip and append", kind),
                ));
            }
            let entry_flag = self.single_flag(&fields, entry_no)?;
            if entry_flag != Some(flag) {
                return Err(DictionaryLoadError::affix(
                    entry_no,
                    format!("{} entry flag '{}' does not match its header", kind, fields[1]),
                ));
            }

            let strip = if fields[2] == "0" { "" } else { fields[2] };
            let (append, continuation) = match fields[3].split_once('/') {
                Some((append, flags)) => (
                    append,
                    self.resolve_flags(flags)
                        .map_err(|e| DictionaryLoadError::affix(entry_no, e))?,
                ),
                None => (fields[3], Vec::new()),
            };
            let append = if append == "0" { "" } else { append };
            let condition = Condition::parse(fields.get(4).copied().unwrap_or("."))
                .map_err(|e| DictionaryLoadError::affix(entry_no, e))?;

            let affix = AffixEntry {
                flag,
                cross_product,
                strip: strip.to_string(),
                append: append.to_string(),
                condition,
                continuation: FlagSet::new(continuation),
            };
            if kind == "PFX" {
                self.prefixes.push(affix);
            } else {
                self.suffixes.push(affix);
            }
        }
        Ok(())
    }

    fn single_flag(&self, fields: &[&str], line_no: usize) -> Result<Option<Flag>, DictionaryLoadError> {
        let raw = fields.get(1).copied().unwrap_or_default();
        let flags = self
            .flag_mode
            .parse_flags(raw)
            .map_err(|e| DictionaryLoadError::affix(line_no, e))?;
        Ok(flags.first().copied())
    }

    /// Decode a flag field, expanding `AF` aliases when the file declares them
    pub fn resolve_flags(&self, raw: &str) -> Result<Vec<Flag>, String> {
        if !self.aliases.is_empty() && !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
            let index: usize = raw.parse().map_err(|_| format!("invalid alias '{}'", raw))?;
            return index
                .checked_sub(1)
                .and_then(|i| self.aliases.get(i))
                .cloned()
                .ok_or_else(|| format!("unknown flag alias {}", index));
        }
        self.flag_mode.parse_flags(raw)
    }

    pub fn has_aliases(&self) -> bool {
        !self.aliases.is_empty()
    }

    fn build_indices(&mut self) {
        for (i, entry) in self.prefixes.iter().enumerate() {
            match entry.append.chars().next() {
                Some(c) => self.prefix_index.entry(c).or_default().push(i),
                None => self.prefix_empty.push(i),
            }
            self.prefixes_by_flag.entry(entry.flag).or_default().push(i);
        }
        for (i, entry) in self.suffixes.iter().enumerate() {
            match entry.append.chars().last() {
                Some(c) => self.suffix_index.entry(c).or_default().push(i),
                None => self.suffix_empty.push(i),
            }
            self.suffixes_by_flag.entry(entry.flag).or_default().push(i);
        }
    }

    /// Suffix rules whose append string could end `word`
    pub fn suffixes_for<'a>(&'a self, word: &str) -> impl Iterator<Item = &'a AffixEntry> + 'a {
        word.chars()
            .last()
            .and_then(|c| self.suffix_index.get(&c))
            .into_iter()
            .flatten()
            .chain(self.suffix_empty.iter())
            .map(move |&i| &self.suffixes[i])
    }

    /// Prefix rules whose append string could start `word`
    pub fn prefixes_for<'a>(&'a self, word: &str) -> impl Iterator<Item = &'a AffixEntry> + 'a {
        word.chars()
            .next()
            .and_then(|c| self.prefix_index.get(&c))
            .into_iter()
            .flatten()
            .chain(self.prefix_empty.iter())
            .map(move |&i| &self.prefixes[i])
    }

    pub fn suffixes_with_flag(&self, flag: Flag) -> impl Iterator<Item = &AffixEntry> + '_ {
        self.suffixes_by_flag
            .get(&flag)
            .into_iter()
            .flatten()
            .map(move |&i| &self.suffixes[i])
    }

    pub fn prefixes_with_flag(&self, flag: Flag) -> impl Iterator<Item = &AffixEntry> + '_ {
        self.prefixes_by_flag
            .get(&flag)
            .into_iter()
            .flatten()
            .map(move |&i| &self.prefixes[i])
    }

    pub fn prefix_count(&self) -> usize {
        self.prefixes.len()
    }

    pub fn suffix_count(&self) -> usize {
        self.suffixes.len()
    }
}

fn parse_count(fields: &[&str], position: usize, line_no: usize) -> Result<usize, DictionaryLoadError> {
    fields
        .get(position)
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| DictionaryLoadError::affix(line_no, format!("expected entry count in '{}'", fields.join(" "))))
}

fn take_entry<'a>(
    lines: &[(usize, &'a str)],
    cursor: &mut usize,
    kind: &str,
    header_line: usize,
) -> Result<(usize, &'a str), DictionaryLoadError> {
    let (line_no, line) = *lines.get(*cursor).ok_or_else(|| {
        DictionaryLoadError::affix(header_line, format!("missing {} entries after header", kind))
    })?;
    if line.split_whitespace().next() != Some(kind) {
        return Err(DictionaryLoadError::affix(
            line_no,
            format!("expected {} entry, found '{}'", kind, line),
        ));
    }
    *cursor += 1;
    Ok((line_no, line))
}

#[cfg(test)]
mod tests {
    use super::*;

    const AFF: &str = "SET UTF-8\nTRY esianrtolcdugmphbyfvkwzESIANRTOLCDUGMPHBYFVKWZ'\n\
        NOSUGGEST !\n\
        REP 2\nREP f ph\nREP alot a_lot\n\
        PFX A Y 1\nPFX A 0 re .\n\
        SFX D Y 4\nSFX D 0 d e\nSFX D y ied [^aeiou]y\nSFX D 0 ed [^ey]\nSFX D 0 ed [aeiou]y\n";

    #[test]
    fn test_parse_rules() {
        let rules = AffixRules::parse(AFF).unwrap();
        assert_eq!(rules.prefix_count(), 1);
        assert_eq!(rules.suffix_count(), 4);
        assert_eq!(rules.no_suggest, Some('!' as Flag));
        assert_eq!(rules.replacements[1], ("alot".to_string(), "a lot".to_string()));
        assert!(rules.try_chars.starts_with(&['e', 's']));
    }

    #[test]
    fn test_condition_matching() {
        let cond = Condition::parse("[^aeiou]y").unwrap();
        assert!(cond.matches_end("cry"));
        assert!(!cond.matches_end("play"));
        assert!(!cond.matches_end("y"));
        assert!(Condition::parse(".").unwrap().matches_end(""));
        assert!(Condition::parse("[ab").is_err());
    }

    #[test]
    fn test_suffix_strip_and_apply() {
        let rules = AffixRules::parse(AFF).unwrap();
        let stems: Vec<String> = rules
            .suffixes_for("cried")
            .filter_map(|e| e.strip_suffix_from("cried"))
            .collect();
        assert!(stems.contains(&"cry".to_string()));

        let forms: Vec<String> = rules
            .suffixes_with_flag('D' as Flag)
            .filter_map(|e| e.apply_suffix("play"))
            .collect();
        assert_eq!(forms, vec!["played".to_string()]);
    }

    #[test]
    fn test_long_and_numeric_flags() {
        assert_eq!(FlagMode::Long.parse_flags("AaBb").unwrap().len(), 2);
        assert!(FlagMode::Long.parse_flags("Aab").is_err());
        assert_eq!(FlagMode::Num.parse_flags("101,7").unwrap(), vec![7, 101]);
    }

    #[test]
    fn test_aliases() {
        let rules = AffixRules::parse("AF 2\nAF AB\nAF C\n").unwrap();
        assert_eq!(rules.resolve_flags("2").unwrap(), vec!['C' as Flag]);
        assert!(rules.resolve_flags("3").is_err());
    }

    #[test]
    fn test_truncated_block_fails() {
        let err = AffixRules::parse("SFX D Y 3\nSFX D 0 d e\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_detect_encoding() {
        let enc = detect_encoding(b"SET ISO8859-1\nTRY abc\n").unwrap();
        assert_eq!(enc.name(), "windows-1252");
        assert!(detect_encoding(b"SET KLINGON\n").is_err());
        assert_eq!(detect_encoding(b"TRY abc\n").unwrap(), UTF_8);
    }
}
