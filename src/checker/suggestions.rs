use crate::checker::dictionary::{capitalize, Casing, Dictionary};
use std::collections::HashSet;
use std::rc::Rc;

const DEFAULT_TRY: &str = "etaoinshrdlcumwfgypbvkjxqz";

/// Words longer than this are reported without suggestions
pub const MAX_WORD_LENGTH: usize = 100;

/// Candidate tiers, best first
const TIER_REPLACEMENT: u8 = 0;
const TIER_EDIT: u8 = 1;
const TIER_FUZZY: u8 = 2;

struct Candidates<'a> {
    dictionaries: &'a [Dictionary],
    word: &'a str,
    lower: String,
    seen: HashSet<String>,
    ranked: Vec<(u8, usize, String)>,
}

impl<'a> Candidates<'a> {
    fn new(word: &'a str, dictionaries: &'a [Dictionary]) -> Self {
        Self {
            dictionaries,
            word,
            lower: word.to_lowercase(),
            seen: HashSet::new(),
            ranked: Vec::new(),
        }
    }

    fn accepts(&self, candidate: &str) -> bool {
        candidate
            .split(' ')
            .all(|part| self.dictionaries.iter().any(|d| d.check(part)))
            && !self.dictionaries.iter().any(|d| d.is_no_suggest(candidate))
    }

    fn offer(&mut self, candidate: String, tier: u8) {
        if candidate.is_empty() || candidate == self.word {
            return;
        }
        if self.seen.contains(&candidate) || !self.accepts(&candidate) {
            return;
        }
        let distance = edit_distance(&self.lower, &candidate.to_lowercase());
        self.seen.insert(candidate.clone());
        self.ranked.push((tier, distance, candidate));
    }

    fn into_ranked(mut self) -> Vec<String> {
        self.ranked.sort_by_key(|(tier, distance, _)| (*tier, *distance));
        self.ranked.into_iter().map(|(_, _, word)| word).collect()
    }
}

/// Generate spelling suggestions across all loaded dictionaries
pub fn generate(word: &str, dictionaries: &[Dictionary], max_suggestions: usize) -> Vec<String> {
    if max_suggestions == 0 || dictionaries.is_empty() || word.is_empty() {
        return Vec::new();
    }
    if word.chars().count() > MAX_WORD_LENGTH {
        log::debug!("no suggestions for a {}-character word", word.chars().count());
        return Vec::new();
    }

    let lower = word.to_lowercase();
    let mut candidates = Candidates::new(word, dictionaries);

    // 1. Known misspelling patterns from the affix files
    for (from, to) in dictionaries.iter().flat_map(|d| d.rules().replacements.iter()) {
        for (index, _) in lower.match_indices(from.as_str()) {
            let candidate = format!("{}{}{}", &lower[..index], to, &lower[index + from.len()..]);
            candidates.offer(candidate, TIER_REPLACEMENT);
        }
    }

    // 2. Proper nouns typed in lowercase
    candidates.offer(capitalize(&lower), TIER_REPLACEMENT);

    // 3. Single edits
    let alphabet = try_alphabet(dictionaries);
    let keyboard: Vec<&str> = dictionaries
        .iter()
        .flat_map(|d| d.rules().keyboard.iter().map(String::as_str))
        .collect();
    for transform in generate_transformations(&lower, &alphabet, &keyboard) {
        candidates.offer(transform, TIER_EDIT);
    }
    for (left, right) in split_points(&lower) {
        candidates.offer(format!("{} {}", left, right), TIER_EDIT);
    }

    // 4. Fuzzy search over the indexed forms
    if candidates.ranked.len() < max_suggestions {
        let distance = if lower.chars().count() <= 4 { 1 } else { 2 };
        for dictionary in dictionaries {
            for form in dictionary.similar_words(&lower, distance) {
                let capitalized = capitalize(&form);
                candidates.offer(form, TIER_FUZZY);
                candidates.offer(capitalized, TIER_FUZZY);
            }
        }
    }

    let casing = Casing::of(word);
    let mut suggestions = Vec::new();
    for candidate in candidates.into_ranked() {
        let recased = match casing {
            Casing::Title if Casing::of(&candidate) == Casing::Lower => capitalize(&candidate),
            Casing::Upper => candidate.to_uppercase(),
            _ => candidate,
        };
        if recased != word && !suggestions.contains(&recased) {
            suggestions.push(recased);
        }
        if suggestions.len() >= max_suggestions {
            break;
        }
    }
    suggestions
}

fn try_alphabet(dictionaries: &[Dictionary]) -> Vec<char> {
    let mut alphabet: Vec<char> = Vec::new();
    for c in dictionaries.iter().flat_map(|d| d.rules().try_chars.iter().copied()) {
        let c = c.to_lowercase().next().unwrap_or(c);
        if !alphabet.contains(&c) {
            alphabet.push(c);
        }
    }
    if alphabet.is_empty() {
        alphabet = DEFAULT_TRY.chars().collect();
    }
    alphabet
}

/// Calculate Levenshtein distance between two strings
pub(crate) fn edit_distance(a: &str, b: &str) -> usize {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate().take(a_len + 1) {
        row[0] = i;
    }
    for (j, item) in matrix[0].iter_mut().enumerate().take(b_len + 1) {
        *item = j;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    for (i, a_char) in a_chars.iter().enumerate() {
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };

            matrix[i + 1][j + 1] = std::cmp::min(
                std::cmp::min(
                    matrix[i][j + 1] + 1, // deletion
                    matrix[i + 1][j] + 1, // insertion
                ),
                matrix[i][j] + cost, // substitution
            );
        }
    }

    matrix[a_len][b_len]
}

/// Every single-edit variant of a word, produced on demand
fn generate_transformations<'a>(
    word: &str,
    alphabet: &'a [char],
    keyboard: &'a [&'a str],
) -> impl Iterator<Item = String> + 'a {
    let chars: Rc<[char]> = word.chars().collect();
    let len = chars.len();

    // Deletions
    let deletions = {
        let chars = Rc::clone(&chars);
        (0..len).map(move |i| edited(&chars, |w| {
            w.remove(i);
        }))
    };

    // Transpositions (swap adjacent)
    let transpositions = {
        let chars = Rc::clone(&chars);
        (0..len.saturating_sub(1)).map(move |i| edited(&chars, |w| w.swap(i, i + 1)))
    };

    // Insertions
    let insertions = {
        let chars = Rc::clone(&chars);
        (0..=len).flat_map(move |i| {
            let chars = Rc::clone(&chars);
            alphabet.iter().map(move |&c| edited(&chars, |w| w.insert(i, c)))
        })
    };

    // Keyboard neighbours
    let neighbours = {
        let chars = Rc::clone(&chars);
        (0..len).flat_map(move |i| {
            let chars = Rc::clone(&chars);
            keyboard.iter().flat_map(move |row| {
                let row: Vec<char> = row.chars().collect();
                let near: Vec<char> = match row.iter().position(|&c| c == chars[i]) {
                    Some(pos) => [pos.checked_sub(1), Some(pos + 1)]
                        .into_iter()
                        .flatten()
                        .filter_map(|n| row.get(n).copied())
                        .collect(),
                    None => Vec::new(),
                };
                let chars = Rc::clone(&chars);
                near.into_iter().map(move |c| edited(&chars, |w| w[i] = c))
            })
        })
    };

    // Replacements
    let replacements = (0..len).flat_map(move |i| {
        let chars = Rc::clone(&chars);
        alphabet
            .iter()
            .filter_map(move |&c| (chars[i] != c).then(|| edited(&chars, |w| w[i] = c)))
    });

    deletions
        .chain(transpositions)
        .chain(insertions)
        .chain(neighbours)
        .chain(replacements)
}

fn edited(chars: &[char], edit: impl FnOnce(&mut Vec<char>)) -> String {
    let mut word = chars.to_vec();
    edit(&mut word);
    word.into_iter().collect()
}

/// Two-word splits of a run-together word
fn split_points(word: &str) -> Vec<(&str, &str)> {
    word.char_indices()
        .skip(1)
        .map(|(i, _)| word.split_at(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dicts() -> Vec<Dictionary> {
        let aff = "TRY esianrtolcdugmphbyfvkwz\nREP 1\nREP f ph\nSFX S Y 1\nSFX S 0 s .\n";
        let dic = "5\nhello/S\nworld/S\nphone/S\nParis\nhelp/S\n";
        vec![Dictionary::from_sources("en", dic, Some(aff)).unwrap()]
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("hello", "hello"), 0);
        assert_eq!(edit_distance("hello", "hallo"), 1);
        assert_eq!(edit_distance("hello", "hullo"), 1);
        assert_eq!(edit_distance("hello", "world"), 4);
    }

    #[test]
    fn test_transformations() {
        let transforms: Vec<String> = generate_transformations("hello", &['x'], &["qwerty"]).collect();
        assert!(transforms.contains(&"hllo".to_string())); // deletion
        assert!(transforms.contains(&"ehllo".to_string())); // transposition
        assert!(transforms.contains(&"hxllo".to_string())); // replacement
        assert!(transforms.contains(&"hellox".to_string())); // insertion
        assert!(transforms.contains(&"hrllo".to_string())); // keyboard neighbour
    }

    #[test]
    fn test_generate_ranks_closest_first() {
        let suggestions = generate("helo", &dicts(), 5);
        assert_eq!(suggestions.first().map(String::as_str), Some("hello"));
        assert!(suggestions.contains(&"help".to_string()));
    }

    #[test]
    fn test_replacement_table() {
        let suggestions = generate("fone", &dicts(), 5);
        assert_eq!(suggestions.first().map(String::as_str), Some("phone"));
    }

    #[test]
    fn test_casing_is_restored() {
        assert_eq!(generate("Wrold", &dicts(), 1), vec!["World".to_string()]);
        assert_eq!(generate("HELOS", &dicts(), 1), vec!["HELLOS".to_string()]);
        assert_eq!(generate("paris", &dicts(), 1), vec!["Paris".to_string()]);
    }

    #[test]
    fn test_split_words() {
        let suggestions = generate("helloworld", &dicts(), 5);
        assert!(suggestions.contains(&"hello world".to_string()));
    }

    #[test]
    fn test_bounded_and_empty() {
        assert!(generate("helo", &dicts(), 1).len() <= 1);
        assert!(generate("zzzzzzzzzzzz", &dicts(), 5).is_empty());
        assert!(generate("helo", &[], 5).is_empty());
    }

    #[test]
    fn test_long_word_gets_no_suggestions() {
        let long = "qxz".repeat(2_000);
        assert!(generate(&long, &dicts(), 5).is_empty());

        let edge = "h".repeat(MAX_WORD_LENGTH);
        assert!(generate(&edge, &dicts(), 5).len() <= 5);
    }
}
