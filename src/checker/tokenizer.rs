use unicode_segmentation::UnicodeSegmentation;

/// A word and its byte offset in the text it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub index: usize,
}

impl Token<'_> {
    pub fn end(&self) -> usize {
        self.index + self.text.len()
    }
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Split text on Unicode word boundaries, dropping punctuation and the
/// quote marks that hug a word ("'tis", "dogs'").
pub fn words(text: &str) -> Vec<Token<'_>> {
    text.unicode_word_indices()
        .filter_map(|(index, word)| {
            let trimmed_start = word.trim_start_matches(is_apostrophe);
            let lead = word.len() - trimmed_start.len();
            let trimmed = trimmed_start.trim_end_matches(is_apostrophe);
            (!trimmed.is_empty()).then_some(Token {
                text: trimmed,
                index: index + lead,
            })
        })
        .collect()
}

/// Typographic apostrophes are checked as ASCII ones
pub fn normalize(word: &str) -> String {
    word.replace('\u{2019}', "'")
}
