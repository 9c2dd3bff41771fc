//! Hierarchical question identifier tokenization.
//!
//! Identifiers such as `"2bii"`, `"2.b.ii"`, `"02(b)(ii)"` all describe the same
//! position in a paper. [`tokenize`] reduces each of them to the same ordered
//! token list (`["2", "b", "ii"]`) so that exact, prefix and root comparisons
//! can be made between question and mark-scheme labels.

/// Roman numeral suffixes, longest first. `x` and `v` are deliberately absent so
/// that ordinary sub-part letters are not split.
const ROMAN_SUFFIXES: [&str; 16] = [
    "xviii", "xvii", "xvi", "xv", "xiv", "xiii", "xii", "xi", "viii", "vii", "vi", "iv", "ix",
    "iii", "ii", "i",
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Digit,
    Alpha,
}

/// Characters that separate identifier levels
fn is_delimiter(c: char) -> bool {
    matches!(c, '.' | '(' | ')' | '_' | '-') || c.is_whitespace()
}

/// Convert a raw identifier into ordered semantic tokens.
///
/// Never fails: characters that are neither alphanumeric nor delimiters are
/// dropped and whatever remains is tokenized.
///
/// ```
/// use markscheme_matcher::core::identifier::tokenize;
///
/// assert_eq!(tokenize("01a"), vec!["1", "a"]);
/// assert_eq!(tokenize("1.2.3"), vec!["1", "2", "3"]);
/// assert_eq!(tokenize("1aiii"), vec!["1", "a", "iii"]);
/// assert!(tokenize("").is_empty());
/// ```
#[must_use]
pub fn tokenize(raw: &str) -> Vec<String> {
    split_raw_tokens(raw)
        .into_iter()
        .flat_map(normalize_token)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Split at delimiter runs and at every digit/letter transition
fn split_raw_tokens(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut buf = String::new();
    let mut current: Option<CharClass> = None;

    for c in raw.chars().flat_map(char::to_lowercase) {
        if is_delimiter(c) {
            if !buf.is_empty() {
                tokens.push(std::mem::take(&mut buf));
            }
            current = None;
            continue;
        }

        let class = if c.is_ascii_digit() {
            CharClass::Digit
        } else if c.is_ascii_lowercase() {
            CharClass::Alpha
        } else {
            // Stray punctuation is removed without acting as a boundary
            continue;
        };

        if current.is_some_and(|cur| cur != class) && !buf.is_empty() {
            tokens.push(std::mem::take(&mut buf));
        }
        buf.push(c);
        current = Some(class);
    }

    if !buf.is_empty() {
        tokens.push(buf);
    }
    tokens
}

/// Strip leading zeros from numbers and split a trailing roman numeral off letters
fn normalize_token(token: String) -> Vec<String> {
    if token.chars().all(|c| c.is_ascii_digit()) {
        let trimmed = token.trim_start_matches('0');
        let number = if trimmed.is_empty() { "0" } else { trimmed };
        return vec![number.to_string()];
    }

    match ROMAN_SUFFIXES.iter().find(|r| token.ends_with(*r)) {
        Some(roman) => {
            let prefix = &token[..token.len() - roman.len()];
            let mut parts = Vec::with_capacity(2);
            if !prefix.is_empty() {
                parts.push(prefix.to_string());
            }
            parts.push((*roman).to_string());
            parts
        }
        None => vec![token],
    }
}

/// True for tokens made only of ASCII digits
#[must_use]
pub fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}
