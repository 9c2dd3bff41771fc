//! Fuzzy similarity between question and mark-scheme wording.
//!
//! Three signals are computed on a canonical form of each text and the
//! maximum is returned:
//!
//! - token-set ratio, insensitive to word order and repetition
//! - partial ratio, high when one text appears verbatim inside the other
//! - subset Jaccard, high when the smaller vocabulary is contained in the larger

use std::collections::{BTreeSet, HashSet};

use rapidfuzz::fuzz;

/// Canonical texts are cut to this many characters
pub const CANONICAL_MAX_CHARS: usize = 120;

/// Lowercase, keep alphanumeric runs joined by single spaces, truncate.
#[must_use]
pub fn canonical_text(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    // Only ASCII remains, so byte and char positions coincide
    let mut joined = words.join(" ");
    joined.truncate(CANONICAL_MAX_CHARS);
    joined
}

/// Similarity of two free-text strings in [0, 1].
///
/// Returns 0.0 when either side is missing or has no alphanumeric content.
///
/// ```
/// use markscheme_matcher::matching::text::text_similarity;
///
/// assert_eq!(text_similarity(Some("Explain osmosis"), Some("explain OSMOSIS.")), 1.0);
/// assert_eq!(text_similarity(None, Some("x")), 0.0);
/// ```
#[must_use]
pub fn text_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0.0;
    };
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a = canonical_text(Some(a));
    let b = canonical_text(Some(b));
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    token_set_ratio(&a, &b)
        .max(partial_ratio(&a, &b))
        .max(subset_jaccard(&a, &b))
}

/// Indel-normalized similarity of two strings in [0, 1]
fn ratio(a: &str, b: &str) -> f64 {
    fuzz::ratio(a.chars(), b.chars())
}

/// Ratio over de-duplicated, sorted token sets.
///
/// When the shared tokens cover one side completely the result is 1.0;
/// otherwise the best of comparing the shared part against each side and
/// the two sides against each other.
pub(crate) fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let shared: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !shared.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 1.0;
    }

    let shared = shared.join(" ");
    let with_shared = |rest: &[&str]| {
        let rest = rest.join(" ");
        if shared.is_empty() {
            rest
        } else {
            format!("{shared} {rest}")
        }
    };
    let combined_a = with_shared(&only_a);
    let combined_b = with_shared(&only_b);

    let mut best = ratio(&combined_a, &combined_b);
    if !shared.is_empty() {
        best = best
            .max(ratio(&shared, &combined_a))
            .max(ratio(&shared, &combined_b));
    }
    best
}

/// Best ratio of the shorter string against any alignment window of the longer one.
///
/// Windows slide across the longer string including partial overlaps at
/// both ends, so a truncated text still finds its best alignment.
pub(crate) fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    if short.is_empty() {
        return 0.0;
    }
    if long.contains(short) {
        return 1.0;
    }

    let short: Vec<char> = short.chars().collect();
    let long: Vec<char> = long.chars().collect();
    let window = short.len();

    let mut best = 0.0_f64;
    // Window end runs from 1 to long.len() + window - 1
    for end in 1..long.len() + window {
        let start = end.saturating_sub(window);
        let stop = end.min(long.len());
        let score = fuzz::ratio(short.iter().copied(), long[start..stop].iter().copied());
        if score > best {
            best = score;
            if best >= 1.0 {
                break;
            }
        }
    }
    best
}

/// |A ∩ B| / max(1, min(|A|, |B|)) over word tokens
pub(crate) fn subset_jaccard(a: &str, b: &str) -> f64 {
    let tokens_a: HashSet<&str> = a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    let shared = tokens_a.intersection(&tokens_b).count();
    let smaller = tokens_a.len().min(tokens_b.len()).max(1);
    super::count_to_f64(shared) / super::count_to_f64(smaller)
}
