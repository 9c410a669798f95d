use caseless::default_case_fold_str;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Anything that is neither whitespace nor a word character.
    static ref PUNCTUATION: Regex = Regex::new(r"[^\s\w]").unwrap();
    static ref DIGITS: Regex = Regex::new(r"\d").unwrap();
}

/// Strip punctuation and digits, case-fold, and split on whitespace.
///
/// Token order and repeats are preserved. Never fails; an empty or
/// all-noise input yields an empty vector.
pub fn normalize(text: &str) -> Vec<String> {
    let without_punctuation = PUNCTUATION.replace_all(text, "");
    let cleaned = DIGITS.replace_all(&without_punctuation, "");

    default_case_fold_str(&cleaned)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
