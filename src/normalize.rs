// src/normalize.rs
//! Text normalizer shared by every detector that does substring or word matching.

/// Lowercase + collapse whitespace runs into single spaces + trim.
/// Unicode-aware on both counts (`Ä` folds to `ä`, NBSP counts as whitespace).
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.extend(ch.to_lowercase());
            last_space = false;
        }
    }
    out.trim().to_string()
}

/// Absent input normalizes to empty text.
pub fn normalize_opt(input: Option<&str>) -> String {
    input.map(normalize).unwrap_or_default()
}

/// Length in Unicode scalar values; every threshold in the policy is expressed in these units.
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
