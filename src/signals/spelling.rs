// src/signals/spelling.rs
//! Spelling quality: cheap typo heuristics always, plus an optional dictionary soft check.

use crate::dictionary::Dictionary;
use crate::policy::ModerationPolicy;
use metrics::counter;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}']+").expect("word regex"));

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

fn words(text: &str) -> impl Iterator<Item = &str> + '_ {
    WORD.find_iter(text).map(|m| m.as_str())
}

fn has_tripled_letter(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    chars
        .windows(3)
        .any(|w| w[0].is_alphabetic() && w[0] == w[1] && w[1] == w[2])
}

fn is_long_vowelless(word: &str, min_len: usize) -> bool {
    word.is_ascii() && word.chars().count() >= min_len && !word.contains(VOWELS)
}

/// Obvious mistakes without any dictionary: a known food typo, the same letter three
/// times in a row ("excelllent"), or a long ASCII word with no vowel at all.
pub fn has_obvious_typos(policy: &ModerationPolicy, text: &str) -> bool {
    let min_len = policy.thresholds.vowelless_min_len;
    words(text).any(|w| {
        let wl = w.to_lowercase();
        policy.vocab.food_typos.contains(&wl)
            || has_tripled_letter(&wl)
            || is_long_vowelless(&wl, min_len)
    })
}

/// Heuristics first; then, when a dictionary is available, a soft check over the
/// plain lowercase English words. Dictionary failures degrade to heuristic-only.
pub fn has_spelling_issues(
    policy: &ModerationPolicy,
    text: &str,
    dictionary: Option<&dyn Dictionary>,
) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    if has_obvious_typos(policy, text) {
        return true;
    }
    let Some(dict) = dictionary else {
        return false;
    };

    let th = &policy.thresholds;
    let v = &policy.vocab;
    let mut cleaned: Vec<String> = Vec::new();
    for w in words(text) {
        if w.chars().count() < th.spelling_min_token_len {
            continue;
        }
        let wl = w.to_lowercase();
        if v.accepted_spellings.contains(&wl) {
            continue;
        }
        if v.food_typos.contains(&wl) {
            return true;
        }
        if !w.is_ascii() {
            continue;
        }
        // Capitalized words are most likely names.
        if w.chars().next().is_some_and(char::is_uppercase) {
            continue;
        }
        cleaned.push(wl);
    }

    if cleaned.len() < th.spelling_min_tokens {
        return false;
    }

    match dict.unknown(&cleaned) {
        Ok(unknown) => unknown.len() >= th.spelling_min_unknown,
        Err(e) => {
            counter!("moderation_dictionary_errors_total").increment(1);
            warn!(target: "moderation", dictionary = dict.name(), error = %e, "dictionary lookup failed; heuristic-only");
            false
        }
    }
}
