// src/signals/mod.rs
//! Lexical signal library: independent, stateless detectors over a comment or a venue name.
//!
//! Each detector takes the compiled policy (for its tables and thresholds) and raw text,
//! normalizes internally where it matches on words, and never fails.

pub mod guardrails;
pub mod specificity;
pub mod spelling;
pub mod style;

pub use guardrails::{
    is_chain_or_franchise, is_hotel, is_marketing_or_ai_copy, is_negative_recommendation,
    is_non_english,
};
pub use specificity::{has_concrete_food, has_specifics};
pub use spelling::{has_obvious_typos, has_spelling_issues};
pub use style::{
    count_emojis, is_ai_hype_template, is_generic_comment, looks_messy, overly_positive_hype,
    uses_dashy_style,
};

/// Number of distinct phrases from `phrases` that occur as substrings of `text`.
pub(crate) fn count_hits(text: &str, phrases: &[String]) -> usize {
    phrases.iter().filter(|p| text.contains(p.as_str())).count()
}

pub(crate) fn contains_any(text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|p| text.contains(p.as_str()))
}
