// src/signals/guardrails.rs
//! Absolute disqualifiers: venue type (chain, hotel), language, promotional tone, negativity.

use super::{contains_any, count_hits};
use crate::normalize::{char_len, normalize};
use crate::policy::ModerationPolicy;
use crate::signals::specificity::has_concrete_food;

const PREFIX_SEPARATORS: [char; 4] = [' ', '-', '\'', '\u{2019}'];

/// Exact brand or brand prefix followed by a separator ("mcdonald's kamppi" yes, "newmcdonald" no).
pub fn is_chain_or_franchise(policy: &ModerationPolicy, restaurant_name: &str) -> bool {
    let name = normalize(restaurant_name);
    if name.is_empty() {
        return false;
    }
    policy.vocab.chain_prefixes.iter().any(|prefix| {
        name.strip_prefix(prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(PREFIX_SEPARATORS))
    })
}

pub fn is_hotel(policy: &ModerationPolicy, restaurant_name: &str) -> bool {
    let name = normalize(restaurant_name);
    contains_any(&name, &policy.vocab.hotel_tokens)
}

/// Foreign-language markers must clearly outweigh English ones, or the text carries
/// several foreign diacritics and no English marker at all.
pub fn is_non_english(policy: &ModerationPolicy, comment: &str) -> bool {
    let t = normalize(comment);
    if t.is_empty() {
        return false;
    }
    let th = &policy.thresholds;

    let foreign_hits = policy.foreign_words.iter().filter(|w| w.re.is_match(&t)).count();
    let english_hits = policy.english_words.iter().filter(|w| w.re.is_match(&t)).count();

    if foreign_hits >= th.foreign_min_hits && foreign_hits >= english_hits + th.foreign_margin {
        return true;
    }

    let diacritics = t
        .chars()
        .filter(|c| policy.vocab.foreign_diacritics.contains(c))
        .count();
    diacritics >= th.diacritic_min && english_hits == 0
}

/// Long, impersonal, buzzword-heavy copy with no concrete food detail.
/// All four conditions are required.
pub fn is_marketing_or_ai_copy(policy: &ModerationPolicy, comment: &str) -> bool {
    let t = normalize(comment);
    if t.is_empty() {
        return false;
    }
    let th = &policy.thresholds;

    let padded = format!(" {t} ");
    let first_person = contains_any(&padded, &policy.vocab.first_person);
    let marketing_hits = count_hits(&t, &policy.vocab.marketing_phrases);

    char_len(&t) >= th.marketing_min_chars
        && !first_person
        && marketing_hits >= th.marketing_min_hits
        && !has_concrete_food(policy, &t)
}

/// Explicit avoidance always counts; other strong negatives only when nothing positive is said.
pub fn is_negative_recommendation(policy: &ModerationPolicy, comment: &str) -> bool {
    let t = normalize(comment);
    let v = &policy.vocab;

    if contains_any(&t, &v.avoidance_phrases) {
        return true;
    }
    contains_any(&t, &v.strong_negative) && !contains_any(&t, &v.positive_markers)
}
