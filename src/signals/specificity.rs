// src/signals/specificity.rs
//! Specificity: concrete, checkable detail that separates a useful recommendation from praise.

use super::contains_any;
use crate::normalize::normalize;
use crate::policy::ModerationPolicy;

/// A dish or drink named as a whole word ("wine" yes, "swine" no).
pub fn has_concrete_food(policy: &ModerationPolicy, comment: &str) -> bool {
    let t = normalize(comment);
    policy.food_words.iter().any(|w| w.re.is_match(&t))
}

/// Broader vocabulary (dishes, service, ambience, ordering), substring match.
/// This is the tie-breaker the cascade reuses across branches.
pub fn has_specifics(policy: &ModerationPolicy, comment: &str) -> bool {
    let t = normalize(comment);
    contains_any(&t, &policy.vocab.specificity_terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concrete_food_is_whole_word() {
        let p = ModerationPolicy::default();
        assert!(has_concrete_food(&p, "The RAMEN broth was rich"));
        assert!(has_concrete_food(&p, "coffee, then cheese"));
        assert!(!has_concrete_food(&p, "swine and cheesecake-ish vibes"));
    }

    #[test]
    fn specifics_cover_service_and_ambience() {
        let p = ModerationPolicy::default();
        assert!(has_specifics(&p, "Lovely atmosphere"));
        assert!(has_specifics(&p, "Book ahead on weekends"));
        assert!(has_specifics(&p, "the ramen was great"));
        assert!(!has_specifics(&p, "it was great"));
    }
}
