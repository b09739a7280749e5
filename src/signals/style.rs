// src/signals/style.rs
//! Formatting and tone signals: emoji, dash bullets, generic praise, hype, messy punctuation.

use super::{contains_any, count_hits};
use crate::normalize::{char_len, normalize};
use crate::policy::ModerationPolicy;

/// Symbol/pictograph blocks counted as emoji. Approximate: one char = one emoji,
/// no grapheme clustering (a skin-tone modifier counts on its own).
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F300, 0x1F5FF), // misc symbols & pictographs
    (0x1F600, 0x1F64F), // emoticons
    (0x1F680, 0x1F6FF), // transport & map
    (0x1F700, 0x1F77F), // alchemical
    (0x1F780, 0x1F7FF), // geometric shapes ext.
    (0x1F800, 0x1F8FF), // supplemental arrows-c
    (0x1F900, 0x1F9FF), // supplemental symbols & pictographs
    (0x1FA00, 0x1FA6F), // chess symbols
    (0x1FA70, 0x1FAFF), // symbols & pictographs ext-a
    (0x2600, 0x26FF),   // misc symbols
    (0x2700, 0x27BF),   // dingbats
];

fn is_emoji(ch: char) -> bool {
    let cp = ch as u32;
    EMOJI_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

pub fn count_emojis(text: &str) -> usize {
    text.chars().filter(|&c| is_emoji(c)).count()
}

/// Bullet-list or dash-separated writing ("- great pasta\n- nice wine").
pub fn uses_dashy_style(policy: &ModerationPolicy, text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let th = &policy.thresholds;
    let bullet_lines = policy.bullet_line.find_iter(text).count();
    let inline = text.matches(" - ").count();
    bullet_lines >= th.dashy_bullet_lines || inline >= th.dashy_inline_separators
}

/// Short AND canned. Length alone is not enough.
pub fn is_generic_comment(policy: &ModerationPolicy, text: &str) -> bool {
    let t = normalize(text);
    char_len(&t) < policy.thresholds.min_chars && contains_any(&t, &policy.vocab.generic_phrases)
}

pub fn overly_positive_hype(policy: &ModerationPolicy, text: &str) -> bool {
    let th = &policy.thresholds;
    let t = normalize(text);
    let hype_hits = count_hits(&t, &policy.vocab.hype_words);
    let exclamations = text.matches('!').count();
    hype_hits >= th.hype_min_hits || exclamations >= th.hype_min_exclamations
}

/// Stricter sibling of `overly_positive_hype`: stacked template phrases typical of generated copy.
pub fn is_ai_hype_template(policy: &ModerationPolicy, text: &str) -> bool {
    let t = normalize(text);
    count_hits(&t, &policy.vocab.ai_template_phrases) >= policy.thresholds.ai_template_min_hits
}

/// Runs of punctuation ("!!!", "...,") or a comment stretched over many lines.
pub fn looks_messy(policy: &ModerationPolicy, text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    policy.punct_run.is_match(text)
        || text.matches('\n').count() >= policy.thresholds.messy_line_breaks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ModerationPolicy {
        ModerationPolicy::default()
    }

    #[test]
    fn emoji_counts_chars_in_ranges() {
        assert_eq!(count_emojis("great 🔥🔥🔥"), 3);
        assert_eq!(count_emojis("sunny ☀ and ✨"), 2);
        assert_eq!(count_emojis("no emoji — just a dash"), 0);
        assert_eq!(count_emojis(""), 0);
    }

    #[test]
    fn dashy_bullets_or_inline() {
        let p = policy();
        assert!(uses_dashy_style(&p, "- pasta\n- wine"));
        assert!(uses_dashy_style(&p, "  - pasta\n  -   wine\n"));
        assert!(uses_dashy_style(&p, "pasta - wine - bread - coffee"));
        assert!(!uses_dashy_style(&p, "- just one bullet here"));
        assert!(!uses_dashy_style(&p, "pasta - wine - bread"));
        assert!(!uses_dashy_style(&p, "well-known, fair-priced"));
    }

    #[test]
    fn generic_needs_short_and_canned() {
        let p = policy();
        assert!(is_generic_comment(&p, "Great place, love it"));
        assert!(!is_generic_comment(&p, "It was fine"));
        assert!(!is_generic_comment(
            &p,
            "Great place, love it, we came back three times during our stay"
        ));
    }

    #[test]
    fn hype_by_words_or_exclamations() {
        let p = policy();
        assert!(overly_positive_hype(&p, "Best and most incredible place"));
        assert!(overly_positive_hype(&p, "wow! yes! go!"));
        assert!(!overly_positive_hype(&p, "The best soup in town."));
    }

    #[test]
    fn ai_template_needs_three_phrases() {
        let p = policy();
        assert!(is_ai_hype_template(
            &p,
            "A culinary gem where every plate is a work of art in perfect harmony."
        ));
        assert!(!is_ai_hype_template(&p, "A culinary gem, highly recommended."));
    }

    #[test]
    fn messy_punctuation_or_many_lines() {
        let p = policy();
        assert!(looks_messy(&p, "so good!!! the pasta..."));
        assert!(looks_messy(&p, "a\nb\nc\nd\ne\nf\ng"));
        assert!(!looks_messy(&p, "Fine. Good pasta, nice wine!"));
    }
}
