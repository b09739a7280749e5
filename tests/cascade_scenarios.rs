// tests/cascade_scenarios.rs
//
// Hand-picked recommendations through the public cascade, built-in policy, no dictionary.
//
// Covered:
// - reference rows (chain, empty, tasting menu, bullet list)
// - guardrail precedence (language before negativity)
// - hype + emoji spam
// - specificity deciding the minimum-length branch
// - negative detector asymmetry with an incidental positive word
// - canned praise and marketing copy exits

use wom_moderation::{
    moderate, Confidence, Label, ModerationInput, ModerationPolicy, ModerationResult, ReasonCode,
};

fn run(name: &str, comment: &str, image: &str) -> ModerationResult {
    let policy = ModerationPolicy::default();
    moderate(&policy, &ModerationInput::new(name, comment, image, ""), None)
}

#[test]
fn chain_restaurant_is_removed() {
    let r = run("McDonald's Kamppi", "great food!!", "yes");
    assert_eq!(r.decision, Label::Remove);
    assert_eq!(r.confidence, Confidence::High);
    assert!(r.reasons.contains(&ReasonCode::ChainOrFranchise));
}

#[test]
fn empty_comment_is_removed() {
    let r = run("Ravintola Test", "", "no");
    assert_eq!(r.decision, Label::Remove);
    assert_eq!(r.confidence, Confidence::High);
    assert_eq!(r.joined_reasons(), "empty_comment");
}

#[test]
fn specific_tasting_menu_is_kept() {
    let r = run(
        "Kolme Kaveria",
        "Loved the tasting menu — the chef's tartare and the wine pairing were outstanding, \
         portions generous, service attentive and knowledgeable.",
        "yes",
    );
    assert_eq!(r.decision, Label::Keep);
    assert_eq!(r.confidence, Confidence::High);
    assert_eq!(r.reason_codes(), vec!["specific_helpful"]);
}

#[test]
fn bullet_list_with_dishes_needs_editing() {
    let r = run(
        "Kolme Kaveria",
        "- ramen with pork belly\n- gyoza crisp on one side\n- cold sake\n- matcha ice cream\n- yuzu sorbet",
        "yes",
    );
    assert_eq!(r.decision, Label::NeedsEditing);
    assert_eq!(r.confidence, Confidence::Medium);
    assert!(r.reasons.contains(&ReasonCode::DashyFormatting));
}

#[test]
fn non_english_wins_over_negative() {
    let r = run(
        "Nokka",
        "Tosi hyvä ruoka ja palvelu, mutta tämä on kallis. Avoid.",
        "yes",
    );
    assert_eq!(r.decision, Label::Remove);
    assert_eq!(r.reasons, vec![ReasonCode::NonEnglishComment]);
}

#[test]
fn diacritic_only_text_counts_as_non_english() {
    let r = run("Nokka", "ääää öööö", "yes");
    assert_eq!(r.reasons, vec![ReasonCode::NonEnglishComment]);
}

#[test]
fn hype_with_emoji_spam_is_removed() {
    let r = run("Cafe Lumo", "Best place ever!!! incredible perfect 😍😍😍", "yes");
    assert_eq!(r.decision, Label::Remove);
    assert_eq!(r.confidence, Confidence::High);
    assert_eq!(
        r.reasons,
        vec![ReasonCode::HypePlusFormatSpam, ReasonCode::EmojiSpam(3)]
    );
    assert_eq!(r.joined_reasons(), "hype_plus_format_spam, emoji_spam(3)");
}

#[test]
fn a_dish_name_lifts_a_short_comment_past_the_minimum() {
    let specific = run("Cafe Lumo", "the ramen was great", "yes");
    let vague = run("Cafe Lumo", "it was great", "yes");

    assert_eq!(vague.decision, Label::Remove);
    assert_eq!(vague.reason_codes(), vec!["below_min_chars(<42)"]);

    assert_ne!(specific.decision, Label::Remove);
    assert!(!specific
        .reasons
        .iter()
        .any(|r| matches!(r, ReasonCode::BelowMinChars(_))));
}

#[test]
fn explicit_avoidance_is_negative_even_with_praise() {
    let r = run(
        "Cafe Lumo",
        "Avoid this one, the service was slow and the room was cold",
        "yes",
    );
    assert_eq!(r.reasons, vec![ReasonCode::NegativeRecommendation]);
}

#[test]
fn strong_negative_without_praise_is_removed() {
    let r = run("Cafe Lumo", "terrible food, awful night", "yes");
    assert_eq!(r.decision, Label::Remove);
    assert_eq!(r.reasons, vec![ReasonCode::NegativeRecommendation]);
}

// Known gap: one positive marker ("good") hides a strong negative. Kept as-is on purpose
// until the detector is reworked; this test pins the current behavior.
#[test]
fn incidental_praise_masks_strong_negative() {
    let r = run("Cafe Lumo", "good service, terrible food", "yes");
    assert!(!r.reasons.contains(&ReasonCode::NegativeRecommendation));
    assert_eq!(r.decision, Label::Keep);
}

#[test]
fn image_flag_only_matters_when_explicitly_no() {
    let comment = "Cosy little corner spot with friendly staff, worth it";
    for image in ["yes", "", "maybe"] {
        assert_eq!(
            run("Cafe Lumo", comment, image).reasons,
            vec![ReasonCode::LowSpecificity],
            "image={image:?}"
        );
    }
    assert_eq!(
        run("Cafe Lumo", comment, "No").reasons,
        vec![ReasonCode::NoImageWeakText]
    );
}

#[test]
fn canned_praise_with_a_dish_is_still_generic() {
    // "pasta" clears the minimum-length exit; "amazing" is canned praise.
    let r = run("Cafe Lumo", "amazing pasta", "yes");
    assert_eq!(r.decision, Label::Remove);
    assert_eq!(r.confidence, Confidence::High);
    assert_eq!(r.reasons, vec![ReasonCode::GenericShortComment]);
}

#[test]
fn impersonal_marketing_copy_is_removed() {
    let copy = "A daring concept shaped by the bounty of the region, this kitchen showcase \
                evolved into a vision of time and place that is truly unlike anything else \
                throughout the year.";
    let r = run("Cafe Lumo", copy, "yes");
    assert_eq!(r.decision, Label::Remove);
    assert_eq!(r.confidence, Confidence::High);
    assert_eq!(r.reasons, vec![ReasonCode::MarketingOrAiTone]);

    // A first-person voice takes it out of the marketing exit.
    let personal = run("Cafe Lumo", &format!("{copy} We went twice."), "yes");
    assert!(!personal.reasons.contains(&ReasonCode::MarketingOrAiTone));
}
