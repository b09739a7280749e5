//! # Decision Cascade
//! Pure, testable logic that maps one `ModerationInput` → `ModerationResult`.
//! No I/O, no shared state; the dictionary (if any) is injected read-only.
//!
//! Policy: guardrails (empty, chain, hotel, language, marketing tone, negativity)
//! short-circuit with high confidence before any stylistic judgment. After that the
//! format/hype flags and specificity are computed once and reused by every later
//! branch; the first branch that matches decides.

use crate::decision::{Confidence, Label, ModerationInput, ModerationResult, ReasonCode};
use crate::dictionary::Dictionary;
use crate::normalize::{char_len, normalize};
use crate::policy::{is_dev_env, ModerationPolicy};
use crate::signals;
use tracing::info;

/// Evaluate one recommendation. Total: any text, including empty, yields exactly one
/// label with at least one reason.
pub fn moderate(
    policy: &ModerationPolicy,
    input: &ModerationInput,
    dictionary: Option<&dyn Dictionary>,
) -> ModerationResult {
    let result = cascade(policy, input, dictionary);
    dev_log_decision(input, &result);
    result
}

fn cascade(
    policy: &ModerationPolicy,
    input: &ModerationInput,
    dictionary: Option<&dyn Dictionary>,
) -> ModerationResult {
    use ReasonCode::*;

    let th = &policy.thresholds;
    let name = input.restaurant_name.trim();
    let text = input.comment.trim();
    let tn = normalize(text);
    let len = char_len(&tn);

    // 1) Guardrails
    if tn.is_empty() {
        return ModerationResult::remove(EmptyComment);
    }
    if signals::is_chain_or_franchise(policy, name) {
        return ModerationResult::remove(ChainOrFranchise);
    }
    if signals::is_hotel(policy, name) {
        return ModerationResult::remove(HotelNotTarget);
    }
    if signals::is_non_english(policy, text) {
        return ModerationResult::remove(NonEnglishComment);
    }
    if signals::is_marketing_or_ai_copy(policy, text) {
        return ModerationResult::remove(MarketingOrAiTone);
    }
    if signals::is_negative_recommendation(policy, text) {
        return ModerationResult::remove(NegativeRecommendation);
    }

    // 2) Format/hype flags + specificity, computed once
    let emoji_n = signals::count_emojis(text);
    let dashy = signals::uses_dashy_style(policy, text);
    let overly_positive = signals::overly_positive_hype(policy, text);
    let hype = signals::is_ai_hype_template(policy, text) || overly_positive;
    let emoji_spam = emoji_n >= th.hard_emoji_remove;
    let specific = signals::has_specifics(policy, text);

    let mut reasons = Vec::new();

    // 3) Hype combined with format spam outranks either alone
    if hype && (dashy || emoji_spam) {
        reasons.push(HypePlusFormatSpam);
        if dashy {
            reasons.push(DashyFormatting);
        }
        if emoji_spam {
            reasons.push(EmojiSpam(emoji_n));
        }
        return ModerationResult::new(Label::Remove, Confidence::High, reasons);
    }

    if dashy {
        reasons.push(DashyFormatting);
        let label = if specific {
            Label::NeedsEditing
        } else {
            Label::NeedsMoreInformation
        };
        return ModerationResult::new(label, Confidence::Medium, reasons);
    }

    if emoji_n > th.max_emojis {
        reasons.push(TooManyEmojis(emoji_n));
        if signals::is_generic_comment(policy, text) {
            reasons.push(GenericHypeWithEmojis);
            return ModerationResult::new(Label::Remove, Confidence::High, reasons);
        }
        return ModerationResult::new(Label::NeedsEditing, Confidence::Medium, reasons);
    }

    // 4) Length and specificity
    if len < th.min_chars && !specific {
        reasons.push(BelowMinChars(th.min_chars));
        return ModerationResult::new(Label::Remove, Confidence::High, reasons);
    }

    if signals::is_generic_comment(policy, text) {
        reasons.push(GenericShortComment);
        return ModerationResult::new(Label::Remove, Confidence::High, reasons);
    }

    if overly_positive && !specific {
        reasons.push(OverlyPositiveWithoutSpecifics);
        if len < th.short_hype_chars {
            reasons.push(ShortHype);
            return ModerationResult::new(Label::Remove, Confidence::High, reasons);
        }
        return ModerationResult::new(Label::NeedsMoreInformation, Confidence::Medium, reasons);
    }

    if input.image == crate::decision::ImagePresence::No
        && len < th.no_image_chars
        && !specific
    {
        reasons.push(NoImageWeakText);
        return ModerationResult::new(Label::NeedsMoreInformation, Confidence::Medium, reasons);
    }

    if signals::looks_messy(policy, text) && specific {
        reasons.push(MessyButSalvageable);
        return ModerationResult::new(Label::NeedsEditing, Confidence::Medium, reasons);
    }

    if len < th.low_specificity_chars && !specific {
        reasons.push(LowSpecificity);
        return ModerationResult::new(Label::NeedsMoreInformation, Confidence::Medium, reasons);
    }

    // 5) Spelling: an otherwise good recommendation goes to editing
    if signals::has_spelling_issues(policy, text, dictionary) {
        reasons.push(SpellingIssues);
        return ModerationResult::new(Label::NeedsEditing, Confidence::Medium, reasons);
    }

    reasons.push(SpecificHelpful);
    let confidence = if specific {
        Confidence::High
    } else {
        Confidence::Medium
    };
    ModerationResult::new(Label::Keep, confidence, reasons)
}

/* ----------------------------
Dev-only diagnostics
---------------------------- */

// MODERATION_DEV_LOG=1 AND dev env (debug build or SHUTTLE_ENV in {local,development,dev})
fn dev_logging_enabled() -> bool {
    std::env::var("MODERATION_DEV_LOG").ok().as_deref() == Some("1") && is_dev_env()
}

/// Short, stable, anonymized id for a comment (first 6 bytes of SHA-256, hex).
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

// Never log raw text. Only hashed id + verdict.
fn dev_log_decision(input: &ModerationInput, result: &ModerationResult) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(&input.comment);
    info!(
        target: "moderation",
        %id,
        decision = %result.decision,
        confidence = %result.confidence,
        reasons = %result.joined_reasons(),
        "decision"
    );
}
