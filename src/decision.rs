//! decision.rs: input and output shapes of one moderation decision.
//!
//! A decision is the triple (label, confidence, reason codes). Reason codes are
//! stable machine tokens (`chain_or_franchise`, `emoji_spam(4)`, ...) emitted in
//! evaluation order, never sorted by severity.

use crate::normalize::normalize;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Whether the recommendation came with a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePresence {
    Yes,
    No,
    #[default]
    Unknown,
}

impl ImagePresence {
    /// Free text → tri-state. Anything unrecognized (including empty) is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match normalize(raw).as_str() {
            "yes" | "y" | "true" | "1" => Self::Yes,
            "no" | "n" | "false" | "0" => Self::No,
            _ => Self::Unknown,
        }
    }
}

/// One recommendation as the cascade sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModerationInput {
    pub restaurant_name: String,
    pub comment: String,
    pub image: ImagePresence,
    /// Accepted for future rules; the cascade does not read it.
    pub tags: String,
}

impl ModerationInput {
    pub fn new(
        restaurant_name: impl Into<String>,
        comment: impl Into<String>,
        image: &str,
        tags: impl Into<String>,
    ) -> Self {
        Self {
            restaurant_name: restaurant_name.into(),
            comment: comment.into(),
            image: ImagePresence::parse(image),
            tags: tags.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Keep,
    Remove,
    #[serde(rename = "Needs more information")]
    NeedsMoreInformation,
    #[serde(rename = "Recommendation needs editing")]
    NeedsEditing,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Keep => "Keep",
            Label::Remove => "Remove",
            Label::NeedsMoreInformation => "Needs more information",
            Label::NeedsEditing => "Recommendation needs editing",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule fired. Renders to the stable token via `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonCode {
    EmptyComment,
    ChainOrFranchise,
    HotelNotTarget,
    NonEnglishComment,
    MarketingOrAiTone,
    NegativeRecommendation,
    HypePlusFormatSpam,
    DashyFormatting,
    /// Emoji count that made hype a format-spam removal.
    EmojiSpam(usize),
    /// Emoji count above the soft cap.
    TooManyEmojis(usize),
    GenericHypeWithEmojis,
    /// Carries the configured minimum, rendered as `below_min_chars(<42)`.
    BelowMinChars(usize),
    GenericShortComment,
    OverlyPositiveWithoutSpecifics,
    ShortHype,
    NoImageWeakText,
    MessyButSalvageable,
    LowSpecificity,
    SpellingIssues,
    SpecificHelpful,
}

impl ReasonCode {
    /// Token family without arguments (`emoji_spam` for `emoji_spam(4)`); handy as a metric label.
    pub fn family(&self) -> &'static str {
        match self {
            ReasonCode::EmptyComment => "empty_comment",
            ReasonCode::ChainOrFranchise => "chain_or_franchise",
            ReasonCode::HotelNotTarget => "hotel_not_target",
            ReasonCode::NonEnglishComment => "non_english_comment",
            ReasonCode::MarketingOrAiTone => "marketing_or_ai_tone",
            ReasonCode::NegativeRecommendation => "negative_recommendation",
            ReasonCode::HypePlusFormatSpam => "hype_plus_format_spam",
            ReasonCode::DashyFormatting => "dashy_formatting",
            ReasonCode::EmojiSpam(_) => "emoji_spam",
            ReasonCode::TooManyEmojis(_) => "too_many_emojis",
            ReasonCode::GenericHypeWithEmojis => "generic_hype_with_emojis",
            ReasonCode::BelowMinChars(_) => "below_min_chars",
            ReasonCode::GenericShortComment => "generic_short_comment",
            ReasonCode::OverlyPositiveWithoutSpecifics => "overly_positive_without_specifics",
            ReasonCode::ShortHype => "short_hype",
            ReasonCode::NoImageWeakText => "no_image_weak_text",
            ReasonCode::MessyButSalvageable => "messy_but_salvageable",
            ReasonCode::LowSpecificity => "low_specificity",
            ReasonCode::SpellingIssues => "spelling_issues",
            ReasonCode::SpecificHelpful => "specific_helpful",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasonCode::EmojiSpam(n) | ReasonCode::TooManyEmojis(n) => {
                write!(f, "{}({n})", self.family())
            }
            ReasonCode::BelowMinChars(min) => write!(f, "{}(<{min})", self.family()),
            other => f.write_str(other.family()),
        }
    }
}

impl Serialize for ReasonCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Final verdict for one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModerationResult {
    pub decision: Label,
    pub confidence: Confidence,
    pub reasons: Vec<ReasonCode>,
}

impl ModerationResult {
    pub fn new(decision: Label, confidence: Confidence, reasons: Vec<ReasonCode>) -> Self {
        debug_assert!(!reasons.is_empty(), "every decision carries a reason");
        Self {
            decision,
            confidence,
            reasons,
        }
    }

    /// Guardrail exit: single reason, high confidence.
    pub fn remove(reason: ReasonCode) -> Self {
        Self::new(Label::Remove, Confidence::High, vec![reason])
    }

    pub fn reason_codes(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }

    /// Comma-joined tokens in emission order, as written to output records.
    pub fn joined_reasons(&self) -> String {
        self.reason_codes().join(", ")
    }
}
