// src/config/policy.rs
//! Moderation policy tables (vocabularies + thresholds) as plain config data.
//!
//! Every section is optional in TOML; anything left out falls back to the
//! built-in tables below, so a file only needs to carry what it overrides:
//!
//! ```toml
//! [thresholds]
//! min_chars = 50
//!
//! [vocab]
//! chain_prefixes = ["hesburger", "subway"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub thresholds: Thresholds,
    pub vocab: Vocabulary,
}

impl PolicyConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: PolicyConfig = toml::from_str(s).context("parsing moderation policy TOML")?;
        Ok(cfg)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading moderation policy from {}", path.display()))?;
        Self::from_toml_str(&data).with_context(|| format!("in {}", path.display()))
    }
}

/// Numeric knobs of the cascade and the detectors. Lengths are in chars of normalized text.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Platform minimum; also the "short" bound of the generic-comment detector.
    pub min_chars: usize,
    /// Soft emoji cap; more than this needs editing.
    pub max_emojis: usize,
    /// Emoji count that counts as spam when combined with hype.
    pub hard_emoji_remove: usize,
    /// Hype without specifics below this length is removed outright.
    pub short_hype_chars: usize,
    /// Without an image, text below this length and without specifics is too weak.
    pub no_image_chars: usize,
    /// Below this length a comment needs specifics to be kept.
    pub low_specificity_chars: usize,

    pub marketing_min_chars: usize,
    pub marketing_min_hits: usize,

    pub foreign_min_hits: usize,
    pub foreign_margin: usize,
    pub diacritic_min: usize,

    pub hype_min_hits: usize,
    pub hype_min_exclamations: usize,
    pub ai_template_min_hits: usize,

    pub dashy_bullet_lines: usize,
    pub dashy_inline_separators: usize,

    pub messy_punct_run: usize,
    pub messy_line_breaks: usize,

    pub spelling_min_token_len: usize,
    pub spelling_min_tokens: usize,
    pub spelling_min_unknown: usize,
    pub vowelless_min_len: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_chars: 42,
            max_emojis: 2,
            hard_emoji_remove: 3,
            short_hype_chars: 60,
            no_image_chars: 60,
            low_specificity_chars: 120,
            marketing_min_chars: 140,
            marketing_min_hits: 2,
            foreign_min_hits: 3,
            foreign_margin: 2,
            diacritic_min: 3,
            hype_min_hits: 2,
            hype_min_exclamations: 3,
            ai_template_min_hits: 3,
            dashy_bullet_lines: 2,
            dashy_inline_separators: 3,
            messy_punct_run: 3,
            messy_line_breaks: 6,
            spelling_min_token_len: 4,
            spelling_min_tokens: 8,
            spelling_min_unknown: 2,
            vowelless_min_len: 8,
        }
    }
}

/// Word and phrase tables. Matching is case-insensitive; entries are normalized on compile.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Brand prefixes matched as exact name or prefix followed by ` `, `-`, `'` or `’`.
    pub chain_prefixes: Vec<String>,
    pub hotel_tokens: Vec<String>,

    /// Whole-word markers of the foreign target language (Finnish).
    pub foreign_markers: Vec<String>,
    pub english_markers: Vec<String>,
    pub foreign_diacritics: Vec<char>,

    pub marketing_phrases: Vec<String>,
    /// Checked against the comment padded with a space on both sides.
    pub first_person: Vec<String>,

    pub avoidance_phrases: Vec<String>,
    pub strong_negative: Vec<String>,
    pub positive_markers: Vec<String>,

    pub generic_phrases: Vec<String>,
    pub hype_words: Vec<String>,
    pub ai_template_phrases: Vec<String>,

    /// Whole-word dish/beverage terms.
    pub concrete_food: Vec<String>,
    /// Broader specificity: dishes, service, ambience, ordering.
    pub specificity_terms: Vec<String>,

    /// Regional spellings the dictionary check must not count as unknown.
    pub accepted_spellings: Vec<String>,
    /// Known food typos; any occurrence flags the comment for editing.
    pub food_typos: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            chain_prefixes: strings(&[
                "hesburger",
                "mcdonald",
                "mcdonald's",
                "subway",
                "burger king",
                "kfc",
                "taco bell",
                "pizza hut",
                "starbucks",
                "espresso house",
                "fazer cafe",
            ]),
            hotel_tokens: strings(&["hotel"]),
            foreign_markers: strings(&[
                "ja",
                "on",
                "se",
                "että",
                "mutta",
                "kun",
                "tämä",
                "tosi",
                "hyvä",
                "ihan",
                "suosittelen",
                "ravintola",
                "kiva",
                "mahtava",
                "ruoka",
                "palvelu",
                "annos",
            ]),
            english_markers: strings(&[
                "and",
                "the",
                "is",
                "was",
                "are",
                "but",
                "this",
                "that",
                "really",
                "great",
                "recommend",
                "food",
                "service",
                "place",
                "try",
                "dish",
                "menu",
            ]),
            foreign_diacritics: vec!['ä', 'ö', 'å'],
            marketing_phrases: strings(&[
                "culinary landscape",
                "philosophy",
                "time and place",
                "bounty",
                "showcase",
                "evolved",
                "shaped",
                "experience",
                "once in a lifetime",
                "truly",
                "daring",
                "concept",
                "vision",
                "period",
                "themes",
                "throughout the year",
                "region",
            ]),
            first_person: strings(&[" i ", " i'", " i'm", " my ", " we ", " our ", " us "]),
            avoidance_phrases: strings(&["avoid", "don't go", "do not go", "would not recommend"]),
            strong_negative: strings(&[
                "avoid",
                "don't go",
                "do not go",
                "never again",
                "waste of money",
                "terrible",
                "awful",
                "horrible",
                "worst",
                "disgusting",
                "bad service",
                "overpriced and bad",
                "not worth",
                "would not recommend",
            ]),
            positive_markers: strings(&[
                "recommend", "worth", "love", "great", "amazing", "must", "try", "good",
                "favorite", "solid",
            ]),
            generic_phrases: strings(&[
                "great place",
                "really good",
                "so good",
                "nice place",
                "love it",
                "highly recommend",
                "amazing",
                "awesome",
                "pretty good",
                "must try",
            ]),
            hype_words: strings(&[
                "best",
                "incredible",
                "perfect",
                "unreal",
                "life changing",
                "insane",
                "mind blowing",
                "never had better",
                "10/10",
            ]),
            ai_template_phrases: strings(&[
                "culinary gem",
                "perfect harmony",
                "work of art",
                "beautifully crafted",
                "unforgettable flavors",
                "unforgettable flavours",
                "thoughtful presentation",
                "highly recommended",
                "must-try",
                "must try",
            ]),
            concrete_food: strings(&[
                "pizza",
                "pasta",
                "ramen",
                "sushi",
                "tartar",
                "herring",
                "steak",
                "pancake",
                "dessert",
                "coffee",
                "wine",
                "beer",
                "cocktail",
                "cheese",
                "bread",
                "dumpling",
                "noodle",
                "schnapps",
                "vorschmack",
            ]),
            specificity_terms: strings(&[
                "dish",
                "menu",
                "wine",
                "beer",
                "cocktail",
                "tasting",
                "chef",
                "atmosphere",
                "service",
                "interior",
                "music",
                "book",
                "walk in",
                "order",
                "try",
                "ramen",
                "pizza",
                "pasta",
                "tartar",
                "herring",
                "schnapps",
                "steak",
                "dessert",
                "cheese",
                "bread",
                "coffee",
            ]),
            accepted_spellings: strings(&[
                "favourite",
                "colour",
                "flavour",
                "neighbourhood",
                "theatre",
                "centre",
                "travelling",
                "traveller",
                "apologise",
                "organise",
                "realise",
                "behaviour",
                "cheque",
                "grey",
                "cheers",
            ]),
            food_typos: strings(&["napoletan"]),
        }
    }
}
