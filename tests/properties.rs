//! Totality and idempotence over seeded random comments (deterministic across runs).

use rand::{rngs::StdRng, Rng, SeedableRng};
use wom_moderation::{moderate, Label, ModerationInput, ModerationPolicy};

const POOL: &[&str] = &[
    "the", "ramen", "was", "great", "best", "incredible", "perfect", "avoid", "terrible",
    "good", "tosi", "hyvä", "ja", "on", "ruoka", "menu", "chef", "excelllent", "culinary gem",
    "work of art", "perfect harmony", "- ", "\n", "!!!", "...", " - ", "😍", "🔥", "☀", "é",
    "日本", "\t", "\u{0}", "\u{7}", "\u{2019}", "", "  ",
];

const NAMES: &[&str] = &["", "Cafe Lumo", "Hesburger Itis", "Hotel Torni", "Kolme Kaveria"];
const IMAGES: &[&str] = &["yes", "no", "", "maybe"];

fn random_comment(rng: &mut StdRng) -> String {
    let n = rng.random_range(0..40);
    let mut s = String::new();
    for _ in 0..n {
        s.push_str(POOL[rng.random_range(0..POOL.len())]);
        if rng.random_range(0..3) > 0 {
            s.push(' ');
        }
    }
    s
}

#[test]
fn every_input_gets_one_label_and_a_reason() {
    let policy = ModerationPolicy::default();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..2_000 {
        let input = ModerationInput::new(
            NAMES[rng.random_range(0..NAMES.len())],
            random_comment(&mut rng),
            IMAGES[rng.random_range(0..IMAGES.len())],
            "",
        );
        let r = moderate(&policy, &input, None);
        assert!(!r.reasons.is_empty(), "no reason for {input:?}");
        assert!(matches!(
            r.decision,
            Label::Keep | Label::Remove | Label::NeedsMoreInformation | Label::NeedsEditing
        ));
    }
}

#[test]
fn same_input_same_result() {
    let policy = ModerationPolicy::default();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..500 {
        let input = ModerationInput::new("Cafe Lumo", random_comment(&mut rng), "yes", "");
        let first = moderate(&policy, &input, None);
        let second = moderate(&policy, &input, None);
        assert_eq!(first, second);
    }
}

#[test]
fn degenerate_strings_are_handled() {
    let policy = ModerationPolicy::default();
    for comment in ["", "   ", "\n\t\r", "日本語だけ", "\u{0}\u{1}\u{2}", "😍", "''''"] {
        let r = moderate(
            &policy,
            &ModerationInput::new("Cafe Lumo", comment, "", ""),
            None,
        );
        assert!(!r.reasons.is_empty(), "comment={comment:?}");
    }
}
