// src/policy.rs
//! Compiled moderation policy: normalized tables + word-boundary regexes, and a
//! thread-safe handle that can hot-reload the policy file in dev/local.

use crate::config::{PolicyConfig, Thresholds, Vocabulary};
use crate::normalize::normalize;
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard};
use std::thread;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

// --- env defaults & names ---
pub const DEFAULT_POLICY_CONFIG_PATH: &str = "config/moderation.toml";
pub const ENV_POLICY_CONFIG_PATH: &str = "MODERATION_CONFIG_PATH";
pub const ENV_POLICY_HOT_RELOAD: &str = "MODERATION_HOT_RELOAD";

/// Whole-word matcher for one vocabulary entry.
#[derive(Debug)]
pub(crate) struct WordPattern {
    #[cfg(test)]
    pub word: String,
    pub re: Regex,
}

/// Policy ready for evaluation. Immutable once built; share it by reference.
#[derive(Debug)]
pub struct ModerationPolicy {
    pub thresholds: Thresholds,
    /// Vocabulary after normalization (lowercase, collapsed spaces, empties dropped).
    pub vocab: Vocabulary,
    pub(crate) foreign_words: Vec<WordPattern>,
    pub(crate) english_words: Vec<WordPattern>,
    pub(crate) food_words: Vec<WordPattern>,
    pub(crate) bullet_line: Regex,
    pub(crate) punct_run: Regex,
}

impl Default for ModerationPolicy {
    fn default() -> Self {
        Self::from_config(PolicyConfig::default()).expect("built-in moderation policy compiles")
    }
}

impl ModerationPolicy {
    /// Normalize tables and compile regexes.
    pub fn from_config(cfg: PolicyConfig) -> Result<Self> {
        let PolicyConfig { thresholds, vocab } = cfg;
        let vocab = normalize_vocab(vocab);

        let foreign_words = compile_words("foreign_markers", &vocab.foreign_markers)?;
        let english_words = compile_words("english_markers", &vocab.english_markers)?;
        let food_words = compile_words("concrete_food", &vocab.concrete_food)?;

        let bullet_line = Regex::new(r"(?m)^\s*-\s+").context("bullet-line regex")?;
        let run = thresholds.messy_punct_run.max(1);
        let punct_run =
            Regex::new(&format!("[!?.,]{{{run},}}")).context("punctuation-run regex")?;

        Ok(Self {
            thresholds,
            vocab,
            foreign_words,
            english_words,
            food_words,
            bullet_line,
            punct_run,
        })
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Self::from_config(PolicyConfig::from_toml_str(s)?)
    }

    /// Load from `MODERATION_CONFIG_PATH` or `config/moderation.toml`.
    /// A missing file means built-in tables; a present but broken file is an error.
    pub fn from_env() -> Result<Self> {
        let path = policy_path_from_env();
        if !path.exists() {
            info!(
                target: "moderation",
                path = %path.display(),
                "policy file not found, using built-in tables"
            );
            return Self::from_config(PolicyConfig::default());
        }
        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let cfg = PolicyConfig::load_from_file(path)?;
        let policy = Self::from_config(cfg)
            .with_context(|| format!("compiling policy from {}", path.display()))?;
        info!(
            target: "moderation",
            path = %path.display(),
            chains = policy.vocab.chain_prefixes.len(),
            min_chars = policy.thresholds.min_chars,
            "moderation policy loaded"
        );
        Ok(policy)
    }
}

pub fn policy_path_from_env() -> PathBuf {
    std::env::var(ENV_POLICY_CONFIG_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_POLICY_CONFIG_PATH))
}

fn normalize_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| normalize(&s))
        .filter(|s| !s.is_empty())
        .collect()
}

fn normalize_vocab(v: Vocabulary) -> Vocabulary {
    Vocabulary {
        chain_prefixes: normalize_list(v.chain_prefixes),
        hotel_tokens: normalize_list(v.hotel_tokens),
        foreign_markers: normalize_list(v.foreign_markers),
        english_markers: normalize_list(v.english_markers),
        foreign_diacritics: v
            .foreign_diacritics
            .into_iter()
            .flat_map(char::to_lowercase)
            .collect(),
        marketing_phrases: normalize_list(v.marketing_phrases),
        // Padding spaces are part of these entries; only lowercase them.
        first_person: v
            .first_person
            .into_iter()
            .map(|s| s.to_lowercase())
            .filter(|s| !s.trim().is_empty())
            .collect(),
        avoidance_phrases: normalize_list(v.avoidance_phrases),
        strong_negative: normalize_list(v.strong_negative),
        positive_markers: normalize_list(v.positive_markers),
        generic_phrases: normalize_list(v.generic_phrases),
        hype_words: normalize_list(v.hype_words),
        ai_template_phrases: normalize_list(v.ai_template_phrases),
        concrete_food: normalize_list(v.concrete_food),
        specificity_terms: normalize_list(v.specificity_terms),
        accepted_spellings: normalize_list(v.accepted_spellings),
        food_typos: normalize_list(v.food_typos),
    }
}

fn compile_words(table: &str, words: &[String]) -> Result<Vec<WordPattern>> {
    words
        .iter()
        .map(|w| {
            let re = Regex::new(&format!(r"\b{}\b", regex::escape(w)))
                .map_err(|e| anyhow!("{table} entry `{w}` regex error: {e}"))?;
            Ok(WordPattern {
                #[cfg(test)]
                word: w.clone(),
                re,
            })
        })
        .collect()
}

/* ----------------------------
Thread-safe handle + hot reload
---------------------------- */

/// Shared, swappable policy. Readers take a read guard for the duration of one
/// evaluation (or one batch) so a reload never splits a batch across versions.
#[derive(Clone, Debug)]
pub struct PolicyHandle {
    inner: Arc<RwLock<ModerationPolicy>>,
}

impl Default for PolicyHandle {
    fn default() -> Self {
        Self::new(ModerationPolicy::default())
    }
}

impl PolicyHandle {
    pub fn new(policy: ModerationPolicy) -> Self {
        Self {
            inner: Arc::new(RwLock::new(policy)),
        }
    }

    /// Read guard; a poisoned lock still yields the last good policy.
    pub fn read(&self) -> RwLockReadGuard<'_, ModerationPolicy> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn replace(&self, policy: ModerationPolicy) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = policy;
    }

    /// Re-read `path` and swap on success; on failure the current policy stays.
    pub fn reload_from(&self, path: &Path) -> Result<()> {
        let fresh = ModerationPolicy::from_path(path)?;
        self.replace(fresh);
        Ok(())
    }
}

// Dev gate: debug build OR SHUTTLE_ENV in {local,development,dev}
pub(crate) fn is_dev_env() -> bool {
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// Returns true if we should enable hot reload (dev/local only).
fn hot_reload_enabled() -> bool {
    let want = std::env::var(ENV_POLICY_HOT_RELOAD)
        .ok()
        .map(|v| v == "1")
        .unwrap_or(false);
    want && is_dev_env()
}

/// Start a simple polling watcher on `path` to hot-reload into `handle`.
/// Polls mtime every 2s.
pub fn start_hot_reload_thread(handle: PolicyHandle, path: PathBuf) {
    if !hot_reload_enabled() {
        return;
    }
    info!(target: "moderation", path = %path.display(), "policy hot reload enabled");

    thread::spawn(move || {
        let poll = Duration::from_secs(2);
        let mut last_mtime: Option<SystemTime> = None;

        loop {
            if let Ok(mtime) = fs::metadata(&path).and_then(|m| m.modified()) {
                let changed = match last_mtime {
                    None => {
                        last_mtime = Some(mtime);
                        false
                    }
                    Some(prev) => mtime > prev,
                };
                if changed {
                    match handle.reload_from(&path) {
                        Ok(()) => info!(target: "moderation", "policy reloaded"),
                        Err(e) => warn!(target: "moderation", error = %e, "policy reload failed; keeping previous"),
                    }
                    last_mtime = Some(mtime);
                }
            }
            thread::sleep(poll);
        }
    });
}
