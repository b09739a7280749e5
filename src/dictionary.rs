// src/dictionary.rs
//! Optional dictionary capability for the soft spelling check.
//!
//! The cascade never owns a dictionary: callers inject `Option<&dyn Dictionary>`.
//! Build one at process start (`load_dictionary_from_env`) and share it read-only;
//! if it cannot be built, the service runs with heuristic-only spelling checks.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

pub const ENV_DICTIONARY_PATH: &str = "DICTIONARY_PATH";

/// Single-query "which of these words do you not know" service.
pub trait Dictionary: Send + Sync {
    /// Return the subset of `words` (lowercase) that the dictionary does not recognize.
    fn unknown(&self, words: &[String]) -> Result<HashSet<String>>;

    /// Name for diagnostics/logs.
    fn name(&self) -> &'static str {
        "dictionary"
    }
}

/// Convenient alias used by callers.
pub type SharedDictionary = Arc<dyn Dictionary>;

/// In-memory word list: one word per line, `#` comments and blank lines ignored.
#[derive(Debug, Clone, Default)]
pub struct WordListDictionary {
    words: HashSet<String>,
}

impl WordListDictionary {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty() && !w.starts_with('#'))
            .collect();
        Self { words }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading word list from {}", path.display()))?;
        let dict = Self::from_words(content.lines());
        if dict.is_empty() {
            anyhow::bail!("word list {} is empty", path.display());
        }
        Ok(dict)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordListDictionary {
    fn unknown(&self, words: &[String]) -> Result<HashSet<String>> {
        Ok(words
            .iter()
            .filter(|w| !self.words.contains(w.as_str()))
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "word_list"
    }
}

/// Build the dictionary from `DICTIONARY_PATH`. Unset → `None`; any load failure is
/// logged and also yields `None`, never an error.
pub fn load_dictionary_from_env() -> Option<SharedDictionary> {
    let path = std::env::var(ENV_DICTIONARY_PATH).ok()?;
    load_dictionary(Path::new(&path))
}

pub fn load_dictionary(path: &Path) -> Option<SharedDictionary> {
    match WordListDictionary::from_path(path) {
        Ok(dict) => {
            info!(
                target: "moderation",
                path = %path.display(),
                words = dict.len(),
                "dictionary loaded"
            );
            Some(Arc::new(dict))
        }
        Err(e) => {
            warn!(
                target: "moderation",
                error = %e,
                "dictionary unavailable; spelling checks are heuristic-only"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_reports_missing_words_once() {
        let d = WordListDictionary::from_words(["Soup", " bread ", "", "# comment"]);
        assert_eq!(d.len(), 2);
        let out = d
            .unknown(&["soup".into(), "brede".into(), "brede".into()])
            .unwrap();
        assert_eq!(out, HashSet::from(["brede".to_string()]));
    }

    #[test]
    fn missing_or_empty_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_dictionary(&dir.path().join("nope.txt")).is_none());

        let empty = dir.path().join("empty.txt");
        fs::write(&empty, "\n# nothing\n").unwrap();
        assert!(load_dictionary(&empty).is_none());

        let ok = dir.path().join("words.txt");
        fs::write(&ok, "soup\nbread\n").unwrap();
        assert!(load_dictionary(&ok).is_some());
    }
}
