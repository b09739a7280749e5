// src/batch.rs
//! Row adapter: input records ⇄ cascade, plus the shared `Moderator` used by the
//! HTTP handlers and the batch CLI.
//!
//! Column names follow the recommendations export ("Restaurant → Name", "Comment",
//! "Image yes/no", "Tags"); snake_case aliases are accepted too. Unknown columns are
//! carried through untouched. Missing or null cells are empty text, never an error.

use crate::decision::{ModerationInput, ModerationResult};
use crate::dictionary::SharedDictionary;
use crate::engine;
use crate::policy::{ModerationPolicy, PolicyHandle};
use anyhow::{Context, Result};
use metrics::{counter, histogram};
use rayon::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::time::Instant;

pub const COL_NAME: &str = "Restaurant → Name";
pub const COL_COMMENT: &str = "Comment";
pub const COL_IMAGE: &str = "Image yes/no";
pub const COL_TAGS: &str = "Tags";
pub const COL_DECISION: &str = "Predicted decision";
pub const COL_CONFIDENCE: &str = "Confidence";
pub const COL_REASONS: &str = "Reason codes";

/// Null / missing → "", strings as-is, numbers and booleans stringified.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(match v {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// One recommendation row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    #[serde(
        rename = "Restaurant → Name",
        alias = "restaurant_name",
        alias = "name",
        default,
        deserialize_with = "lenient_text"
    )]
    pub restaurant_name: String,
    #[serde(
        rename = "Comment",
        alias = "comment",
        default,
        deserialize_with = "lenient_text"
    )]
    pub comment: String,
    #[serde(
        rename = "Image yes/no",
        alias = "image",
        alias = "image_yes_no",
        default,
        deserialize_with = "lenient_text"
    )]
    pub image: String,
    #[serde(rename = "Tags", alias = "tags", default, deserialize_with = "lenient_text")]
    pub tags: String,
    /// Any other columns (e.g. "Created At"), passed through.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InputRecord {
    pub fn new(
        restaurant_name: impl Into<String>,
        comment: impl Into<String>,
        image: impl Into<String>,
        tags: impl Into<String>,
    ) -> Self {
        Self {
            restaurant_name: restaurant_name.into(),
            comment: comment.into(),
            image: image.into(),
            tags: tags.into(),
            extra: Map::new(),
        }
    }

    pub fn to_input(&self) -> ModerationInput {
        ModerationInput::new(
            self.restaurant_name.as_str(),
            self.comment.as_str(),
            &self.image,
            self.tags.as_str(),
        )
    }
}

/// Input row plus the three appended decision columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(flatten)]
    pub input: InputRecord,
    #[serde(rename = "Predicted decision")]
    pub predicted_decision: String,
    #[serde(rename = "Confidence")]
    pub confidence: String,
    #[serde(rename = "Reason codes")]
    pub reason_codes: String,
}

impl OutputRecord {
    pub fn from_result(input: InputRecord, result: &ModerationResult) -> Self {
        Self {
            input,
            predicted_decision: result.decision.to_string(),
            confidence: result.confidence.to_string(),
            reason_codes: result.joined_reasons(),
        }
    }
}

/* ----------------------------
File I/O for the batch CLI
---------------------------- */

/// JSON array of records, or JSON Lines when the extension is `.jsonl`.
pub fn read_records(path: &Path) -> Result<Vec<InputRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file at {}", path.display()))?;

    let is_jsonl = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jsonl"));

    if !is_jsonl {
        return serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON array in {}", path.display()));
    }

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Invalid record on line {} of {}", i + 1, path.display()))
        })
        .collect()
}

/// Pretty JSON array; parent directories are created as needed.
pub fn write_records(path: &Path, records: &[OutputRecord]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output dir {}", dir.display()))?;
    }
    let body = serde_json::to_string_pretty(records).context("Failed to serialize output")?;
    fs::write(path, body)
        .with_context(|| format!("Failed to write output file at {}", path.display()))
}

fn record_metrics(result: &ModerationResult, started: Instant) {
    counter!("moderation_decisions_total", "label" => result.decision.as_str()).increment(1);
    for r in &result.reasons {
        counter!("moderation_reasons_total", "reason" => r.family()).increment(1);
    }
    histogram!("moderation_eval_us").record(started.elapsed().as_micros() as f64);
}

/// Policy handle + optional dictionary, cheap to clone and safe to share across threads.
#[derive(Clone, Default)]
pub struct Moderator {
    policy: PolicyHandle,
    dictionary: Option<SharedDictionary>,
}

impl Moderator {
    pub fn new(policy: PolicyHandle, dictionary: Option<SharedDictionary>) -> Self {
        Self { policy, dictionary }
    }

    pub fn policy(&self) -> &PolicyHandle {
        &self.policy
    }

    pub fn has_dictionary(&self) -> bool {
        self.dictionary.is_some()
    }

    fn evaluate_with(&self, policy: &ModerationPolicy, input: &ModerationInput) -> ModerationResult {
        let started = Instant::now();
        let result = engine::moderate(policy, input, self.dictionary.as_deref());
        record_metrics(&result, started);
        result
    }

    pub fn evaluate(&self, input: &ModerationInput) -> ModerationResult {
        let policy = self.policy.read();
        self.evaluate_with(&policy, input)
    }

    pub fn evaluate_record(&self, record: &InputRecord) -> ModerationResult {
        self.evaluate(&record.to_input())
    }

    /// N records in, N records out, same order. Rows are evaluated in parallel under
    /// one policy snapshot.
    pub fn evaluate_batch(&self, records: Vec<InputRecord>) -> Vec<OutputRecord> {
        let guard = self.policy.read();
        let policy: &ModerationPolicy = &guard;
        records
            .into_par_iter()
            .map(|rec| {
                let result = self.evaluate_with(policy, &rec.to_input());
                OutputRecord::from_result(rec, &result)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_accepts_export_columns_and_nulls() {
        let rec: InputRecord = serde_json::from_value(json!({
            "Restaurant → Name": "Kolme Kaveria",
            "Comment": null,
            "Image yes/no": true,
            "Created At": "2024-05-01"
        }))
        .unwrap();
        assert_eq!(rec.restaurant_name, "Kolme Kaveria");
        assert_eq!(rec.comment, "");
        assert_eq!(rec.image, "true");
        assert_eq!(rec.tags, "");
        assert_eq!(rec.extra.get("Created At"), Some(&json!("2024-05-01")));
    }

    #[test]
    fn record_accepts_snake_case_aliases() {
        let rec: InputRecord = serde_json::from_value(json!({
            "restaurant_name": "Nokka",
            "comment": "Herring and schnapps",
            "image": "no",
            "tags": 7
        }))
        .unwrap();
        assert_eq!(rec.restaurant_name, "Nokka");
        assert_eq!(rec.tags, "7");
        assert!(rec.extra.is_empty());
    }

    #[test]
    fn output_appends_decision_columns() {
        let m = Moderator::default();
        let out = m.evaluate_batch(vec![InputRecord::new("Ravintola Test", "", "no", "")]);
        let v = serde_json::to_value(&out[0]).unwrap();
        assert_eq!(v[COL_NAME], json!("Ravintola Test"));
        assert_eq!(v[COL_COMMENT], json!(""));
        assert_eq!(v[COL_IMAGE], json!("no"));
        assert_eq!(v[COL_TAGS], json!(""));
        assert_eq!(v[COL_DECISION], json!("Remove"));
        assert_eq!(v[COL_CONFIDENCE], json!("high"));
        assert_eq!(v[COL_REASONS], json!("empty_comment"));
    }

    #[test]
    fn jsonl_input_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.jsonl");
        fs::write(
            &path,
            "{\"Comment\": \"one\"}\n\n{\"comment\": \"two\", \"Created At\": 5}\n",
        )
        .unwrap();
        let rows = read_records(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].comment, "two");
        assert_eq!(rows[1].extra.get("Created At"), Some(&json!(5)));
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/labeled.json");
        let out = Moderator::default().evaluate_batch(vec![InputRecord::new("A", "", "", "")]);
        write_records(&path, &out).unwrap();
        let back: Vec<OutputRecord> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, out);
    }
}
