//! Label a file of recommendations: JSON array (or `.jsonl`) in, labelled JSON array out.
//!
//! Usage: `label_recommendations <input.json|input.jsonl> [output]`

use anyhow::{bail, Result};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wom_moderation::batch::{read_records, write_records};
use wom_moderation::moderator_from_env;

const DEFAULT_OUTPUT: &str = "output/recommendations_labeled.json";

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moderation=info,warn")),
        )
        .with_target(false)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next().map(PathBuf::from) else {
        bail!("usage: label_recommendations <input.json|input.jsonl> [output]");
    };
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let moderator = moderator_from_env()?;
    let records = read_records(&input)?;
    let rows = records.len();

    let labeled = moderator.evaluate_batch(records);
    write_records(&output, &labeled)?;

    info!(target: "moderation", rows, output = %output.display(), "recommendations labelled");
    println!("Saved: {}", output.display());
    Ok(())
}
