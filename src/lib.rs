// src/lib.rs
// Public library surface for the service binary, the batch CLI and integration tests.

pub mod api;
pub mod batch;
pub mod config;
pub mod debug;
pub mod decision;
pub mod dictionary;
pub mod engine;
pub mod metrics;
pub mod normalize;
pub mod policy;
pub mod signals;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::batch::{InputRecord, Moderator, OutputRecord};
pub use crate::decision::{
    Confidence, ImagePresence, Label, ModerationInput, ModerationResult, ReasonCode,
};
pub use crate::dictionary::{Dictionary, SharedDictionary, WordListDictionary};
pub use crate::engine::moderate;
pub use crate::policy::{ModerationPolicy, PolicyHandle};

use tracing::info;

/// Policy from `MODERATION_CONFIG_PATH` (hot reload when enabled) plus the optional
/// dictionary from `DICTIONARY_PATH`. Shared by the service and the CLI.
pub fn moderator_from_env() -> anyhow::Result<Moderator> {
    let policy = ModerationPolicy::from_env()?;
    let handle = PolicyHandle::new(policy);
    policy::start_hot_reload_thread(handle.clone(), policy::policy_path_from_env());

    let dictionary = dictionary::load_dictionary_from_env();
    info!(
        target: "moderation",
        dictionary = dictionary.is_some(),
        "moderator ready"
    );
    Ok(Moderator::new(handle, dictionary))
}
