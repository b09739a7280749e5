// src/config/mod.rs
pub mod policy;

pub use policy::{PolicyConfig, Thresholds, Vocabulary};
