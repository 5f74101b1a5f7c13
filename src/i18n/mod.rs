//! Language metadata for the translation pipeline.
//!
//! - `registry`: single source of truth for supported languages, their
//!   display names, and the stop-word lists used by heuristic detection

mod registry;

pub use registry::{LanguageConfig, LanguageRegistry};
