pub mod console;
pub mod disambiguate;
pub mod error;
pub mod pipeline;
pub mod rename;
pub mod run_log;
pub mod sanitize;
pub mod worker_pool;

pub use console::{Console, PromptLock, prompt_lock};
pub use disambiguate::{Choice, Disambiguator, format_votes, rank_candidates};
pub use error::RenameError;
pub use imdb_renamer_core::{
    Candidate, ConfigError, Decision, FolderTask, Outcome, RunLogEntry, RunSummary, Settings,
};
pub use pipeline::{Orchestrator, discover_folders};
pub use rename::{apply, format_target_name, target_name};
pub use run_log::RunLogSink;
pub use sanitize::{NameSanitizer, already_properly_named, safe_name};
pub use worker_pool::WorkerPool;

#[cfg(test)]
#[path = "tests/support.rs"]
mod tests_support;
