//! Commit message suggestions for unstaged git changes
//!
//! Collects the working-tree diff of a repository, reduces it to the changed
//! lines, and asks an OpenAI-compatible completion endpoint for a commit
//! message, retrying failed requests with exponential backoff.
pub mod api;
pub mod config;
pub mod diff;
pub mod error;
pub mod git;
pub mod normalization;
pub mod prompt;
pub mod style;
pub mod suggest;
pub mod types;

// Re-export commonly used types
pub use api::{LlmBackend, RemoteBackend, RetryPolicy, Sleeper, ThreadSleeper};
pub use config::SuggestConfig;
pub use error::{GenerationError, Result, SuggestError};
pub use suggest::{Collected, Outcome, collect_changes, suggest_commit_message};
