//! End-to-end pipeline: validate, collect, prompt, generate.

use std::path::Path;

use tracing::info;

use crate::{
   api::{LlmBackend, RetryPolicy, Sleeper, generate_commit_message},
   error::Result,
   git::{collect_unstaged_diffs, is_git_repository},
   normalization::extract_commit_message,
};

/// How a suggestion run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
   /// The path is not a git repository; nothing was collected
   NotARepository,
   /// No unstaged modifications; no request was sent
   NoChanges,
   /// Every attempt failed or the model returned nothing
   NothingGenerated,
   Generated(String),
}

/// Changes gathered from a repository, before any request is made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collected {
   /// Nothing to send; the run already has its outcome
   Finished(Outcome),
   /// Filtered diffs, ready for the prompt
   Diffs(String),
}

/// Validate `repo` and collect its filtered unstaged diffs.
///
/// Diffs that filter down to nothing but separators count as no changes.
pub fn collect_changes(repo: &Path) -> Result<Collected> {
   if !is_git_repository(repo) {
      return Ok(Collected::Finished(Outcome::NotARepository));
   }

   let diffs = collect_unstaged_diffs(repo)?;
   if diffs.trim().is_empty() {
      return Ok(Collected::Finished(Outcome::NoChanges));
   }
   Ok(Collected::Diffs(diffs))
}

/// Suggest a commit message for the unstaged changes in `repo`.
pub fn suggest_commit_message(
   repo: &Path,
   backend: &dyn LlmBackend,
   policy: &RetryPolicy,
   sleeper: &dyn Sleeper,
) -> Result<Outcome> {
   let diffs = match collect_changes(repo)? {
      Collected::Finished(outcome) => return Ok(outcome),
      Collected::Diffs(diffs) => diffs,
   };
   info!(diff_len = diffs.len(), "requesting commit message");

   let message = generate_commit_message(backend, policy, sleeper, &diffs)?
      .map(|text| extract_commit_message(&text))
      .unwrap_or_default();
   if message.is_empty() {
      Ok(Outcome::NothingGenerated)
   } else {
      Ok(Outcome::Generated(message))
   }
}
