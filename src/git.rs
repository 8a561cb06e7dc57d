use std::{path::Path, process::Command};

use tracing::debug;

use crate::{
   diff::filter_changed_lines,
   error::{Result, SuggestError},
};

/// Check whether `dir` is the top level of a git work tree.
///
/// Subdirectories of a work tree are rejected: `git diff --name-only` reports
/// root-relative paths, which would not resolve from anywhere else.
pub fn is_git_repository(dir: &Path) -> bool {
   let Ok(output) = Command::new("git")
      .args(["rev-parse", "--show-toplevel"])
      .current_dir(dir)
      .output()
   else {
      return false;
   };
   if !output.status.success() {
      return false;
   }

   let stdout = String::from_utf8_lossy(&output.stdout);
   let toplevel = Path::new(stdout.trim_end_matches(['\n', '\r']));
   match (toplevel.canonicalize(), dir.canonicalize()) {
      (Ok(toplevel), Ok(dir)) => toplevel == dir,
      _ => false,
   }
}

/// List files whose working-tree contents differ from the index
pub fn list_unstaged_files(dir: &Path) -> Result<Vec<String>> {
   let output = Command::new("git")
      .args(["diff", "--name-only", "-z"])
      .current_dir(dir)
      .output()
      .map_err(|e| SuggestError::Git(format!("Failed to run git diff --name-only: {e}")))?;

   if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(SuggestError::Git(format!("git diff --name-only failed: {stderr}")));
   }

   Ok(String::from_utf8_lossy(&output.stdout)
      .split('\0')
      .filter(|s| !s.is_empty())
      .map(|s| s.to_string())
      .collect())
}

/// Unified diff of one file, working tree against the index
pub fn get_file_diff(dir: &Path, file: &str) -> Result<String> {
   let output = Command::new("git")
      .args(["diff", "--no-color", "--no-ext-diff", "--", file])
      .current_dir(dir)
      .output()
      .map_err(|e| SuggestError::Git(format!("Failed to run git diff for {file}: {e}")))?;

   if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(SuggestError::Git(format!("git diff failed for {file}: {stderr}")));
   }

   let diff = String::from_utf8_lossy(&output.stdout);
   Ok(diff.strip_suffix('\n').unwrap_or(&diff).to_string())
}

/// Collect the filtered diffs of every unstaged file, joined by newlines.
///
/// Returns an empty string when nothing is modified.
pub fn collect_unstaged_diffs(dir: &Path) -> Result<String> {
   let files = list_unstaged_files(dir)?;
   debug!(count = files.len(), "collecting unstaged diffs");

   let mut diffs = Vec::with_capacity(files.len());
   for file in &files {
      let diff = get_file_diff(dir, file)?;
      let filtered = filter_changed_lines(&diff);
      debug!(file = %file, raw_len = diff.len(), filtered_len = filtered.len(), "filtered diff");
      diffs.push(filtered);
   }

   Ok(diffs.join("\n"))
}
