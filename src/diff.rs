//! Diff preprocessing applied before text reaches the model

/// Keep only lines starting with `+` or `-`, in their original order.
///
/// The test is a literal prefix check, so the `--- a/file` and `+++ b/file`
/// markers survive alongside the changed lines while `diff --git`, `index`
/// and `@@` hunk headers and context lines are dropped.
pub fn filter_changed_lines(diff: &str) -> String {
   diff
      .split('\n')
      .filter(|line| line.starts_with('+') || line.starts_with('-'))
      .collect::<Vec<_>>()
      .join("\n")
}
