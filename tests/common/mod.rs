//! Shared test utilities for integration tests.
//!
//! Not all helpers are used by every test file.
#![allow(dead_code, reason = "shared across test binaries")]

use std::{cell::RefCell, path::Path, process::Command, time::Duration};

use git_suggest::Sleeper;

/// Records requested delays instead of sleeping
#[derive(Default)]
pub struct RecordingSleeper {
   pub delays: RefCell<Vec<Duration>>,
}

impl Sleeper for RecordingSleeper {
   fn sleep(&self, duration: Duration) {
      self.delays.borrow_mut().push(duration);
   }
}

/// A scratch git repository with one committed file
pub struct TestRepo {
   pub dir: tempfile::TempDir,
}

impl TestRepo {
   pub fn new() -> Self {
      let dir = tempfile::tempdir().expect("Failed to create temp directory");
      let repo = Self { dir };
      repo.git(&["init", "-q"]);
      repo
   }

   /// Repository with `file` committed at `contents`
   pub fn with_committed(file: &str, contents: &str) -> Self {
      let repo = Self::new();
      repo.write(file, contents);
      repo.git(&["add", file]);
      repo.git(&["commit", "-q", "-m", "initial"]);
      repo
   }

   pub fn path(&self) -> &Path {
      self.dir.path()
   }

   pub fn write(&self, file: &str, contents: &str) {
      std::fs::write(self.path().join(file), contents).expect("Failed to write test file");
   }

   pub fn git(&self, args: &[&str]) {
      let output = Command::new("git")
         .args(["-c", "user.name=Test User", "-c", "user.email=test@example.com"])
         .args(["-c", "commit.gpgsign=false"])
         .args(args)
         .current_dir(self.path())
         .output()
         .expect("Failed to run git");
      assert!(
         output.status.success(),
         "git {args:?} failed: {}",
         String::from_utf8_lossy(&output.stderr)
      );
   }
}
