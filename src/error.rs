use thiserror::Error;

/// Failure of a single completion attempt.
#[derive(Debug, Error)]
pub enum GenerationError {
   #[error("request to completion endpoint failed: {0}")]
   Transport(#[source] reqwest::Error),

   #[error("completion endpoint returned HTTP {status}: {body}")]
   Status { status: u16, body: String },

   #[error("completion endpoint returned a body that is not JSON: {0}")]
   InvalidJson(#[source] serde_json::Error),

   #[error("unexpected completion response shape: {0}")]
   MalformedResponse(String),
}

impl GenerationError {
   /// Whether another attempt may succeed.
   ///
   /// Client errors (4xx) are retryable only when `retry_client_errors` is set.
   pub const fn is_retryable(&self, retry_client_errors: bool) -> bool {
      match self {
         Self::Transport(_) | Self::InvalidJson(_) => true,
         Self::Status { status, .. } => retry_client_errors || !(*status >= 400 && *status < 500),
         Self::MalformedResponse(_) => false,
      }
   }
}

#[derive(Debug, Error)]
pub enum SuggestError {
   #[error("Git command failed: {0}")]
   Git(String),

   #[error(transparent)]
   Generation(#[from] GenerationError),

   #[error("Configuration error: {0}")]
   Config(String),

   #[error("IO error: {0}")]
   Io(#[from] std::io::Error),

   #[error("JSON error: {0}")]
   Json(#[from] serde_json::Error),

   #[error("HTTP client error: {0}")]
   Http(#[from] reqwest::Error),

   #[error("Clipboard error: {0}")]
   Clipboard(#[from] arboard::Error),
}

pub type Result<T> = std::result::Result<T, SuggestError>;
