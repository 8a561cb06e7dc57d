use std::{thread, time::Duration};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
   config::SuggestConfig,
   error::{GenerationError, Result},
   prompt::build_prompt,
};

/// How many times to attempt a completion and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
   /// Total attempts, including the first
   pub max_retries:         u32,
   pub base_delay:          Duration,
   pub retry_client_errors: bool,
}

impl Default for RetryPolicy {
   fn default() -> Self {
      Self { max_retries: 3, base_delay: Duration::from_secs(1), retry_client_errors: true }
   }
}

impl RetryPolicy {
   /// Delay after the zero-based `attempt` failed: `base_delay * 2^attempt`
   pub fn delay_for(&self, attempt: u32) -> Duration {
      let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
      self.base_delay.saturating_mul(factor)
   }
}

/// Blocks between attempts
pub trait Sleeper {
   fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
   fn sleep(&self, duration: Duration) {
      thread::sleep(duration);
   }
}

/// A completion backend performing a single attempt per call
pub trait LlmBackend {
   fn complete(&self, prompt: &str) -> std::result::Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
   model:       &'a str,
   prompt:      &'a str,
   max_tokens:  u32,
   temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct Choice {
   #[serde(default)]
   text: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
   #[serde(default = "default_choices")]
   choices: Vec<Choice>,
}

fn default_choices() -> Vec<Choice> {
   vec![Choice::default()]
}

/// Extract the trimmed text of the first choice from a completion body.
///
/// A missing `choices` key or `text` field reads as empty text; an empty
/// `choices` array is malformed.
fn parse_completion(body: &str) -> std::result::Result<String, GenerationError> {
   let value: serde_json::Value = serde_json::from_str(body).map_err(GenerationError::InvalidJson)?;
   let response: CompletionResponse = serde_json::from_value(value)
      .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

   let first = response.choices.into_iter().next().ok_or_else(|| {
      GenerationError::MalformedResponse("response contains no choices".to_string())
   })?;

   Ok(first.text.trim().to_string())
}

/// Blocking client for an OpenAI-compatible `/v1/completions` endpoint
#[derive(Debug)]
pub struct RemoteBackend {
   client:      reqwest::blocking::Client,
   api_url:     String,
   api_key:     Option<String>,
   model:       String,
   max_tokens:  u32,
   temperature: f32,
}

impl RemoteBackend {
   pub fn new(config: &SuggestConfig) -> Result<Self> {
      let client = reqwest::blocking::Client::builder()
         .timeout(config.request_timeout_secs.map(Duration::from_secs))
         .connect_timeout(config.connect_timeout_secs.map(Duration::from_secs))
         .build()?;

      Ok(Self {
         client,
         api_url: config.api_url.clone(),
         api_key: config.api_key.clone(),
         model: config.model.clone(),
         max_tokens: config.max_tokens,
         temperature: config.temperature,
      })
   }
}

impl LlmBackend for RemoteBackend {
   fn complete(&self, prompt: &str) -> std::result::Result<String, GenerationError> {
      let request = CompletionRequest {
         model: &self.model,
         prompt,
         max_tokens: self.max_tokens,
         temperature: self.temperature,
      };
      debug!(
         url = %self.api_url,
         model = %self.model,
         prompt_len = prompt.len(),
         "sending completion request"
      );

      let mut request_builder = self
         .client
         .post(&self.api_url)
         .header(CONTENT_TYPE, "application/json");

      if let Some(ref api_key) = self.api_key {
         request_builder = request_builder.header(AUTHORIZATION, format!("Bearer {api_key}"));
      }

      let response = request_builder
         .json(&request)
         .send()
         .map_err(GenerationError::Transport)?;

      let status = response.status();
      let body = response.text().map_err(GenerationError::Transport)?;

      if !status.is_success() {
         return Err(GenerationError::Status {
            status: status.as_u16(),
            body:   body.chars().take(200).collect(),
         });
      }

      parse_completion(&body)
   }
}

/// Run `f` up to `policy.max_retries` times with exponential backoff.
///
/// Sleeps `base_delay * 2^i` after failed attempt `i` only when another
/// attempt follows. Exhausting every attempt yields `Ok(None)`; an error that
/// is not retryable is returned immediately.
pub fn retry_with_backoff<T, F>(
   policy: &RetryPolicy,
   sleeper: &dyn Sleeper,
   mut f: F,
) -> std::result::Result<Option<T>, GenerationError>
where
   F: FnMut() -> std::result::Result<T, GenerationError>,
{
   for attempt in 0..policy.max_retries {
      match f() {
         Ok(value) => return Ok(Some(value)),
         Err(e) => {
            warn!("Attempt {} failed: {e}", attempt + 1);

            if !e.is_retryable(policy.retry_client_errors) {
               return Err(e);
            }

            if attempt + 1 < policy.max_retries {
               let delay = policy.delay_for(attempt);
               debug!("Retry {}/{} after {}ms", attempt + 1, policy.max_retries, delay.as_millis());
               sleeper.sleep(delay);
            }
         },
      }
   }

   Ok(None)
}

/// Ask the backend for a commit message describing `diffs`.
///
/// `Ok(None)` means every attempt failed.
pub fn generate_commit_message(
   backend: &dyn LlmBackend,
   policy: &RetryPolicy,
   sleeper: &dyn Sleeper,
   diffs: &str,
) -> std::result::Result<Option<String>, GenerationError> {
   let prompt = build_prompt(diffs);
   retry_with_backoff(policy, sleeper, || backend.complete(&prompt))
}
