use std::{
   path::{Path, PathBuf},
   time::Duration,
};

use serde::Deserialize;

use crate::{
   api::RetryPolicy,
   error::{Result, SuggestError},
};

/// Model served by the default local completion endpoint
pub const DEFAULT_MODEL: &str = "TheBloke/Llama-2-7B-Chat-GGUF";

/// OpenAI-compatible text completion endpoint
pub const DEFAULT_API_URL: &str = "http://localhost:8080/v1/completions";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
   /// Full URL of the completion endpoint (overridden by `GIT_SUGGEST_API_URL`)
   pub api_url: String,

   /// Optional static API key, sent as a bearer token (overridden by
   /// `GIT_SUGGEST_API_KEY`)
   pub api_key: Option<String>,

   /// Model identifier sent with every request (overridden by
   /// `GIT_SUGGEST_MODEL`)
   pub model: String,

   pub max_tokens:  u32,
   pub temperature: f32,

   /// Total number of request attempts, including the first
   pub max_retries:        u32,
   /// Delay before the second attempt; doubles for each later one
   pub initial_backoff_ms: u64,

   /// Retry 4xx responses like any other failure
   pub retry_client_errors: bool,

   /// HTTP request timeout in seconds (unbounded when unset)
   pub request_timeout_secs: Option<u64>,

   /// HTTP connection timeout in seconds (unbounded when unset)
   pub connect_timeout_secs: Option<u64>,
}

impl Default for SuggestConfig {
   fn default() -> Self {
      Self {
         api_url:              DEFAULT_API_URL.to_string(),
         api_key:              None,
         model:                DEFAULT_MODEL.to_string(),
         max_tokens:           300,
         temperature:          0.7,
         max_retries:          3,
         initial_backoff_ms:   1000,
         retry_client_errors:  true,
         request_timeout_secs: None,
         connect_timeout_secs: None,
      }
   }
}

impl SuggestConfig {
   /// Load config from `GIT_SUGGEST_CONFIG` or the default location
   /// (~/.config/git-suggest/config.toml)
   ///
   /// Falls back to Default if the file doesn't exist. Environment variables
   /// override file values.
   pub fn load() -> Result<Self> {
      let config_path = if let Ok(custom_path) = std::env::var("GIT_SUGGEST_CONFIG") {
         PathBuf::from(custom_path)
      } else {
         Self::default_config_path().unwrap_or_default()
      };

      if config_path.is_file() {
         return Self::from_file(&config_path);
      }

      let mut config = Self::default();
      config.apply_env_overrides();
      Ok(config)
   }

   /// Load config from specific file
   pub fn from_file(path: &Path) -> Result<Self> {
      let contents = std::fs::read_to_string(path).map_err(|e| {
         SuggestError::Config(format!("Failed to read config {}: {e}", path.display()))
      })?;
      let mut config = Self::from_toml(&contents)?;
      config.apply_env_overrides();
      Ok(config)
   }

   /// Parse config from TOML text without applying overrides
   pub fn from_toml(contents: &str) -> Result<Self> {
      toml::from_str(contents)
         .map_err(|e| SuggestError::Config(format!("Failed to parse config: {e}")))
   }

   fn apply_env_overrides(&mut self) {
      if let Ok(api_url) = std::env::var("GIT_SUGGEST_API_URL") {
         self.api_url = api_url;
      }

      if let Ok(api_key) = std::env::var("GIT_SUGGEST_API_KEY") {
         self.api_key = Some(api_key);
      }

      if let Ok(model) = std::env::var("GIT_SUGGEST_MODEL") {
         self.model = model;
      }
   }

   /// Tries HOME (Unix/Linux/macOS) then USERPROFILE (Windows)
   pub fn default_config_path() -> Result<PathBuf> {
      for var in ["HOME", "USERPROFILE"] {
         if let Ok(home) = std::env::var(var) {
            return Ok(PathBuf::from(home).join(".config/git-suggest/config.toml"));
         }
      }

      Err(SuggestError::Config(
         "No home directory found (tried HOME and USERPROFILE)".to_string(),
      ))
   }

   pub const fn retry_policy(&self) -> RetryPolicy {
      RetryPolicy {
         max_retries:         self.max_retries,
         base_delay:          Duration::from_millis(self.initial_backoff_ms),
         retry_client_errors: self.retry_client_errors,
      }
   }
}
