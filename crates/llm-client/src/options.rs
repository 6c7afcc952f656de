//! Per-call completion options.

use std::time::Duration;

use crate::error::CompletionError;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Options sent with (and governing) a single completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    /// Model identifier, e.g. `gpt-3.5-turbo`.
    pub model: String,
    pub max_output_tokens: u32,
    /// Sampling temperature in `[0, 2]`.
    pub temperature: f32,
    /// Deadline for the whole upstream call.
    pub timeout: Duration,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CompletionOptions {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks the recognized fields; returns [`CompletionError::InvalidRequest`] on the first violation.
    pub fn validate(&self) -> Result<(), CompletionError> {
        if self.model.trim().is_empty() {
            return Err(CompletionError::InvalidRequest("model must not be empty".into()));
        }
        if self.max_output_tokens == 0 {
            return Err(CompletionError::InvalidRequest(
                "max_output_tokens must be positive".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(CompletionError::InvalidRequest(format!(
                "temperature must be in [0, 2], got {}",
                self.temperature
            )));
        }
        if self.timeout.is_zero() {
            return Err(CompletionError::InvalidRequest("timeout must be positive".into()));
        }
        Ok(())
    }
}
