//! Maps upstream errors to [`CompletionError`].
//!
//! Order of evidence: structured error code, then error type, then HTTP status, then keyword
//! matching on the message text. Keywords are only consulted when the upstream gave no code.

use openai_client::OpenAIError;

use crate::error::CompletionError;

const AUTH_CODES: &[&str] = &[
    "invalid_api_key",
    "invalid_authentication",
    "unauthorized",
    "authentication_error",
    "permission_denied",
];
const RATE_CODES: &[&str] = &[
    "rate_limit_exceeded",
    "insufficient_quota",
    "rate_limit_error",
    "quota_exceeded",
];
const AUTH_TYPES: &[&str] = &["authentication_error", "permission_error", "unauthorized"];
const RATE_TYPES: &[&str] = &[
    "insufficient_quota",
    "rate_limit_error",
    "rate_limit_exceeded",
    "requests",
    "tokens",
];

/// Classifies an async-openai error.
pub fn classify_openai_error(err: &OpenAIError) -> CompletionError {
    match err {
        OpenAIError::ApiError(api) => {
            classify_api_error(api.code.as_deref(), api.r#type.as_deref(), &api.message)
        }
        OpenAIError::Reqwest(e) => {
            if e.is_timeout() {
                return CompletionError::Timeout;
            }
            if let Some(status) = e.status() {
                return classify_status(status.as_u16(), &e.to_string());
            }
            if e.is_connect() {
                return CompletionError::Upstream(format!("connection error: {}", e));
            }
            classify_message(&e.to_string())
        }
        other => classify_message(&other.to_string()),
    }
}

/// Classifies an API error body (`{"error": {"message", "type", "code"}}`).
pub fn classify_api_error(code: Option<&str>, kind: Option<&str>, message: &str) -> CompletionError {
    if let Some(code) = code {
        if AUTH_CODES.contains(&code) {
            return CompletionError::AuthFailure(message.to_string());
        }
        if RATE_CODES.contains(&code) {
            return CompletionError::RateLimited(message.to_string());
        }
    }
    if let Some(kind) = kind {
        if AUTH_TYPES.contains(&kind) {
            return CompletionError::AuthFailure(message.to_string());
        }
        if RATE_TYPES.contains(&kind) {
            return CompletionError::RateLimited(message.to_string());
        }
    }
    if code.is_some() {
        return CompletionError::Upstream(message.to_string());
    }
    classify_message(message)
}

/// Classifies an HTTP status code from the upstream response.
pub fn classify_status(status: u16, message: &str) -> CompletionError {
    match status {
        401 | 403 => CompletionError::AuthFailure(message.to_string()),
        429 => CompletionError::RateLimited(message.to_string()),
        408 | 504 => CompletionError::Timeout,
        _ => CompletionError::Upstream(message.to_string()),
    }
}

/// Keyword fallback for unstructured error text.
pub fn classify_message(message: &str) -> CompletionError {
    let lower = message.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if has(&["rate limit", "rate_limit", "ratelimit", "too many requests", "quota", "429"]) {
        CompletionError::RateLimited(message.to_string())
    } else if has(&["unauthorized", "auth", "api key", "api_key", "401"]) {
        CompletionError::AuthFailure(message.to_string())
    } else if has(&["timeout", "timed out"]) {
        CompletionError::Timeout
    } else {
        CompletionError::Upstream(message.to_string())
    }
}
