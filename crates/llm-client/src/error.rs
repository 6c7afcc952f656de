//! Completion failure taxonomy. Upstream errors are mapped into [`CompletionError`] exactly once,
//! at the client boundary; nothing downstream inspects raw transport errors.

use std::fmt;
use thiserror::Error;

/// Failure of a completion call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// Credentials rejected by the upstream service.
    #[error("authentication failed: {0}")]
    AuthFailure(String),

    /// Upstream throttling or exhausted quota.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// No response within the deadline (gateway timeout or transport timeout).
    #[error("completion timed out")]
    Timeout,

    /// Any other failure reported by the service or the transport.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The service answered successfully but without content.
    #[error("empty reply from completion service")]
    EmptyReply,

    /// The request was rejected before being sent (e.g. history does not end with a user turn).
    #[error("invalid completion request: {0}")]
    InvalidRequest(String),
}

/// User-facing failure category. Selects the fixed error text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    AuthFailure,
    RateLimited,
    Timeout,
    UpstreamError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::AuthFailure => "auth_failure",
            FailureKind::RateLimited => "rate_limited",
            FailureKind::Timeout => "timeout",
            FailureKind::UpstreamError => "upstream_error",
        };
        f.write_str(s)
    }
}

impl CompletionError {
    /// Failure kind surfaced to the user; `None` for [`CompletionError::EmptyReply`], which is a
    /// soft failure substituted by the gateway.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            CompletionError::AuthFailure(_) => Some(FailureKind::AuthFailure),
            CompletionError::RateLimited(_) => Some(FailureKind::RateLimited),
            CompletionError::Timeout => Some(FailureKind::Timeout),
            CompletionError::Upstream(_) | CompletionError::InvalidRequest(_) => {
                Some(FailureKind::UpstreamError)
            }
            CompletionError::EmptyReply => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            CompletionError::AuthFailure("x".into()).kind(),
            Some(FailureKind::AuthFailure)
        );
        assert_eq!(
            CompletionError::RateLimited("x".into()).kind(),
            Some(FailureKind::RateLimited)
        );
        assert_eq!(CompletionError::Timeout.kind(), Some(FailureKind::Timeout));
        assert_eq!(
            CompletionError::Upstream("x".into()).kind(),
            Some(FailureKind::UpstreamError)
        );
        assert_eq!(
            CompletionError::InvalidRequest("x".into()).kind(),
            Some(FailureKind::UpstreamError)
        );
        assert_eq!(CompletionError::EmptyReply.kind(), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FailureKind::RateLimited.to_string(), "rate_limited");
        assert_eq!(FailureKind::UpstreamError.to_string(), "upstream_error");
    }
}
