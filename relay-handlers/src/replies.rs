//! Fixed user-facing texts.

use llm_client::FailureKind;

/// Label of the quick-reply button that starts a fresh dialogue.
pub const NEW_REQUEST_LABEL: &str = "New request";

pub const WELCOME: &str =
    "Hi! I'm a ChatGPT bot. Send me a message and I'll answer it with ChatGPT.";

pub const HELP: &str = "Available commands:\n\
/start - start a new dialogue (clears the history)\n\
/reset - clear the dialogue history\n\
/help - show this help\n\
\n\
Just send me any text message and I'll answer it with ChatGPT!";

pub const UNKNOWN_COMMAND: &str = "Unknown command. Send /help to see what I can do.";

pub const RESET_CONFIRMATION: &str =
    "Dialogue context cleared! I'm listening to your new request.";

pub const RATE_LIMITED: &str = "Request limit exceeded, please try again later.";
pub const AUTH_FAILURE: &str = "Authentication error with the language model service.";
pub const TIMEOUT: &str = "The request timed out, please try again.";
pub const UPSTREAM_ERROR: &str = "Something went wrong, please try again.";

/// Text sent to the user when a completion fails with `kind`.
pub fn user_message(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::RateLimited => RATE_LIMITED,
        FailureKind::AuthFailure => AUTH_FAILURE,
        FailureKind::Timeout => TIMEOUT,
        FailureKind::UpstreamError => UPSTREAM_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_kind_has_distinct_text() {
        let texts = [
            user_message(FailureKind::RateLimited),
            user_message(FailureKind::AuthFailure),
            user_message(FailureKind::Timeout),
            user_message(FailureKind::UpstreamError),
        ];
        for (i, a) in texts.iter().enumerate() {
            for b in texts.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert_eq!(
            user_message(FailureKind::RateLimited),
            "Request limit exceeded, please try again later."
        );
    }
}
