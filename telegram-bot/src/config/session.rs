//! Session config: per-user history limit.

use anyhow::Result;
use session_store::DEFAULT_MAX_HISTORY;
use std::env;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HISTORY_LIMIT: max messages kept per user (user and assistant turns together).
    pub history_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_MAX_HISTORY,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self> {
        let history_limit = match env::var("HISTORY_LIMIT") {
            Ok(s) => s
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("HISTORY_LIMIT must be a positive integer: {}", s))?,
            Err(_) => DEFAULT_MAX_HISTORY,
        };
        Ok(Self { history_limit })
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_limit == 0 {
            anyhow::bail!("HISTORY_LIMIT must be at least 1");
        }
        Ok(())
    }
}
