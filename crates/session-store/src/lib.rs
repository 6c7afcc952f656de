//! # Session store
//!
//! In-memory, per-user conversation histories for the relay.
//!
//! ## Session
//!
//! A [`Session`] is a bounded FIFO of [`ChatMessage`]s: appending beyond the capacity evicts the
//! oldest messages first, so a session is always the most recent suffix of the user's dialogue.
//!
//! ## SessionStore
//!
//! [`SessionStore`] maps user ids to sessions.
//!
//! - Sessions are created lazily on the first append, or explicitly (empty) by `reset`.
//! - `clear` removes a session; a missing session reads as empty.
//! - Nothing is evicted by time or total size, and nothing survives a restart.
//!
//! ## Example
//!
//! ```rust
//! use prompt::MessageRole;
//! use session_store::SessionStore;
//!
//! let store = SessionStore::new(10);
//! store.append(42, MessageRole::User, "Hello");
//! store.append(42, MessageRole::Assistant, "Hi");
//! assert_eq!(store.size(42), 2);
//! store.reset(42);
//! assert!(store.snapshot(42).is_empty());
//! ```
//!
//! ## Thread Safety
//!
//! The store wraps a `DashMap` in an `Arc`: every operation locks only the shard holding the
//! user's key, so users on different shards never wait on each other. Clones share state.

mod session;
mod store;

pub use prompt::{ChatMessage, MessageRole};
pub use session::Session;
pub use store::{SessionStore, UserId, DEFAULT_MAX_HISTORY};
