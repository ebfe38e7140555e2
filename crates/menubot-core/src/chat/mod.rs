//! Conversation state and prompt rendering for the recommendation chat.
//!
//! - `session_store`: per-key, append-only turn history
//! - `eviction`: pluggable retention policies for the session store
//! - `prompt`: pure rendering of history + message + menu into prompt text

pub mod eviction;
pub mod prompt;
pub mod session_store;
