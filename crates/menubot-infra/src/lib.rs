//! Infrastructure layer for menubot.
//!
//! Contains implementations of the ports defined in `menubot-core`:
//! SQLite repositories, the local-filesystem upload store, the
//! OpenAI-compatible generation provider, and configuration loading.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod sqlite;
