//! Shared domain types for menubot.
//!
//! Menu items, categories, conversation turns, LLM request shapes,
//! configuration and the error types shared across crates.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod menu;
