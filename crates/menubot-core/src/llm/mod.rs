//! Text-generation provider abstractions for menubot.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: object-safe wrapper for runtime provider selection
//! - `GenerationClient`: timeout-bounded prompt -> text calls with typed failures

pub mod box_provider;
pub mod client;
pub mod provider;
