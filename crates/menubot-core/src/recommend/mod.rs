//! Conversational dish recommendation.

pub mod service;
