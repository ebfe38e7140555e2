//! Business logic and repository trait definitions for menubot.
//!
//! This crate holds the conversational recommendation engine (session store,
//! prompt assembler, generation client, recommendation service) and defines
//! the "ports" (repository and storage traits) that the infrastructure layer
//! implements. It depends only on `menubot-types` -- never on
//! `menubot-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
pub mod recommend;
pub mod repository;
pub mod service;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
