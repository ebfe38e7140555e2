//! Storage traits for uploaded menu assets.

pub mod upload_store;
