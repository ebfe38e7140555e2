//! Service layer orchestrating repositories and storage for the menu
//! management endpoints.

pub mod category;
pub mod menu;
