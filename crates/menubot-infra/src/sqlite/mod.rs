//! SQLite storage: pool setup and repository implementations.

pub mod category;
pub mod menu;
pub mod pool;
