//! HTTP request handlers organized by resource.

pub mod category;
pub mod health;
pub mod menu;
pub mod recommend;
pub mod upload;
