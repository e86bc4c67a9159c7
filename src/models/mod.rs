//! Data models for the menuboard backend.
//!
//! Field names serialize in camelCase to match the display and ordering clients.

mod display_config;
mod menu;
mod mobile;

pub use display_config::*;
pub use menu::*;
pub use mobile::*;
