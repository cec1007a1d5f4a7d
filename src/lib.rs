//! Hiring dashboard data layer.
//!
//! The desktop app in `main.rs` is a view over [`data`]: it prepares a
//! spreadsheet once through [`data::load_cached`] and redraws filtered
//! summaries every frame.

pub mod data;
pub mod settings;
