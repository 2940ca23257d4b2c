//! Paper Diff library
//!
//! Lays out a line-level diff as two aligned, independently numbered columns
//! with per-kind statistics, and drives sequenced compare requests for a pair
//! of documents.

pub mod backend;
pub mod config;
pub mod constant;
pub mod logging;
pub mod messages;
pub mod render;
