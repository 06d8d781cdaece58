//! Shared CLI utilities

pub mod casing;
pub mod config;
