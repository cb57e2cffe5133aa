//! # centralpain
//!
//! Library half of the centralpain binary: the CLI, the HTTP boundary and
//! configuration loading. The evaluation logic lives in `centralpain-core`.

pub mod api;
pub mod cli;
pub mod config;
