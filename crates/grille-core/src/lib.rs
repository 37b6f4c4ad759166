//! Grille Core Library
//!
//! Rubric parsing, score aggregation and result export for the Grille
//! grading CLI.

pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod logging;
pub mod rubric;
pub mod session;
pub mod sheet;
pub mod summary;
