//! CLI commands for grille

pub mod dispatch;
pub mod evaluate;
pub mod export;
pub mod render;
pub mod rubric;
pub mod summary;
