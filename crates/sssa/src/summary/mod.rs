//! Category summaries — skill ratings reduced to per-category aggregates.
//!
//! The summary module provides:
//! - Explicit rated/unrated axis states
//! - Per-skill and per-category rating containers
//! - Category summaries (average, counts, completion)
//! - Axis-level progress and top-category selection

pub mod engine;
pub mod types;

pub use types::{Assessments, AxisRating, CategoryAssessment, CategorySummary, SkillRating};

pub use engine::{
    axis_completion_rate, summarize, summarize_all, summarize_category, top_categories,
};
