//! Catalog — the read-only reference data every computation runs against.
//!
//! The catalog module provides:
//! - Normalized category labels
//! - Skills, evaluation axes, roles and forced-choice questions
//! - Per-skill level descriptors and recommended category groups
//! - Validation at construction time
//! - Lookup queries used by the scoring and summary engines

#[allow(clippy::module_inception)]
pub mod catalog;
pub mod types;

pub use catalog::Catalog;
pub use types::{
    normalize_category, Audience, CatalogDocument, Category, CategoryGroup, EvaluationAxis,
    Question, QuestionOption, Role, Skill, SkillLevel,
};
