//! Quick assessment — forced-choice answers ranked into role suggestions.
//!
//! The quick module provides:
//! - Answer and choice types
//! - Fractional weights and exposure over the question bank
//! - Exposure-corrected category scoring and role ranking
//! - The comma-separated quick-result token

pub mod engine;
pub mod token;
pub mod types;

pub use types::{Answer, Choice, QuickAssessmentResult, RankedRole};

pub use engine::{
    exposure, fractional_weights, score, CategoryScores, QuickScoreEngine, TOP_ROLE_COUNT,
};

pub use token::{decode_quick_token, encode_quick_token, resolve_quick_roles};
