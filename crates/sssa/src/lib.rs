//! SSSA — skill self-assessment scoring and result encoding.
//!
//! Turns forced-choice answers into ranked role suggestions, reduces
//! per-skill ratings into category summaries, and packs an assessment
//! into a compact URL-safe token that can be shared without a server.

pub mod catalog;
pub mod error;
pub mod permalink;
pub mod quick;
pub mod recommend;
pub mod storage;
pub mod summary;
pub mod time;

// Re-export primary types
pub use catalog::{
    Audience, Catalog, CatalogDocument, Category, CategoryGroup, EvaluationAxis, Question,
    QuestionOption, Role, Skill, SkillLevel,
};
pub use error::{AssessmentError, Result};

// Re-export quick assessment types
pub use quick::{
    decode_quick_token, encode_quick_token, Answer, Choice, QuickAssessmentResult,
    QuickScoreEngine, RankedRole,
};

// Re-export recommendation types
pub use recommend::{ScienceType, UserType};

// Re-export summary types
pub use summary::{AxisRating, CategoryAssessment, CategorySummary, SkillRating};

// Re-export permalink types
pub use permalink::{AssessmentResult, ResultCodec, VersionStatus, RESULT_VERSION};
