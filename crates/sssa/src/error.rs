//! Error types for SSSA.
//!
//! Scoring and summarizing never fail; errors come from catalog
//! validation, result encoding and the on-disk store.

/// Error types covering catalog, codec and storage operations.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("Duplicate question id: {0}")]
    DuplicateQuestion(u32),

    #[error("Duplicate role number: {0}")]
    DuplicateRole(u32),

    #[error("Duplicate skill number: {0}")]
    DuplicateSkill(u32),

    #[error("Invalid weight {weight} for category '{category}' in question {question}")]
    InvalidWeight {
        question: u32,
        category: String,
        weight: f64,
    },

    #[error("Duplicate category group key: {0}")]
    DuplicateGroup(String),

    #[error("Empty category name on {0}")]
    EmptyCategory(String),

    #[error("Invalid max level: {0}")]
    InvalidMaxLevel(i64),

    #[error("Invalid catalog document: {0}")]
    InvalidCatalog(String),

    #[error("Level {level} out of range 0..={max}")]
    LevelOutOfRange { level: i64, max: i64 },

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, AssessmentError>;
