//! Ratings persistence — the user's skill ratings, keyed by category.
//!
//! File format:
//! ```json
//! {
//!     "assessments": { "<category>": { "<skill>": { "<axis>": 3 } } },
//!     "last_updated": "2024-03-01T09:00:00+00:00"
//! }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::error::{AssessmentError, Result};
use crate::summary::{Assessments, CategoryAssessment};

use super::write_atomic;

const RATINGS_FILE: &str = "assessments.json";

/// Everything the user has rated so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentData {
    #[serde(default)]
    pub assessments: Assessments,
    #[serde(default)]
    pub last_updated: String,
}

impl AssessmentData {
    pub fn empty() -> Self {
        Self {
            assessments: Assessments::new(),
            last_updated: crate::time::now_rfc3339(),
        }
    }
}

/// Filesystem-backed store for ratings.
///
/// Safe for single-process use; concurrent writers are not coordinated.
pub struct RatingsStore {
    path: PathBuf,
}

impl RatingsStore {
    /// Create a store rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self {
            path: base_dir.join(RATINGS_FILE),
        })
    }

    /// Load all ratings for display.
    ///
    /// A missing file yields empty data. So does an unreadable or corrupt
    /// one, after a warning. Writers go through [`RatingsStore::try_load`]
    /// instead so they never overwrite a file they could not read.
    pub fn load(&self) -> AssessmentData {
        self.try_load().unwrap_or_else(|e| {
            log::warn!("ignoring {}: {e}", self.path.display());
            AssessmentData::empty()
        })
    }

    /// Load all ratings, failing on anything but a missing file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file exists but cannot be read, or
    /// `AssessmentError::SerializationError` if it is not valid ratings JSON.
    pub fn try_load(&self) -> Result<AssessmentData> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AssessmentData::empty())
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            AssessmentError::SerializationError(format!(
                "failed to parse {}: {e}",
                self.path.display()
            ))
        })
    }

    /// Persist all ratings, refreshing `last_updated`.
    pub fn save(&self, data: &mut AssessmentData) -> Result<()> {
        data.last_updated = crate::time::now_rfc3339();
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| AssessmentError::SerializationError(e.to_string()))?;
        write_atomic(&self.path, json.as_bytes())
    }

    /// Ratings for one category, empty if none.
    pub fn category(&self, category: &Category) -> CategoryAssessment {
        self.load()
            .assessments
            .remove(category)
            .unwrap_or_default()
    }

    /// Rate one axis of one skill.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::LevelOutOfRange` if `level` is outside
    /// `[0, max_level]`, or the [`RatingsStore::try_load`] error when the
    /// existing file cannot be read. The file is left untouched in both
    /// cases.
    pub fn set_axis(
        &self,
        category: &Category,
        skill: u32,
        axis: u32,
        level: i64,
        max_level: i64,
    ) -> Result<()> {
        let mut data = self.try_load()?;
        data.assessments
            .entry(category.clone())
            .or_default()
            .skill_mut(skill)
            .rate(axis, level, max_level)?;
        self.save(&mut data)
    }

    pub fn clear_category(&self, category: &Category) -> Result<()> {
        let mut data = self.try_load()?;
        data.assessments.remove(category);
        self.save(&mut data)
    }

    /// Delete every rating. A missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
