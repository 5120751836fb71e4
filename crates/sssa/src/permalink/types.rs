//! The shareable assessment result.

use serde::{Deserialize, Serialize};

use crate::summary::Assessments;

/// Format version stamped on new results.
pub const RESULT_VERSION: &str = "1.0";

/// How a decoded result's version field compares to what this build writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionStatus {
    Current,
    Unrecognized(String),
    Missing,
}

/// A snapshot of every rating, as carried in a permalink.
///
/// Wire shape: `{"version", "timestamp", "assessments": {category:
/// {skill: {axis: level}}}}`. Missing fields decode as empty so older or
/// hand-built tokens still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub assessments: Assessments,
}

impl AssessmentResult {
    /// Stamp a set of ratings with the current version and time.
    pub fn new(assessments: Assessments) -> Self {
        Self {
            version: RESULT_VERSION.to_string(),
            timestamp: crate::time::now_rfc3339(),
            assessments,
        }
    }

    pub fn version_status(&self) -> VersionStatus {
        match self.version.trim() {
            "" => VersionStatus::Missing,
            RESULT_VERSION => VersionStatus::Current,
            other => VersionStatus::Unrecognized(other.to_string()),
        }
    }

    /// A copy without skills that carry no entries, and without categories
    /// left empty by that.
    pub fn compacted(&self) -> Self {
        let assessments = self
            .assessments
            .iter()
            .filter_map(|(category, assessment)| {
                let mut kept = assessment.clone();
                kept.retain_non_empty();
                (!kept.is_empty()).then(|| (category.clone(), kept))
            })
            .collect();

        Self {
            version: self.version.clone(),
            timestamp: self.timestamp.clone(),
            assessments,
        }
    }

    /// True when compaction would not change anything.
    pub fn is_compact(&self) -> bool {
        self.assessments
            .values()
            .all(|a| !a.is_empty() && !a.has_empty_ratings())
    }
}
