//! Storage layer for ratings and quick-assessment progress.
//!
//! Both stores keep a single JSON document under a base directory:
//!
//! ```text
//! ~/.sssa/
//! ├── assessments.json     # ratings by category
//! └── quick-progress.json  # in-progress quick assessment
//! ```
//!
//! # Modules
//!
//! - [`ratings_store`] — read/update ratings per category.
//! - [`progress_store`] — quick-assessment answers with a 24-hour lifetime.

pub mod progress_store;
pub mod ratings_store;

use std::path::Path;

use crate::error::Result;

pub use progress_store::{ProgressStore, QuickProgress, PROGRESS_TTL_HOURS};
pub use ratings_store::{AssessmentData, RatingsStore};

/// Write via a sibling temp file and rename, so readers never see a
/// partial document.
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, data)?;
    std::fs::rename(&tmp_path, path)?;

    Ok(())
}
