//! Quick-assessment progress — answers so far, discarded after 24 hours.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AssessmentError, Result};
use crate::quick::Answer;

use super::write_atomic;

const PROGRESS_FILE: &str = "quick-progress.json";

/// Saved progress older than this is dropped on load.
pub const PROGRESS_TTL_HOURS: f64 = 24.0;

/// An in-progress quick assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickProgress {
    pub answers: Vec<Answer>,
    pub current_question_index: usize,
    pub timestamp: String,
}

impl QuickProgress {
    /// Replace the answer to the same question, or append a new one.
    pub fn record(&mut self, answer: Answer) {
        match self
            .answers
            .iter_mut()
            .find(|a| a.question_id == answer.question_id)
        {
            Some(existing) => *existing = answer,
            None => self.answers.push(answer),
        }
    }

    /// Whether the progress was saved more than 24 hours before `now`.
    /// An unreadable timestamp counts as expired.
    pub fn is_expired(&self, now: &DateTime<Utc>) -> bool {
        match crate::time::parse_rfc3339(&self.timestamp) {
            Some(saved) => crate::time::hours_between(&saved, now) > PROGRESS_TTL_HOURS,
            None => true,
        }
    }
}

/// Filesystem-backed store for quick-assessment progress.
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self {
            path: base_dir.join(PROGRESS_FILE),
        })
    }

    /// Save answers and position, stamped with the current time.
    pub fn save(&self, answers: &[Answer], current_question_index: usize) -> Result<()> {
        self.write(&QuickProgress {
            answers: answers.to_vec(),
            current_question_index,
            timestamp: crate::time::now_rfc3339(),
        })
    }

    fn write(&self, progress: &QuickProgress) -> Result<()> {
        let json = serde_json::to_string_pretty(progress)
            .map_err(|e| AssessmentError::SerializationError(e.to_string()))?;
        write_atomic(&self.path, json.as_bytes())
    }

    /// Load saved progress, if any and not expired.
    pub fn load(&self) -> Option<QuickProgress> {
        self.load_at(&Utc::now())
    }

    /// Like [`load`](Self::load), evaluated at a given instant. Expired
    /// progress is deleted.
    pub fn load_at(&self, now: &DateTime<Utc>) -> Option<QuickProgress> {
        let bytes = std::fs::read(&self.path).ok()?;
        let progress: QuickProgress = match serde_json::from_slice(&bytes) {
            Ok(progress) => progress,
            Err(e) => {
                log::warn!("failed to parse {}: {e}", self.path.display());
                return None;
            }
        };

        if progress.is_expired(now) {
            log::debug!("discarding quick progress saved at {}", progress.timestamp);
            if let Err(e) = self.clear() {
                log::warn!("failed to clear expired progress: {e}");
            }
            return None;
        }

        Some(progress)
    }

    /// Record one answer on top of the saved progress and persist it.
    pub fn record_answer(&self, answer: Answer) -> Result<QuickProgress> {
        let mut progress = self.load().unwrap_or(QuickProgress {
            answers: Vec::new(),
            current_question_index: 0,
            timestamp: String::new(),
        });
        progress.record(answer);
        progress.current_question_index = progress.answers.len();
        progress.timestamp = crate::time::now_rfc3339();

        self.write(&progress)?;
        Ok(progress)
    }

    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
