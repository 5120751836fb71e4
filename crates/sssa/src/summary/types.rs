//! Data structures for per-skill ratings and category summaries.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::Category;
use crate::error::{AssessmentError, Result};

// ---------------------------------------------------------------------------
// Axis rating
// ---------------------------------------------------------------------------

/// State of one axis of one skill.
///
/// `Rated(0)` is a real answer; only `Unrated` means "not yet rated".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRating {
    Rated(i64),
    Unrated,
}

impl AxisRating {
    pub fn level(self) -> Option<i64> {
        match self {
            AxisRating::Rated(level) => Some(level),
            AxisRating::Unrated => None,
        }
    }

    pub fn is_rated(self) -> bool {
        matches!(self, AxisRating::Rated(_))
    }
}

// ---------------------------------------------------------------------------
// Skill rating
// ---------------------------------------------------------------------------

/// Levels for one skill, keyed by axis number.
///
/// Entries are kept as read so a token produced elsewhere survives
/// decoding. `null`, fractional and non-numeric values are kept as empty
/// entries, and an entry only counts as rated when it is an integer in
/// `[0, max_level]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillRating(BTreeMap<u32, Option<i64>>);

impl<'de> Deserialize<'de> for SkillRating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<u32, serde_json::Value>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .map(|(axis, value)| (axis, integer_level(&value)))
                .collect(),
        ))
    }
}

/// An integral JSON number as a level; anything else is not a level.
fn integer_level(value: &serde_json::Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

impl SkillRating {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a level without range checking.
    pub fn set(&mut self, axis: u32, level: i64) {
        self.0.insert(axis, Some(level));
    }

    /// Store a level after checking it against `max_level`.
    pub fn rate(&mut self, axis: u32, level: i64, max_level: i64) -> Result<()> {
        if !(0..=max_level).contains(&level) {
            return Err(AssessmentError::LevelOutOfRange {
                level,
                max: max_level,
            });
        }
        self.set(axis, level);
        Ok(())
    }

    pub fn get(&self, axis: u32, max_level: i64) -> AxisRating {
        match self.0.get(&axis) {
            Some(Some(level)) if (0..=max_level).contains(level) => AxisRating::Rated(*level),
            _ => AxisRating::Unrated,
        }
    }

    /// Number of stored entries, valid or not.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Levels of the listed axes that are rated.
    pub fn rated_levels<'a>(
        &'a self,
        axes: &'a [u32],
        max_level: i64,
    ) -> impl Iterator<Item = i64> + 'a {
        axes.iter()
            .filter_map(move |axis| self.get(*axis, max_level).level())
    }

    /// True when every listed axis is rated. An empty axis list is never
    /// fully rated.
    pub fn is_fully_rated(&self, axes: &[u32], max_level: i64) -> bool {
        !axes.is_empty() && axes.iter().all(|a| self.get(*a, max_level).is_rated())
    }
}

impl FromIterator<(u32, i64)> for SkillRating {
    fn from_iter<I: IntoIterator<Item = (u32, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(axis, level)| (axis, Some(level))).collect())
    }
}

// ---------------------------------------------------------------------------
// Category assessment
// ---------------------------------------------------------------------------

/// Ratings for the skills of one category, keyed by skill number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryAssessment(BTreeMap<u32, SkillRating>);

impl CategoryAssessment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skill(&self, number: u32) -> Option<&SkillRating> {
        self.0.get(&number)
    }

    /// The rating for a skill, created empty if missing.
    pub fn skill_mut(&mut self, number: u32) -> &mut SkillRating {
        self.0.entry(number).or_default()
    }

    pub fn insert(&mut self, number: u32, rating: SkillRating) {
        self.0.insert(number, rating);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop skills that have no stored entries at all.
    pub fn retain_non_empty(&mut self) {
        self.0.retain(|_, rating| !rating.is_empty());
    }

    pub fn has_empty_ratings(&self) -> bool {
        self.0.values().any(SkillRating::is_empty)
    }
}

impl FromIterator<(u32, SkillRating)> for CategoryAssessment {
    fn from_iter<I: IntoIterator<Item = (u32, SkillRating)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Every category's ratings.
pub type Assessments = BTreeMap<Category, CategoryAssessment>;

// ---------------------------------------------------------------------------
// Category summary
// ---------------------------------------------------------------------------

/// Aggregate view of one category's ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    /// Mean over individual axis ratings; 0.0 when `assessed_skill_count` is 0.
    pub average_score: f64,
    pub skill_count: usize,
    /// Skills with at least one rated axis.
    pub assessed_skill_count: usize,
    /// Skills with every axis rated.
    pub fully_rated_skill_count: usize,
    /// `assessed_skill_count / skill_count` as a rounded percentage.
    pub completion_rate: u8,
}
