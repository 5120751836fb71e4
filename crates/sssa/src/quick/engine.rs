//! Quick score engine — forced-choice answers to ranked roles.
//!
//! Scoring runs in four passes:
//! 1. every option's raw weights become fractional weights summing to 1.0,
//! 2. exposure per category is summed over both options of every question,
//! 3. answered options add their fractional weights scaled by
//!    `max_exposure / exposure(category)` (neutral adds half of each side),
//! 4. each category score is split equally across the roles in it.

use std::collections::{BTreeMap, HashMap};

use crate::catalog::{Catalog, Category, Question, QuestionOption, Role};

use super::types::*;

/// Number of roles a quick assessment reports.
pub const TOP_ROLE_COUNT: usize = 3;

/// Category-keyed numeric map used for weights, exposure and scores.
pub type CategoryScores = BTreeMap<Category, f64>;

// ---------------------------------------------------------------------------
// Weight normalization
// ---------------------------------------------------------------------------

/// Normalize an option's raw weights so they sum to 1.0.
///
/// An option without any positive weight contributes nothing.
pub fn fractional_weights(option: &QuestionOption) -> CategoryScores {
    let total: f64 = option.weights.values().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return CategoryScores::new();
    }
    option
        .weights
        .iter()
        .filter(|(_, w)| **w > 0.0)
        .map(|(category, w)| (category.clone(), w / total))
        .collect()
}

/// Total fractional weight each category receives across the question bank.
pub fn exposure(questions: &[Question]) -> CategoryScores {
    let mut exposure = CategoryScores::new();
    for question in questions {
        for option in [&question.left, &question.right] {
            for (category, w) in fractional_weights(option) {
                *exposure.entry(category).or_insert(0.0) += w;
            }
        }
    }
    exposure
}

fn exposure_corrected(
    fractional: CategoryScores,
    exposure: &CategoryScores,
    max_exposure: f64,
) -> CategoryScores {
    fractional
        .into_iter()
        .map(|(category, w)| {
            let factor = match exposure.get(&category) {
                Some(e) if *e > 0.0 => max_exposure / e,
                _ => 1.0,
            };
            (category, w * factor)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct CorrectedQuestion {
    left: CategoryScores,
    right: CategoryScores,
}

/// Precomputed scoring state for one question bank and role list.
///
/// Construction does the answer-independent work once, so the engine can
/// be reused to re-score after every answer.
#[derive(Debug, Clone)]
pub struct QuickScoreEngine<'a> {
    roles: &'a [Role],
    questions: HashMap<u32, CorrectedQuestion>,
    exposure: CategoryScores,
    max_exposure: f64,
}

impl<'a> QuickScoreEngine<'a> {
    pub fn new(questions: &[Question], roles: &'a [Role]) -> Self {
        let exposure = exposure(questions);
        let max_exposure = exposure
            .values()
            .copied()
            .fold(None, |acc: Option<f64>, e| Some(acc.map_or(e, |m| m.max(e))))
            .unwrap_or(1.0);

        let questions = questions
            .iter()
            .map(|q| {
                let corrected = CorrectedQuestion {
                    left: exposure_corrected(
                        fractional_weights(&q.left),
                        &exposure,
                        max_exposure,
                    ),
                    right: exposure_corrected(
                        fractional_weights(&q.right),
                        &exposure,
                        max_exposure,
                    ),
                };
                (q.id, corrected)
            })
            .collect();

        Self {
            roles,
            questions,
            exposure,
            max_exposure,
        }
    }

    pub fn from_catalog(catalog: &'a Catalog) -> Self {
        Self::new(catalog.questions(), catalog.roles())
    }

    pub fn exposure(&self) -> &CategoryScores {
        &self.exposure
    }

    pub fn max_exposure(&self) -> f64 {
        self.max_exposure
    }

    /// Accumulate exposure-corrected category scores for a set of answers.
    ///
    /// Answers naming unknown questions are skipped. When a question is
    /// answered more than once, only the last answer counts.
    pub fn category_scores(&self, answers: &[Answer]) -> CategoryScores {
        let mut last_index = HashMap::new();
        for (i, answer) in answers.iter().enumerate() {
            last_index.insert(answer.question_id, i);
        }

        let mut scores = CategoryScores::new();
        for (i, answer) in answers.iter().enumerate() {
            if last_index.get(&answer.question_id) != Some(&i) {
                continue;
            }
            let Some(question) = self.questions.get(&answer.question_id) else {
                log::debug!("skipping answer to unknown question {}", answer.question_id);
                continue;
            };

            match answer.choice {
                Choice::Left => add_scaled(&mut scores, &question.left, 1.0),
                Choice::Right => add_scaled(&mut scores, &question.right, 1.0),
                Choice::Neutral => {
                    add_scaled(&mut scores, &question.left, 0.5);
                    add_scaled(&mut scores, &question.right, 0.5);
                }
            }
        }
        scores
    }

    /// Rank roles for a set of answers, returning at most three.
    ///
    /// Ties keep the order roles have in the catalog.
    pub fn score(&self, answers: &[Answer]) -> Vec<RankedRole> {
        let category_scores = self.category_scores(answers);

        let mut roles_per_category: HashMap<&Category, usize> = HashMap::new();
        for role in self.roles {
            *roles_per_category.entry(&role.category).or_insert(0) += 1;
        }

        let mut scored: Vec<(&Role, f64)> = self
            .roles
            .iter()
            .map(|role| {
                let category_score = category_scores.get(&role.category).copied().unwrap_or(0.0);
                let share = roles_per_category.get(&role.category).copied().unwrap_or(1);
                (role, category_score / share as f64)
            })
            .filter(|(_, score)| *score > 0.0)
            .collect();

        // `sort_by` is stable, so equal scores keep catalog order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(TOP_ROLE_COUNT);

        let Some(top) = scored.first().map(|(_, s)| *s) else {
            return Vec::new();
        };

        scored
            .into_iter()
            .map(|(role, score)| RankedRole {
                role: role.clone(),
                score,
                percentage: percentage_of(score, top),
            })
            .collect()
    }

    /// Score the answers and stamp the result with the current time.
    pub fn quick_result(&self, answers: &[Answer]) -> QuickAssessmentResult {
        QuickAssessmentResult {
            top_roles: self.score(answers),
            answers: answers.to_vec(),
            timestamp: crate::time::now_rfc3339(),
        }
    }
}

fn add_scaled(scores: &mut CategoryScores, weights: &CategoryScores, scale: f64) {
    for (category, w) in weights {
        *scores.entry(category.clone()).or_insert(0.0) += w * scale;
    }
}

fn percentage_of(score: f64, top: f64) -> u8 {
    (100.0 * score / top).round().clamp(0.0, 100.0) as u8
}

/// Rank roles for a set of answers against a question bank.
pub fn score(answers: &[Answer], questions: &[Question], roles: &[Role]) -> Vec<RankedRole> {
    QuickScoreEngine::new(questions, roles).score(answers)
}
