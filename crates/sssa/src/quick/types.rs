//! Data structures for the quick (forced-choice) assessment.

use serde::{Deserialize, Serialize};

use crate::catalog::Role;

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

/// The respondent's pick on one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Left,
    Right,
    /// Neither side; credits half of both.
    Neutral,
}

impl std::str::FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Choice::Left),
            "right" | "r" => Ok(Choice::Right),
            "neutral" | "n" => Ok(Choice::Neutral),
            other => Err(format!("unknown choice '{other}' (expected left, right or neutral)")),
        }
    }
}

/// An answer to one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "questionId", alias = "question_id")]
    pub question_id: u32,
    pub choice: Choice,
}

impl Answer {
    pub fn new(question_id: u32, choice: Choice) -> Self {
        Self {
            question_id,
            choice,
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A role with its raw score and its share of the top score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRole {
    pub role: Role,
    pub score: f64,
    /// 0-100, the top-ranked role is always 100.
    pub percentage: u8,
}

/// Outcome of one quick assessment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickAssessmentResult {
    pub top_roles: Vec<RankedRole>,
    pub answers: Vec<Answer>,
    pub timestamp: String,
}

impl QuickAssessmentResult {
    /// Role numbers of the ranked roles, in rank order.
    pub fn role_numbers(&self) -> Vec<u32> {
        self.top_roles.iter().map(|r| r.role.number).collect()
    }
}
