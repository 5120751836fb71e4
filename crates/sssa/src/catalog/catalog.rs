//! Validated, immutable catalog.
//!
//! A `Catalog` is built once from a [`CatalogDocument`] and then passed by
//! reference into every scoring and summarizing call.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use crate::error::{AssessmentError, Result};

use super::types::*;

/// Validated reference data for one assessment instrument.
#[derive(Debug, Clone)]
pub struct Catalog {
    max_level: i64,
    skills: Vec<Skill>,
    roles: Vec<Role>,
    evaluation_axes: Vec<EvaluationAxis>,
    questions: Vec<Question>,
    skill_levels: Vec<SkillLevel>,
    category_groups: Vec<CategoryGroup>,
    unknown_weight_categories: BTreeSet<Category>,
}

impl Catalog {
    /// Validate a document and build the catalog.
    ///
    /// # Errors
    ///
    /// Rejects duplicate question ids, duplicate role numbers, duplicate
    /// skill numbers within a category, empty category labels, a
    /// non-positive `max_level`, negative or non-finite weights, and
    /// duplicate category group keys.
    pub fn from_document(doc: CatalogDocument) -> Result<Self> {
        if doc.max_level < 1 {
            return Err(AssessmentError::InvalidMaxLevel(doc.max_level));
        }

        let mut skill_keys = HashSet::new();
        for skill in &doc.skills {
            if skill.category.is_empty() {
                return Err(AssessmentError::EmptyCategory(format!(
                    "skill {}",
                    skill.number
                )));
            }
            if !skill_keys.insert((skill.category.clone(), skill.number)) {
                return Err(AssessmentError::DuplicateSkill(skill.number));
            }
        }

        let mut role_numbers = HashSet::new();
        for role in &doc.roles {
            if role.category.is_empty() {
                return Err(AssessmentError::EmptyCategory(format!("role {}", role.number)));
            }
            if !role_numbers.insert(role.number) {
                return Err(AssessmentError::DuplicateRole(role.number));
            }
        }

        let role_categories: HashSet<&Category> = doc.roles.iter().map(|r| &r.category).collect();
        let mut question_ids = HashSet::new();
        let mut unknown_weight_categories = BTreeSet::new();
        for question in &doc.questions {
            if !question_ids.insert(question.id) {
                return Err(AssessmentError::DuplicateQuestion(question.id));
            }
            for option in [&question.left, &question.right] {
                for (category, weight) in &option.weights {
                    if !weight.is_finite() || *weight < 0.0 {
                        return Err(AssessmentError::InvalidWeight {
                            question: question.id,
                            category: category.to_string(),
                            weight: *weight,
                        });
                    }
                    if !role_categories.contains(category) {
                        unknown_weight_categories.insert(category.clone());
                    }
                }
            }
        }

        for category in &unknown_weight_categories {
            log::warn!("question weights reference category '{category}' with no roles");
        }

        let skill_categories: HashSet<&Category> =
            doc.skills.iter().map(|s| &s.category).collect();
        let mut group_keys = HashSet::new();
        for group in &doc.category_groups {
            if !group_keys.insert(group.key.as_str()) {
                return Err(AssessmentError::DuplicateGroup(group.key.clone()));
            }
            for category in group.categories.iter().filter(|c| !skill_categories.contains(c)) {
                log::warn!("category group '{}' lists unknown category '{category}'", group.key);
            }
        }

        Ok(Self {
            max_level: doc.max_level,
            skills: doc.skills,
            roles: doc.roles,
            evaluation_axes: doc.evaluation_axes,
            questions: doc.questions,
            skill_levels: doc.skill_levels,
            category_groups: doc.category_groups,
            unknown_weight_categories,
        })
    }

    /// Parse and validate a JSON catalog document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| AssessmentError::InvalidCatalog(e.to_string()))?;
        Self::from_document(doc)
    }

    /// Read, parse and validate a JSON catalog file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    // -- Accessors ----------------------------------------------------------

    pub fn max_level(&self) -> i64 {
        self.max_level
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn evaluation_axes(&self) -> &[EvaluationAxis] {
        &self.evaluation_axes
    }

    pub fn axis_count(&self) -> usize {
        self.evaluation_axes.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn category_groups(&self) -> &[CategoryGroup] {
        &self.category_groups
    }

    /// Weight categories that no role belongs to.
    pub fn unknown_weight_categories(&self) -> &BTreeSet<Category> {
        &self.unknown_weight_categories
    }

    // -- Queries ------------------------------------------------------------

    /// Distinct skill categories in first-seen order, wildcard excluded.
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = HashSet::new();
        self.skills
            .iter()
            .map(|s| &s.category)
            .filter(|c| !c.is_wildcard())
            .filter(|c| seen.insert((*c).clone()))
            .cloned()
            .collect()
    }

    pub fn has_category(&self, category: &Category) -> bool {
        !category.is_wildcard() && self.skills.iter().any(|s| &s.category == category)
    }

    pub fn skills_in(&self, category: &Category) -> Vec<&Skill> {
        self.skills
            .iter()
            .filter(|s| &s.category == category)
            .collect()
    }

    pub fn roles_in(&self, category: &Category) -> Vec<&Role> {
        self.roles.iter().filter(|r| &r.category == category).collect()
    }

    /// Number of skills per category, wildcard excluded.
    pub fn skill_count_by_category(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for skill in self.skills.iter().filter(|s| !s.category.is_wildcard()) {
            *counts.entry(skill.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn skill_by_number(&self, category: &Category, number: u32) -> Option<&Skill> {
        self.skills
            .iter()
            .find(|s| &s.category == category && s.number == number)
    }

    pub fn role_by_number(&self, number: u32) -> Option<&Role> {
        self.roles.iter().find(|r| r.number == number)
    }

    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Level descriptors for one skill, one entry per described axis.
    pub fn skill_levels(&self, category: &Category, skill_number: u32) -> Vec<&SkillLevel> {
        self.skill_levels
            .iter()
            .filter(|l| &l.category == category && l.skill_number == skill_number)
            .collect()
    }

    /// The text describing `level` of one skill along one axis, if the
    /// catalog has any.
    pub fn level_text(
        &self,
        category: &Category,
        skill_number: u32,
        axis_number: u32,
        level: i64,
    ) -> Option<&str> {
        let axis = self
            .evaluation_axes
            .iter()
            .find(|a| a.number == axis_number)?;
        self.skill_levels(category, skill_number)
            .into_iter()
            .find(|l| l.evaluation_axis.trim() == axis.label.trim())
            .and_then(|l| l.describe(level))
    }

    /// The first group listing `category`.
    pub fn group_for(&self, category: &Category) -> Option<&CategoryGroup> {
        self.category_groups.iter().find(|g| g.contains(category))
    }
}
