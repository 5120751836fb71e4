//! Reference data: categories, skills, roles, evaluation axes, questions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Strip embedded line breaks and surrounding whitespace from a raw label.
pub fn normalize_category(raw: &str) -> String {
    let joined: String = raw.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    joined.trim().to_string()
}

/// A normalized category label (e.g., "Design & Analysis").
///
/// Catalog sources wrap long labels across lines, so every constructor
/// normalizes. Two categories compare equal iff their normalized text does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// Skills filed under this label apply to every category.
    pub const WILDCARD: &'static str = "*";

    /// Create a category from a raw, possibly unnormalized label.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(normalize_category(raw.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == Self::WILDCARD
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Skills, axes, roles
// ---------------------------------------------------------------------------

/// A ratable skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub category: Category,
    pub number: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One dimension every skill is rated along.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationAxis {
    pub number: u32,
    #[serde(alias = "evaluation_axis")]
    pub label: String,
}

/// A job role suggested by the quick assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub category: Category,
    pub number: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Level descriptors for one skill along one evaluation axis.
///
/// `levels` maps each level to the text shown while rating, e.g.
/// `{"1": "Follows written procedures", "3": "Adapts procedures"}`. Levels
/// without text are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillLevel {
    pub category: Category,
    pub skill_number: u32,
    #[serde(default)]
    pub skill_name: String,
    /// Label of the axis, matching [`EvaluationAxis::label`].
    pub evaluation_axis: String,
    #[serde(default)]
    pub levels: BTreeMap<i64, String>,
}

impl SkillLevel {
    pub fn describe(&self, level: i64) -> Option<&str> {
        self.levels.get(&level).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Category groups
// ---------------------------------------------------------------------------

/// Who a category group is recommended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Audience {
    /// Business side: management, corporate functions.
    LiberalArts,
    /// Technical, development-oriented work.
    Engineering,
    /// Technical, hands-on work: testing, manufacturing, operations.
    Operations,
}

/// A named bundle of categories offered together as a starting point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Stable identifier, e.g. `"project-management"`.
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub categories: Vec<Category>,
    #[serde(default)]
    pub audiences: Vec<Audience>,
}

impl CategoryGroup {
    pub fn contains(&self, category: &Category) -> bool {
        self.categories.contains(category)
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// One side of a forced-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    /// Raw, non-negative contribution per category.
    #[serde(default)]
    pub weights: BTreeMap<Category, f64>,
}

impl QuestionOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            emoji: None,
            weights: BTreeMap::new(),
        }
    }

    /// Add a weight toward a category.
    pub fn weight(mut self, category: impl Into<Category>, weight: f64) -> Self {
        self.weights.insert(category.into(), weight);
        self
    }
}

/// A forced-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub section_number: u32,
    pub left: QuestionOption,
    pub right: QuestionOption,
}

impl Question {
    pub fn new(id: u32, left: QuestionOption, right: QuestionOption) -> Self {
        Self {
            id,
            section: String::new(),
            section_number: 0,
            left,
            right,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog document
// ---------------------------------------------------------------------------

fn default_max_level() -> i64 {
    5
}

/// Unvalidated catalog as read from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default = "default_max_level")]
    pub max_level: i64,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub evaluation_axes: Vec<EvaluationAxis>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub skill_levels: Vec<SkillLevel>,
    #[serde(default)]
    pub category_groups: Vec<CategoryGroup>,
}

impl Default for CatalogDocument {
    fn default() -> Self {
        Self {
            max_level: default_max_level(),
            skills: Vec::new(),
            roles: Vec::new(),
            evaluation_axes: Vec::new(),
            questions: Vec::new(),
            skill_levels: Vec::new(),
            category_groups: Vec::new(),
        }
    }
}
