//! Category recommendations by background.
//!
//! A user says whether their background is technical ("science") or
//! business ("liberal arts"), and technical users may narrow it down to
//! development or hands-on operations work. The catalog's category groups
//! carry the audiences they suit; everything else follows from that.

use std::collections::HashSet;

use crate::catalog::{Audience, Catalog, Category, CategoryGroup};

/// Broad background of the person being assessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    Science,
    LiberalArts,
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "science" => Ok(UserType::Science),
            "liberal-arts" | "liberal_arts" | "liberalarts" => Ok(UserType::LiberalArts),
            other => Err(format!(
                "unknown user type '{other}' (expected science or liberal-arts)"
            )),
        }
    }
}

/// Kind of technical work, for science users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScienceType {
    Engineering,
    Operations,
}

impl std::str::FromStr for ScienceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "engineering" => Ok(ScienceType::Engineering),
            "operations" => Ok(ScienceType::Operations),
            other => Err(format!(
                "unknown science type '{other}' (expected engineering or operations)"
            )),
        }
    }
}

/// The audience a background maps to. Science users who have not picked a
/// kind of work map to none, meaning every group applies.
pub fn audience(user_type: UserType, science_type: Option<ScienceType>) -> Option<Audience> {
    match (user_type, science_type) {
        (UserType::LiberalArts, _) => Some(Audience::LiberalArts),
        (UserType::Science, Some(ScienceType::Engineering)) => Some(Audience::Engineering),
        (UserType::Science, Some(ScienceType::Operations)) => Some(Audience::Operations),
        (UserType::Science, None) => None,
    }
}

/// Category groups to suggest, in catalog order.
pub fn recommended_groups(
    catalog: &Catalog,
    user_type: UserType,
    science_type: Option<ScienceType>,
) -> Vec<&CategoryGroup> {
    let groups = catalog.category_groups();
    match audience(user_type, science_type) {
        Some(audience) => groups
            .iter()
            .filter(|g| g.audiences.contains(&audience))
            .collect(),
        None => groups.iter().collect(),
    }
}

/// Distinct categories of the recommended groups, first-seen order.
pub fn recommended_categories(
    catalog: &Catalog,
    user_type: UserType,
    science_type: Option<ScienceType>,
) -> Vec<Category> {
    let mut seen = HashSet::new();
    recommended_groups(catalog, user_type, science_type)
        .into_iter()
        .flat_map(|g| g.categories.iter())
        .filter(|c| seen.insert((*c).clone()))
        .cloned()
        .collect()
}
