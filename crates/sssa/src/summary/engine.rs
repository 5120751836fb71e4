//! Category summarizer — per-skill ratings to per-category aggregates.

use crate::catalog::{Catalog, Category, EvaluationAxis, Skill};

use super::types::*;

fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    (100.0 * part as f64 / whole as f64).round().clamp(0.0, 100.0) as u8
}

// ---------------------------------------------------------------------------
// Single category
// ---------------------------------------------------------------------------

/// Summarize one category's ratings.
///
/// Only skills listed in `skills` are considered; ratings for other skill
/// numbers are stale and ignored. The average is taken over individual
/// rated axes, so a skill with four rated axes weighs four times.
pub fn summarize(
    category: &Category,
    assessment: &CategoryAssessment,
    skills: &[&Skill],
    axes: &[EvaluationAxis],
    max_level: i64,
) -> CategorySummary {
    let axis_numbers: Vec<u32> = axes.iter().map(|a| a.number).collect();

    let mut total = 0.0f64;
    let mut rated_entries = 0usize;
    let mut assessed = 0usize;
    let mut fully_rated = 0usize;

    for skill in skills {
        let Some(rating) = assessment.skill(skill.number) else {
            continue;
        };
        let mut any = false;
        for level in rating.rated_levels(&axis_numbers, max_level) {
            total += level as f64;
            rated_entries += 1;
            any = true;
        }
        if any {
            assessed += 1;
        }
        if rating.is_fully_rated(&axis_numbers, max_level) {
            fully_rated += 1;
        }
    }

    let average_score = if rated_entries > 0 {
        total / rated_entries as f64
    } else {
        0.0
    };

    CategorySummary {
        category: category.clone(),
        average_score,
        skill_count: skills.len(),
        assessed_skill_count: assessed,
        fully_rated_skill_count: fully_rated,
        completion_rate: rounded_percent(assessed, skills.len()),
    }
}

/// Summarize one category using the catalog's skills, axes and scale.
pub fn summarize_category(
    catalog: &Catalog,
    category: &Category,
    assessment: &CategoryAssessment,
) -> CategorySummary {
    let skills = catalog.skills_in(category);
    summarize(
        category,
        assessment,
        &skills,
        catalog.evaluation_axes(),
        catalog.max_level(),
    )
}

// ---------------------------------------------------------------------------
// Whole catalog
// ---------------------------------------------------------------------------

/// Summarize every catalog category, in catalog order.
///
/// Categories without ratings still appear with zero counts. Ratings
/// filed under categories the catalog does not know are skipped.
pub fn summarize_all(catalog: &Catalog, assessments: &Assessments) -> Vec<CategorySummary> {
    for category in assessments.keys() {
        if !catalog.has_category(category) {
            log::debug!("ignoring ratings for unknown category '{category}'");
        }
    }

    let empty = CategoryAssessment::new();
    catalog
        .categories()
        .iter()
        .map(|category| {
            let assessment = assessments.get(category).unwrap_or(&empty);
            summarize_category(catalog, category, assessment)
        })
        .collect()
}

/// Share of rated axis entries out of `skills × axes`, as a rounded
/// percentage. This is the finer-grained progress figure.
pub fn axis_completion_rate(
    assessment: &CategoryAssessment,
    skills: &[&Skill],
    axes: &[EvaluationAxis],
    max_level: i64,
) -> u8 {
    let rated: usize = skills
        .iter()
        .filter_map(|s| assessment.skill(s.number))
        .map(|rating| {
            axes.iter()
                .filter(|a| rating.get(a.number, max_level).is_rated())
                .count()
        })
        .sum();
    rounded_percent(rated, skills.len() * axes.len())
}

/// The best-rated categories: those with a positive average, highest first.
pub fn top_categories(summaries: &[CategorySummary], count: usize) -> Vec<CategorySummary> {
    let mut ranked: Vec<CategorySummary> = summaries
        .iter()
        .filter(|s| s.average_score > 0.0)
        .cloned()
        .collect();
    ranked.sort_by(|a, b| {
        b.average_score
            .partial_cmp(&a.average_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(count);
    ranked
}
