//! Integration test: scoring and summary properties.
//!
//! Covers the quick engine's ranking guarantees and the summarizer's
//! completion bounds over synthetic catalogs.

use sssa::catalog::{Category, EvaluationAxis, Question, QuestionOption, Role, Skill};
use sssa::quick::{Answer, Choice, QuickScoreEngine};
use sssa::summary::{self, CategoryAssessment, SkillRating};

fn role(category: &str, number: u32) -> Role {
    Role {
        category: Category::new(category),
        number,
        name: format!("{category} role {number}"),
        description: String::new(),
    }
}

fn skill(category: &str, number: u32) -> Skill {
    Skill {
        category: Category::new(category),
        number,
        name: format!("{category} skill {number}"),
        description: String::new(),
    }
}

fn axes(count: u32) -> Vec<EvaluationAxis> {
    (1..=count)
        .map(|number| EvaluationAxis {
            number,
            label: format!("axis {number}"),
        })
        .collect()
}

/// A bank where questions rotate through three categories on each side.
fn mixed_bank() -> Vec<Question> {
    let cats = ["Engineering", "Design", "Data"];
    (0..12u32)
        .map(|i| {
            let a = cats[(i % 3) as usize];
            let b = cats[((i + 1) % 3) as usize];
            let c = cats[((i + 2) % 3) as usize];
            Question::new(
                i + 1,
                QuestionOption::new("left").weight(a, 1.0 + (i % 2) as f64),
                QuestionOption::new("right").weight(b, 1.0).weight(c, 0.5),
            )
        })
        .collect()
}

fn mixed_roles() -> Vec<Role> {
    vec![
        role("Engineering", 1),
        role("Engineering", 2),
        role("Design", 3),
        role("Data", 4),
    ]
}

// ── Quick scoring ───────────────────────────────────────────────────────────

#[test]
fn all_left_engineering_bank_ranks_only_engineering() {
    let questions: Vec<Question> = (1..=24)
        .map(|id| {
            Question::new(
                id,
                QuestionOption::new("build it").weight("Engineering", 1.0),
                QuestionOption::new("run it").weight("Operations", 1.0),
            )
        })
        .collect();
    let roles = vec![
        role("Engineering", 1),
        role("Engineering", 2),
        role("Operations", 3),
    ];
    let answers: Vec<Answer> = (1..=24).map(|id| Answer::new(id, Choice::Left)).collect();

    let ranked = QuickScoreEngine::new(&questions, &roles).score(&answers);

    assert_eq!(ranked.len(), 2);
    for r in &ranked {
        assert_eq!(r.role.category.as_str(), "Engineering");
        assert_eq!(r.percentage, 100);
    }
    assert_eq!(ranked[0].score, ranked[1].score);
    assert!(ranked.iter().all(|r| r.role.category.as_str() != "Operations"));
}

#[test]
fn single_role_category_gets_full_category_score() {
    let questions: Vec<Question> = (1..=24)
        .map(|id| {
            Question::new(
                id,
                QuestionOption::new("build it").weight("Engineering", 1.0),
                QuestionOption::new("run it").weight("Operations", 1.0),
            )
        })
        .collect();
    let roles = vec![role("Engineering", 1), role("Operations", 2)];
    let answers: Vec<Answer> = (1..=24).map(|id| Answer::new(id, Choice::Left)).collect();

    let ranked = QuickScoreEngine::new(&questions, &roles).score(&answers);
    assert_eq!(ranked.len(), 1);
    assert!((ranked[0].score - 24.0).abs() < 1e-9);
    assert_eq!(ranked[0].percentage, 100);
}

#[test]
fn extra_consistent_answer_never_lowers_score() {
    let questions = mixed_bank();
    let roles = mixed_roles();
    let engine = QuickScoreEngine::new(&questions, &roles);

    for question in &questions {
        for side in [Choice::Left, Choice::Right] {
            let base: Vec<Answer> = questions
                .iter()
                .filter(|q| q.id != question.id)
                .take(5)
                .map(|q| Answer::new(q.id, Choice::Neutral))
                .collect();
            let mut extended = base.clone();
            extended.push(Answer::new(question.id, side));

            let before = engine.category_scores(&base);
            let after = engine.category_scores(&extended);
            for (category, score) in &before {
                let new_score = after.get(category).copied().unwrap_or(0.0);
                assert!(
                    new_score + 1e-12 >= *score,
                    "{category} dropped from {score} to {new_score}"
                );
            }
        }
    }
}

#[test]
fn percentages_are_bounded_and_top_is_full() {
    let questions = mixed_bank();
    let roles = mixed_roles();
    let engine = QuickScoreEngine::new(&questions, &roles);

    let choices = [Choice::Left, Choice::Right, Choice::Neutral];
    for offset in 0..3 {
        let answers: Vec<Answer> = questions
            .iter()
            .enumerate()
            .map(|(i, q)| Answer::new(q.id, choices[(i + offset) % 3]))
            .collect();

        let ranked = engine.score(&answers);
        assert!(!ranked.is_empty());
        assert!(ranked.len() <= 3);
        assert_eq!(ranked[0].percentage, 100);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            assert!(pair[0].percentage >= pair[1].percentage);
        }
        assert!(ranked.iter().all(|r| r.percentage <= 100 && r.score > 0.0));
    }
}

#[test]
fn no_answers_ranks_nothing() {
    let questions = mixed_bank();
    let roles = mixed_roles();
    assert!(QuickScoreEngine::new(&questions, &roles).score(&[]).is_empty());
}

#[test]
fn answers_for_unknown_questions_are_ignored() {
    let questions = mixed_bank();
    let roles = mixed_roles();
    let engine = QuickScoreEngine::new(&questions, &roles);

    let known = vec![Answer::new(1, Choice::Left)];
    let mut with_stale = known.clone();
    with_stale.push(Answer::new(999, Choice::Right));

    assert_eq!(engine.score(&known), engine.score(&with_stale));
}

// ── Summaries ───────────────────────────────────────────────────────────────

#[test]
fn five_skills_two_fully_rated() {
    let skills: Vec<Skill> = (1..=5).map(|n| skill("Engineering", n)).collect();
    let skill_refs: Vec<&Skill> = skills.iter().collect();
    let axes = axes(4);

    let mut assessment = CategoryAssessment::new();
    for number in [1, 2] {
        let rating: SkillRating = (1..=4).map(|axis| (axis, 3)).collect();
        assessment.insert(number, rating);
    }

    let s = summary::summarize(
        &Category::new("Engineering"),
        &assessment,
        &skill_refs,
        &axes,
        5,
    );
    assert_eq!(s.average_score, 3.0);
    assert_eq!(s.assessed_skill_count, 2);
    assert_eq!(s.fully_rated_skill_count, 2);
    assert_eq!(s.completion_rate, 40);
}

#[test]
fn fully_rated_category_completes_at_100() {
    let skills: Vec<Skill> = (1..=3).map(|n| skill("Design", n)).collect();
    let skill_refs: Vec<&Skill> = skills.iter().collect();
    let axes = axes(4);

    let assessment: CategoryAssessment = (1..=3)
        .map(|number| {
            let rating: SkillRating = (1..=4).map(|axis| (axis, (axis as i64) % 6)).collect();
            (number, rating)
        })
        .collect();

    let s = summary::summarize(&Category::new("Design"), &assessment, &skill_refs, &axes, 5);
    assert_eq!(s.completion_rate, 100);
    assert_eq!(
        summary::axis_completion_rate(&assessment, &skill_refs, &axes, 5),
        100
    );
}

#[test]
fn completion_stays_within_bounds_with_stale_and_invalid_ratings() {
    let skills: Vec<Skill> = (1..=2).map(|n| skill("Data", n)).collect();
    let skill_refs: Vec<&Skill> = skills.iter().collect();
    let axes = axes(2);

    let mut assessment = CategoryAssessment::new();
    for number in 1..=10 {
        let mut rating = SkillRating::new();
        rating.set(1, 2);
        rating.set(2, 42);
        assessment.insert(number, rating);
    }

    let s = summary::summarize(&Category::new("Data"), &assessment, &skill_refs, &axes, 5);
    assert!(s.completion_rate <= 100);
    assert_eq!(s.assessed_skill_count, 2);
    assert_eq!(s.fully_rated_skill_count, 0);
    assert_eq!(s.average_score, 2.0);
}

#[test]
fn level_zero_counts_as_rated() {
    let skills = [skill("Data", 1)];
    let skill_refs: Vec<&Skill> = skills.iter().collect();
    let rating: SkillRating = [(1, 0)].into_iter().collect();
    let assessment: CategoryAssessment = [(1, rating)].into_iter().collect();

    let s = summary::summarize(&Category::new("Data"), &assessment, &skill_refs, &axes(1), 5);
    assert_eq!(s.assessed_skill_count, 1);
    assert_eq!(s.completion_rate, 100);
    assert_eq!(s.average_score, 0.0);
}
