//! SSSA CLI — `sssa` command.
//!
//! Rate skills, take the quick forced-choice assessment, summarize
//! progress, and share or open result permalinks.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};

use sssa::catalog::{Catalog, Category};
use sssa::permalink::{self, AssessmentResult, VersionStatus};
use sssa::quick::{self, Answer, Choice, QuickScoreEngine};
use sssa::recommend::{self, ScienceType, UserType};
use sssa::storage::{ProgressStore, RatingsStore};
use sssa::summary::{self, CategorySummary};

// ── Configuration helpers ─────────────────────────────────────────────────────

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// `--data-dir`, then `SSSA_HOME`, then `~/.sssa`.
fn data_dir(flag: Option<&Path>) -> Result<PathBuf> {
    let dir = if let Some(dir) = flag {
        dir.to_path_buf()
    } else if let Ok(dir) = std::env::var("SSSA_HOME") {
        PathBuf::from(dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow!("HOME not set; pass --data-dir"))?;
        PathBuf::from(home).join(".sssa")
    };
    log::debug!("data directory: {}", dir.display());
    Ok(dir)
}

/// `--catalog`, then `SSSA_CATALOG`.
fn load_catalog(flag: Option<&Path>) -> Result<Catalog> {
    let path = match flag {
        Some(path) => path.to_path_buf(),
        None => std::env::var("SSSA_CATALOG")
            .map(PathBuf::from)
            .map_err(|_| anyhow!("no catalog given; pass --catalog or set SSSA_CATALOG"))?,
    };
    log::debug!("loading catalog from {}", path.display());
    Catalog::from_path(&path).with_context(|| format!("failed to load catalog {}", path.display()))
}

fn read_answers_file(path: &Path) -> Result<Vec<Answer>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid answers file {}", path.display()))
}

// ── Output helpers ────────────────────────────────────────────────────────────

fn print_summaries(summaries: &[CategorySummary]) {
    for s in summaries {
        let avg = if s.assessed_skill_count == 0 {
            "  -".to_string()
        } else {
            format!("{:.2}", s.average_score)
        };
        println!(
            "  {:<40} avg {}  rated {:>3}/{:<3} full {:>3}  {:>3}%",
            s.category.as_str(),
            avg,
            s.assessed_skill_count,
            s.skill_count,
            s.fully_rated_skill_count,
            s.completion_rate,
        );
    }
}

// ── CLI structure ─────────────────────────────────────────────────────────────

/// SSSA CLI — rate skills, run the quick assessment, share results.
#[derive(Parser, Debug)]
#[command(
    name = "sssa",
    about = "Skill self-assessment CLI",
    version,
    long_about = "sssa — skill self-assessment\n\nRate skills per category, take the quick forced-choice assessment,\nand share results as compact permalinks."
)]
struct Cli {
    /// Directory holding saved ratings and progress (default: $SSSA_HOME or ~/.sssa)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Catalog JSON file (default: $SSSA_CATALOG)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List catalog categories with skill and role counts
    Catalog,

    /// Quick forced-choice assessment
    Quick {
        #[command(subcommand)]
        subcommand: QuickCommands,
    },

    /// Rate one axis of one skill
    Rate {
        /// Category name
        #[arg(long)]
        category: String,

        /// Skill number within the category
        #[arg(long)]
        skill: u32,

        /// Evaluation axis number
        #[arg(long)]
        axis: u32,

        /// Level (0 to the catalog's max level)
        #[arg(long)]
        level: i64,
    },

    /// Suggest category groups for your background
    Recommend {
        /// science or liberal-arts
        #[arg(long)]
        user_type: UserType,

        /// engineering or operations (science only)
        #[arg(long)]
        science_type: Option<ScienceType>,
    },

    /// Summarize saved ratings per category
    Summary {
        /// Also list the N best-rated categories
        #[arg(long)]
        top: Option<usize>,
    },

    /// Print a permalink for the saved ratings
    Share {
        /// Base URL of the results page
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },

    /// Open a permalink or token and summarize it
    Open {
        /// Permalink URL or bare token
        link: String,
    },

    /// Delete saved ratings
    Clear {
        /// Only clear this category
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum QuickCommands {
    /// Show the next unanswered question (or a specific one)
    Question {
        /// Question id to show
        #[arg(long)]
        id: Option<u32>,
    },

    /// Answer a question
    Answer {
        /// Question id
        #[arg(long)]
        question: u32,

        /// left, right or neutral
        #[arg(long)]
        choice: Choice,
    },

    /// Rank roles from saved progress or an answers file
    Score {
        /// JSON file with [{"questionId": 1, "choice": "left"}, ...]
        #[arg(long)]
        answers: Option<PathBuf>,
    },

    /// Discard saved quick-assessment progress
    Reset,

    /// Show the roles named by a quick-result token
    Decode {
        /// Comma-separated role numbers (or a URL ending in #token)
        token: String,
    },
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let verbose = cli.verbose;
    let data_flag = cli.data_dir.as_deref();
    let catalog_flag = cli.catalog.as_deref();

    let result = match cli.command {
        Commands::Catalog => cmd_catalog(catalog_flag, verbose),
        Commands::Quick { subcommand } => match subcommand {
            QuickCommands::Question { id } => cmd_quick_question(data_flag, catalog_flag, id),
            QuickCommands::Answer { question, choice } => {
                cmd_quick_answer(data_flag, catalog_flag, question, choice, verbose)
            }
            QuickCommands::Score { answers } => {
                cmd_quick_score(data_flag, catalog_flag, answers.as_deref(), verbose)
            }
            QuickCommands::Reset => cmd_quick_reset(data_flag),
            QuickCommands::Decode { token } => cmd_quick_decode(catalog_flag, &token),
        },
        Commands::Rate {
            category,
            skill,
            axis,
            level,
        } => cmd_rate(data_flag, catalog_flag, &category, skill, axis, level, verbose),
        Commands::Recommend {
            user_type,
            science_type,
        } => cmd_recommend(data_flag, catalog_flag, user_type, science_type),
        Commands::Summary { top } => cmd_summary(data_flag, catalog_flag, top),
        Commands::Share { base_url } => cmd_share(data_flag, &base_url, verbose),
        Commands::Open { link } => cmd_open(data_flag, catalog_flag, &link, verbose),
        Commands::Clear { category } => cmd_clear(data_flag, category.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ── Command implementations ───────────────────────────────────────────────────

fn cmd_catalog(catalog_flag: Option<&Path>, verbose: bool) -> Result<()> {
    let catalog = load_catalog(catalog_flag)?;
    let counts = catalog.skill_count_by_category();

    println!("Categories:");
    for category in catalog.categories() {
        println!(
            "  {:<40} {:>3} skills  {:>2} roles",
            category.as_str(),
            counts.get(&category).copied().unwrap_or(0),
            catalog.roles_in(&category).len(),
        );
        if verbose {
            if let Some(group) = catalog.group_for(&category) {
                println!("      group: {}", group.name);
            }
            for role in catalog.roles_in(&category) {
                println!("      #{:<3} {}", role.number, role.name);
            }
        }
    }
    println!();
    println!(
        "{} questions, {} evaluation axes, levels 0-{}",
        catalog.questions().len(),
        catalog.axis_count(),
        catalog.max_level()
    );

    for category in catalog.unknown_weight_categories() {
        println!("  warning: questions weight '{category}' but no role belongs to it");
    }

    if verbose {
        let engine = QuickScoreEngine::from_catalog(&catalog);
        println!();
        println!("Question exposure (correction factor):");
        for (category, exposure) in engine.exposure() {
            println!(
                "  {:<40} {:>6.2}  x{:.2}",
                category.as_str(),
                exposure,
                engine.max_exposure() / exposure
            );
        }
    }
    Ok(())
}

fn cmd_quick_question(
    data_flag: Option<&Path>,
    catalog_flag: Option<&Path>,
    id: Option<u32>,
) -> Result<()> {
    let catalog = load_catalog(catalog_flag)?;

    let question = match id {
        Some(id) => catalog
            .question(id)
            .ok_or_else(|| anyhow!("unknown question id {id}"))?,
        None => {
            let store = ProgressStore::new(data_dir(data_flag)?)?;
            let answered: Vec<u32> = store
                .load()
                .map(|p| p.answers.iter().map(|a| a.question_id).collect())
                .unwrap_or_default();
            match catalog
                .questions()
                .iter()
                .find(|q| !answered.contains(&q.id))
            {
                Some(q) => q,
                None => {
                    println!("All {} questions answered.", catalog.questions().len());
                    println!("Run `sssa quick score` to see your results.");
                    return Ok(());
                }
            }
        }
    };

    if !question.section.is_empty() {
        println!("[{}] {}", question.section_number, question.section);
    }
    println!("Question {}", question.id);
    println!(
        "  left:  {} {}",
        question.left.emoji.as_deref().unwrap_or(""),
        question.left.label
    );
    println!(
        "  right: {} {}",
        question.right.emoji.as_deref().unwrap_or(""),
        question.right.label
    );
    Ok(())
}

fn cmd_quick_answer(
    data_flag: Option<&Path>,
    catalog_flag: Option<&Path>,
    question: u32,
    choice: Choice,
    verbose: bool,
) -> Result<()> {
    let catalog = load_catalog(catalog_flag)?;
    if catalog.question(question).is_none() {
        bail!("unknown question id {question}");
    }

    let store = ProgressStore::new(data_dir(data_flag)?)?;
    let progress = store
        .record_answer(Answer::new(question, choice))
        .context("failed to save progress")?;

    println!(
        "Answered {}/{} questions.",
        progress.answers.len(),
        catalog.questions().len()
    );
    if verbose {
        let engine = QuickScoreEngine::from_catalog(&catalog);
        for ranked in engine.score(&progress.answers) {
            println!("  {:>3}%  {}", ranked.percentage, ranked.role.name);
        }
    }
    Ok(())
}

fn cmd_quick_score(
    data_flag: Option<&Path>,
    catalog_flag: Option<&Path>,
    answers_file: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let catalog = load_catalog(catalog_flag)?;

    let answers = match answers_file {
        Some(path) => read_answers_file(path)?,
        None => ProgressStore::new(data_dir(data_flag)?)?
            .load()
            .map(|p| p.answers)
            .unwrap_or_default(),
    };

    if answers.is_empty() {
        println!("No answers yet. Start with `sssa quick question`.");
        return Ok(());
    }

    let engine = QuickScoreEngine::from_catalog(&catalog);
    let result = engine.quick_result(&answers);

    if result.top_roles.is_empty() {
        println!("No role scored above zero.");
        return Ok(());
    }

    println!("Top roles:");
    for (rank, ranked) in result.top_roles.iter().enumerate() {
        println!(
            "  {}. {:<40} {:>3}%  ({})",
            rank + 1,
            ranked.role.name,
            ranked.percentage,
            ranked.role.category
        );
        if verbose {
            println!("       raw score {:.4}", ranked.score);
        }
    }
    println!();
    println!(
        "Share token: {}",
        quick::encode_quick_token(&result.role_numbers())
    );
    Ok(())
}

fn cmd_quick_reset(data_flag: Option<&Path>) -> Result<()> {
    ProgressStore::new(data_dir(data_flag)?)?.clear()?;
    println!("Quick assessment progress cleared.");
    Ok(())
}

fn cmd_quick_decode(catalog_flag: Option<&Path>, token: &str) -> Result<()> {
    let catalog = load_catalog(catalog_flag)?;
    let numbers = quick::decode_quick_token(permalink::extract_token(token));
    let roles = quick::resolve_quick_roles(&catalog, &numbers);

    if roles.is_empty() {
        println!("No known roles in token.");
        return Ok(());
    }
    for (rank, role) in roles.iter().enumerate() {
        println!("  {}. {} ({})", rank + 1, role.name, role.category);
    }
    Ok(())
}

fn cmd_rate(
    data_flag: Option<&Path>,
    catalog_flag: Option<&Path>,
    category: &str,
    skill: u32,
    axis: u32,
    level: i64,
    verbose: bool,
) -> Result<()> {
    let catalog = load_catalog(catalog_flag)?;
    let category = Category::new(category);

    let skill_info = catalog
        .skill_by_number(&category, skill)
        .ok_or_else(|| anyhow!("no skill {skill} in category '{category}'"))?;
    if !catalog.evaluation_axes().iter().any(|a| a.number == axis) {
        bail!("unknown evaluation axis {axis}");
    }

    let store = RatingsStore::new(data_dir(data_flag)?)?;
    store.set_axis(&category, skill, axis, level, catalog.max_level())?;

    println!("Rated '{}' axis {axis} at level {level}.", skill_info.name);
    if verbose {
        if let Some(text) = catalog.level_text(&category, skill, axis, level) {
            println!("  {text}");
        }
        let s = summary::summarize_category(&catalog, &category, &store.category(&category));
        print_summaries(&[s]);
    }
    Ok(())
}

fn cmd_recommend(
    data_flag: Option<&Path>,
    catalog_flag: Option<&Path>,
    user_type: UserType,
    science_type: Option<ScienceType>,
) -> Result<()> {
    let catalog = load_catalog(catalog_flag)?;
    let groups = recommend::recommended_groups(&catalog, user_type, science_type);
    if groups.is_empty() {
        println!("The catalog has no category groups for that background.");
        return Ok(());
    }

    let data = RatingsStore::new(data_dir(data_flag)?)?.load();
    println!("Recommended groups:");
    for group in groups {
        println!("  {}", group.name);
        if !group.description.is_empty() {
            println!("    {}", group.description);
        }
        let summaries: Vec<CategorySummary> = group
            .categories
            .iter()
            .filter(|c| catalog.has_category(c))
            .map(|c| {
                let assessment = data.assessments.get(c).cloned().unwrap_or_default();
                summary::summarize_category(&catalog, c, &assessment)
            })
            .collect();
        print_summaries(&summaries);
    }
    Ok(())
}

fn cmd_summary(
    data_flag: Option<&Path>,
    catalog_flag: Option<&Path>,
    top: Option<usize>,
) -> Result<()> {
    let catalog = load_catalog(catalog_flag)?;
    let data = RatingsStore::new(data_dir(data_flag)?)?.load();
    let summaries = summary::summarize_all(&catalog, &data.assessments);

    println!("Category summaries:");
    print_summaries(&summaries);

    if let Some(count) = top {
        let best = summary::top_categories(&summaries, count);
        println!();
        if best.is_empty() {
            println!("Nothing rated yet.");
        } else {
            println!("Top {} categories:", best.len());
            print_summaries(&best);
        }
    }
    Ok(())
}

fn cmd_share(data_flag: Option<&Path>, base_url: &str, verbose: bool) -> Result<()> {
    let data = RatingsStore::new(data_dir(data_flag)?)?.load();
    if data.assessments.is_empty() {
        bail!("nothing rated yet; rate some skills with `sssa rate` first");
    }

    if verbose {
        let result = AssessmentResult::new(data.assessments.clone());
        eprintln!(
            "payload {:.2} KB before compression",
            permalink::result_size_kb(&result)
        );
    }

    let url = permalink::permalink_url(base_url, data.assessments)?;
    println!("{url}");
    Ok(())
}

fn cmd_open(
    data_flag: Option<&Path>,
    catalog_flag: Option<&Path>,
    link: &str,
    verbose: bool,
) -> Result<()> {
    let catalog = load_catalog(catalog_flag)?;

    let assessments = match permalink::decode_result(permalink::extract_token(link)) {
        Some(result) => {
            if verbose {
                let version = match result.version_status() {
                    VersionStatus::Current => result.version.clone(),
                    VersionStatus::Missing => "missing".to_string(),
                    VersionStatus::Unrecognized(v) => format!("{v} (unrecognized)"),
                };
                println!("Result version {version}, created {}", result.timestamp);
            }
            result.assessments
        }
        None => {
            println!("Could not read that link; showing your saved ratings instead.");
            RatingsStore::new(data_dir(data_flag)?)?.load().assessments
        }
    };

    let summaries = summary::summarize_all(&catalog, &assessments);
    print_summaries(&summaries);
    Ok(())
}

fn cmd_clear(data_flag: Option<&Path>, category: Option<&str>) -> Result<()> {
    let store = RatingsStore::new(data_dir(data_flag)?)?;
    match category {
        Some(name) => {
            let category = Category::new(name);
            store.clear_category(&category)?;
            println!("Cleared ratings for '{category}'.");
        }
        None => {
            store.clear()?;
            println!("Cleared all ratings.");
        }
    }
    Ok(())
}
