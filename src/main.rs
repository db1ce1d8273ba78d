//! Terminal front-end for the exam repository.
//!
//! # Usage
//!
//! ```bash
//! # Show every instructor with their exams
//! exam-catalog browse
//!
//! # Filter by instructor name
//! exam-catalog browse --query alice
//!
//! # Incremental search: each line typed is treated as the new search box content
//! exam-catalog search
//!
//! # Open an exam (records a view, prints the PDF URL)
//! exam-catalog open 42
//!
//! # Register an exam, prompting for anything not given as a flag
//! exam-catalog add --name "P1 2021" --pdf-url https://exams.test/p1.pdf
//! ```
//!
//! # Environment Variables
//!
//! See [`exam_catalog::config`].

use exam_catalog::application::Alert;
use exam_catalog::application::services::{ExamDraft, Submission};
use exam_catalog::config::{self, Config};
use exam_catalog::domain::entities::Exam;
use exam_catalog::render::{
    render_alert, render_categories, render_disciplines, render_hierarchy, render_teachers,
};
use exam_catalog::{AppError, AppState, telemetry};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Input, Select};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Browse, search and register exams.
#[derive(Parser)]
#[command(name = "exam-catalog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show exams grouped by instructor and category
    Browse {
        /// Instructor name filter (ignored below the minimum query length)
        #[arg(short, long, default_value = "")]
        query: String,

        /// Print the hierarchy as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive incremental search reading queries from stdin
    Search,

    /// Open an exam: record a view and print its PDF URL
    Open {
        /// Exam id
        exam_id: i64,
    },

    /// Register a new exam
    Add {
        /// Exam title
        #[arg(short, long)]
        name: Option<String>,

        /// URL of the exam PDF
        #[arg(short, long)]
        pdf_url: Option<String>,

        /// Category id
        #[arg(short, long)]
        category: Option<i64>,

        /// Discipline id
        #[arg(short, long)]
        discipline: Option<i64>,

        /// Teacher id
        #[arg(short, long)]
        teacher: Option<i64>,
    },

    /// List exam categories
    Categories,

    /// List disciplines
    Disciplines,

    /// List teachers of a discipline
    Teachers {
        /// Discipline id
        discipline_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Failed to load configuration")?;
    telemetry::init(&config.log_level, &config.log_format);
    config.print_summary();

    if !config.auth_context().is_authenticated() {
        eprintln!(
            "{}",
            "EXAM_API_TOKEN is not set: nothing will be fetched or sent.".yellow()
        );
    }

    let (state, mut alerts) = AppState::build(&config)?;

    match cli.command {
        Commands::Browse { query, json } => handle_browse(&state, &query, json).await?,
        Commands::Search => handle_search(&state, &config, &mut alerts).await?,
        Commands::Open { exam_id } => handle_open(&state, exam_id).await,
        Commands::Add {
            name,
            pdf_url,
            category,
            discipline,
            teacher,
        } => {
            let draft = ExamDraft {
                name: name.unwrap_or_default(),
                pdf_url: pdf_url.unwrap_or_default(),
                category_id: category.unwrap_or_default(),
                discipline_id: discipline.unwrap_or_default(),
                teacher_id: teacher.unwrap_or_default(),
            };
            handle_add(&state, draft).await?
        }
        Commands::Categories => {
            if let Some(categories) = report(state.catalog.categories(&state.auth).await) {
                print!("{}", render_categories(&categories));
            }
        }
        Commands::Disciplines => {
            if let Some(disciplines) = report(state.catalog.disciplines(&state.auth).await) {
                print!("{}", render_disciplines(&disciplines));
            }
        }
        Commands::Teachers { discipline_id } => {
            let teachers = state
                .catalog
                .teachers_for_discipline(&state.auth, discipline_id)
                .await;
            if let Some(teachers) = report(teachers) {
                print!("{}", render_teachers(&teachers));
            }
        }
    }

    state.shutdown().await;
    drain_alerts(&mut alerts);

    Ok(())
}

/// Prints an error alert, unwrapping a skipped call to `None`.
fn report<T>(result: Result<Option<T>, AppError>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}", render_alert(&Alert::from(&e)));
            None
        }
    }
}

fn drain_alerts(alerts: &mut mpsc::UnboundedReceiver<Alert>) {
    while let Ok(alert) = alerts.try_recv() {
        eprintln!("{}", render_alert(&alert));
    }
}

/// Runs one search and prints the resulting hierarchy.
async fn handle_browse(state: &AppState, query: &str, json: bool) -> Result<()> {
    state.search.search_now(&state.auth, query).await;
    let hierarchy = state.search.hierarchy();

    if json {
        println!("{}", serde_json::to_string_pretty(&hierarchy)?);
    } else {
        print!("{}", render_hierarchy(&hierarchy));
    }

    Ok(())
}

/// Reads the search box content line by line and re-renders on each
/// applied result until EOF or `:q`.
async fn handle_search(
    state: &AppState,
    config: &Config,
    alerts: &mut mpsc::UnboundedReceiver<Alert>,
) -> Result<()> {
    println!(
        "{}",
        format!(
            "Type an instructor name and press Enter; results refresh {}ms after the last change. :q quits.",
            config.search_debounce_ms
        )
        .dimmed()
    );

    let mut changes = state.search.subscribe();
    state.search.refresh(&state.auth).await;
    print!("{}", render_hierarchy(&state.search.hierarchy()));
    changes.mark_unchanged();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read stdin")? {
                    Some(line) if line.trim() == ":q" => break,
                    Some(line) => state.search.on_input(&state.auth, line),
                    None => break,
                }
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = changes.borrow_and_update().clone();
                println!(
                    "{}",
                    format!("── results for \"{}\" ──", state.search.query_text()).dimmed()
                );
                print!("{}", render_hierarchy(&snapshot.hierarchy()));
            }
            Some(alert) = alerts.recv() => {
                eprintln!("{}", render_alert(&alert));
            }
        }
    }

    Ok(())
}

/// Looks the exam up in the unfiltered result set, records a view and
/// prints the URL to navigate to.
async fn handle_open(state: &AppState, exam_id: i64) {
    state.search.refresh(&state.auth).await;
    let snapshot = state.search.snapshot();

    let exam: Option<&Exam> = snapshot
        .records
        .iter()
        .flat_map(|record| record.exams.iter())
        .find(|exam| exam.id == exam_id);

    match exam {
        Some(exam) => {
            let url = state.views.open_exam(&state.auth, exam);
            println!("{}", exam.name.bold());
            println!("{}", url);
        }
        None => eprintln!("{}", format!("Exam #{} not found", exam_id).red()),
    }
}

/// Completes the draft interactively and submits it.
async fn handle_add(state: &AppState, mut draft: ExamDraft) -> Result<()> {
    let Some(options) = report(state.catalog.load_form_options(&state.auth).await) else {
        return Ok(());
    };

    if draft.name.is_empty() {
        draft.name = Input::new()
            .with_prompt("Exam title")
            .allow_empty(true)
            .interact_text()?;
    }

    if draft.pdf_url.is_empty() {
        draft.pdf_url = Input::new()
            .with_prompt("PDF URL")
            .allow_empty(true)
            .interact_text()?;
    }

    if draft.category_id == 0 && !options.categories.is_empty() {
        let names: Vec<&str> = options.categories.iter().map(|c| c.name.as_str()).collect();
        let index = Select::new()
            .with_prompt("Category")
            .items(&names)
            .default(0)
            .interact()?;
        draft.category_id = options.categories[index].id;
    }

    if draft.discipline_id == 0 && !options.disciplines.is_empty() {
        let names: Vec<&str> = options.disciplines.iter().map(|d| d.name.as_str()).collect();
        let index = Select::new()
            .with_prompt("Discipline")
            .items(&names)
            .default(0)
            .interact()?;
        draft.select_discipline(options.disciplines[index].id);
    }

    if draft.teacher_id == 0 && draft.discipline_id != 0 {
        let teachers = state
            .catalog
            .teachers_for_discipline(&state.auth, draft.discipline_id)
            .await;
        if let Some(teachers) = report(teachers).filter(|t| !t.is_empty()) {
            let names: Vec<&str> = teachers.iter().map(|t| t.name.as_str()).collect();
            let index = Select::new()
                .with_prompt("Teacher")
                .items(&names)
                .default(0)
                .interact()?;
            draft.teacher_id = teachers[index].id;
        }
    }

    if state.exams.submit(&state.auth, &draft).await == Submission::Created {
        println!("{}", format!("Registered \"{}\"", draft.name).green());
    }

    Ok(())
}
