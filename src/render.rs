//! Terminal rendering of the instructor hierarchy and alerts.

use std::fmt::Write;

use colored::Colorize;

use crate::application::{Alert, AlertKind};
use crate::domain::aggregation::InstructorGroup;
use crate::domain::entities::{Category, Discipline, Teacher};

/// Renders the hierarchy as an indented outline.
///
/// ```text
/// Alice
///   Midterm
///     #1  P1 2021 (Math)  3 views
///         https://exams.test/p1.pdf
/// ```
pub fn render_hierarchy(groups: &[InstructorGroup]) -> String {
    if groups.is_empty() {
        return format!("{}\n", "No exams found.".dimmed());
    }

    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "{}", group.name.bold());
        for category in &group.categories {
            let _ = writeln!(out, "  {}", category.category.name.cyan());
            for entry in &category.exams {
                let _ = writeln!(
                    out,
                    "    {}  {}  {}",
                    format!("#{}", entry.exam.id).yellow(),
                    entry.label(),
                    views_label(entry.exam.views).dimmed()
                );
                let _ = writeln!(out, "        {}", entry.exam.pdf_url.underline());
            }
        }
    }
    out
}

fn views_label(views: u64) -> String {
    if views == 1 {
        "1 view".to_string()
    } else {
        format!("{} views", views)
    }
}

/// Renders one alert line.
pub fn render_alert(alert: &Alert) -> String {
    match alert.kind {
        AlertKind::Success => format!("{} {}", "✓".green().bold(), alert.text.green()),
        AlertKind::Error => format!("{} {}", "✗".red().bold(), alert.text.red()),
    }
}

pub fn render_categories(categories: &[Category]) -> String {
    render_id_list(categories.iter().map(|c| (c.id, c.name.as_str())))
}

pub fn render_disciplines(disciplines: &[Discipline]) -> String {
    render_id_list(disciplines.iter().map(|d| (d.id, d.name.as_str())))
}

pub fn render_teachers(teachers: &[Teacher]) -> String {
    render_id_list(teachers.iter().map(|t| (t.id, t.name.as_str())))
}

fn render_id_list<'a>(items: impl Iterator<Item = (i64, &'a str)>) -> String {
    let mut out = String::new();
    for (id, name) in items {
        let _ = writeln!(out, "{:>5}  {}", id.to_string().yellow(), name);
    }
    if out.is_empty() {
        out = format!("{}\n", "Nothing to show.".dimmed());
    }
    out
}
