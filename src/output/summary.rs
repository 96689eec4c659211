use std::fmt::Write;

use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color as TableColor};

use crate::presenter;
use crate::ranking::{self, DISPLAY_REPO_LIMIT};
use crate::report::{AnalysisReport, ScoreDetail};

use super::styling::{bright, bright_green, bright_red, cyan, dim};
use super::tables::{create_table, score_cell, severity_cell};

/// Prints a human-readable summary of an analysis report to stdout.
///
/// Displays:
/// - Overview: username, repositories scanned, service summary text
/// - Scores: the five metric categories, color-coded by band
/// - Score Breakdown: positives/negatives per category (or an explicit
///   "no breakdown" fallback)
/// - Top Repositories: ranked by maturity, with ghost/top-quality markers
///   and up to 3 recommendations each
/// - Suggestions: severity-coded profile-level advice
/// - Career Roadmap: numbered steps
pub fn print_report(report: &AnalysisReport) {
    println!("{}", render_report(report, Utc::now()));
}

fn add_section_header(output: &mut String, emoji: &str, title: &str) {
    let _ = writeln!(output, "{} {}", bright(emoji), bright(title).underlined());
}

fn score_row(label: &str, detail: &ScoreDetail) -> Vec<Cell> {
    vec![
        Cell::new(label),
        score_cell(detail.score),
        Cell::new(presenter::score_label(detail)),
    ]
}

fn push_breakdown(output: &mut String, label: &str, detail: &ScoreDetail) {
    let _ = writeln!(output, "  {}", cyan(label));
    match presenter::breakdown(detail) {
        Some(breakdown) => {
            for positive in breakdown.positives {
                let _ = writeln!(output, "    {} {positive}", bright_green("+"));
            }
            for negative in breakdown.negatives {
                let _ = writeln!(output, "    {} {negative}", bright_red("-"));
            }
        }
        None => {
            let _ = writeln!(output, "    {}", dim(presenter::NO_BREAKDOWN_FALLBACK));
        }
    }
}

#[allow(clippy::too_many_lines)]
fn render_report(report: &AnalysisReport, now: DateTime<Utc>) -> String {
    let mut output = String::new();

    // Overview
    add_section_header(&mut output, "📊", "Overview");
    let _ = writeln!(
        output,
        "  {} {}\n  {} {}",
        dim("Profile:"),
        cyan(&report.username),
        dim("Repositories scanned:"),
        bright(report.details.repo_count),
    );
    if !report.summary.is_empty() {
        // Summary text is passed through as-is; markdown stays markdown.
        let _ = writeln!(output);
        for line in report.summary.lines() {
            let _ = writeln!(output, "  {line}");
        }
    }
    let _ = writeln!(output);

    // Scores
    add_section_header(&mut output, "🎯", "Scores");
    let mut scores_table = create_table();
    scores_table.set_header(vec![
        Cell::new("Category").fg(TableColor::Cyan),
        Cell::new("Score").fg(TableColor::Cyan),
        Cell::new("Level").fg(TableColor::Cyan),
    ]);
    let categories = [
        ("Overall", &report.overall_score),
        ("Profile Health", &report.profile_score),
        ("Repo Docs", &report.docs_score),
        ("Repo Standards", &report.repo_quality_score),
        ("Code Hygiene", &report.hygiene_score),
    ];
    for (label, detail) in categories {
        scores_table.add_row(score_row(label, detail));
    }
    let _ = writeln!(output, "{scores_table}\n");

    // Score Breakdown
    add_section_header(&mut output, "🔎", "Score Breakdown");
    for (label, detail) in categories {
        push_breakdown(&mut output, label, detail);
    }
    let _ = writeln!(output);

    // Top Repositories
    let repositories = &report.details.repositories;
    if !repositories.is_empty() {
        add_section_header(&mut output, "📦", "Top Repositories");

        let ranked = ranking::rank(repositories, now);
        let mut repos_table = create_table();
        repos_table.set_header(vec![
            Cell::new("#").fg(TableColor::Cyan),
            Cell::new("Repository").fg(TableColor::Cyan),
            Cell::new("Maturity").fg(TableColor::Cyan),
            Cell::new("Language").fg(TableColor::Cyan),
            Cell::new("Stars").fg(TableColor::Cyan),
            Cell::new("Forks").fg(TableColor::Cyan),
            Cell::new("Suggested Improvements").fg(TableColor::Cyan),
        ]);

        for (idx, ranked_repo) in ranking::display_window(&ranked).iter().enumerate() {
            let repo = &ranked_repo.repository;

            let mut name = repo.name.clone();
            if ranked_repo.is_top_quality {
                name.push_str(" ★");
            }
            if ranked_repo.is_ghost {
                name.push_str("\n(ghost project)");
            }
            let name_cell = if ranked_repo.is_ghost {
                Cell::new(name).fg(TableColor::DarkGrey)
            } else {
                Cell::new(name)
            };

            let recommendations = ranked_repo.display_recommendations();
            let recommendations_cell = if recommendations.is_empty() {
                Cell::new("None").fg(TableColor::DarkGrey)
            } else {
                Cell::new(recommendations.join("\n"))
            };

            repos_table.add_row(vec![
                Cell::new(idx + 1),
                name_cell,
                score_cell(repo.maturity_score.score),
                Cell::new(repo.language.as_deref().unwrap_or("-")),
                Cell::new(repo.stargazers_count),
                Cell::new(repo.forks_count),
                recommendations_cell,
            ]);
        }

        if ranked.len() > DISPLAY_REPO_LIMIT {
            let mut row = vec![Cell::new(format!(
                "... and {} more",
                ranked.len() - DISPLAY_REPO_LIMIT
            ))
            .fg(TableColor::DarkGrey)];
            row.extend(vec![Cell::new(""); 6]);
            repos_table.add_row(row);
        }

        let _ = writeln!(output, "{repos_table}\n");
    }

    // Suggestions
    if !report.suggestions.is_empty() {
        add_section_header(&mut output, "💡", "Actionable Suggestions");

        let mut suggestions_table = create_table();
        suggestions_table.set_header(vec![
            Cell::new("Severity").fg(TableColor::Cyan),
            Cell::new("Category").fg(TableColor::Cyan),
            Cell::new("Suggestion").fg(TableColor::Cyan),
        ]);
        for suggestion in &report.suggestions {
            suggestions_table.add_row(vec![
                severity_cell(suggestion.severity),
                Cell::new(&suggestion.category),
                Cell::new(&suggestion.message),
            ]);
        }
        let _ = writeln!(output, "{suggestions_table}\n");
    }

    // Career Roadmap
    if !report.details.career_roadmap.is_empty() {
        add_section_header(&mut output, "🗺", "Career Roadmap");
        for step in &report.details.career_roadmap {
            let _ = writeln!(output, "  {} {}", cyan(format!("{}.", step.step)), step.description);
        }
        let _ = writeln!(output);
    }

    output
}
