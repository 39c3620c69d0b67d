use chrono::{Duration, Utc};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::grading::{GradeReport, PerformanceTier};
use crate::quiz::CardStatus;
use crate::results::ScoreBook;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Tier message colored by band
pub fn format_tier(tier: PerformanceTier, perfect: bool, use_colors: bool) -> String {
    let msg = tier.message(perfect);
    if !use_colors {
        return msg.to_string();
    }
    match tier {
        PerformanceTier::Good => msg.green().bold().to_string(),
        PerformanceTier::Ok => msg.yellow().to_string(),
        PerformanceTier::Bad => msg.red().to_string(),
    }
}

fn format_status(status: CardStatus, correct: &str, use_colors: bool) -> String {
    match (status, use_colors) {
        (CardStatus::Correct, true) => "correct".green().to_string(),
        (CardStatus::Correct, false) => "correct".to_string(),
        (CardStatus::Wrong, true) => format!("{} (answer: {})", "wrong".red(), correct),
        (CardStatus::Wrong, false) => format!("wrong (answer: {})", correct),
        (CardStatus::Unanswered, true) => {
            format!("{} (answer: {})", "not answered".yellow(), correct)
        }
        (CardStatus::Unanswered, false) => format!("not answered (answer: {})", correct),
    }
}

/// Multi-line grade report: summary, tier message, per-question rows.
/// Printed to stdout after the TUI exits so the result survives the
/// alternate screen, and reads cleanly in pipes and screen readers.
pub fn format_grade_report(report: &GradeReport, use_colors: bool) -> String {
    let mut lines = Vec::with_capacity(report.outcomes.len() + 2);

    let headline = format!("Unit {}: {}", report.unit, report.summary());
    if use_colors {
        lines.push(headline.bold().to_string());
    } else {
        lines.push(headline);
    }
    lines.push(format_tier(report.tier, report.perfect, use_colors));

    for outcome in &report.outcomes {
        lines.push(format!(
            "  Q{}: {}",
            outcome.number,
            format_status(outcome.status, &outcome.correct, use_colors)
        ));
    }

    lines.join("\n")
}

/// Stored score records as a table: unit, score, percent, recorded age.
/// One line per unit, unit-sorted.
pub fn format_results_table(book: &ScoreBook, use_colors: bool) -> String {
    let records = book.sorted_records();
    if records.is_empty() {
        return "No scores recorded yet.".to_string();
    }

    let term_width = get_terminal_width();
    let unit_width = records
        .iter()
        .map(|(unit, _)| unit.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    records
        .iter()
        .map(|(unit, rec)| {
            let score_str = format!("{}/{}", rec.score, rec.total);
            let percent_str = format!("{:>3}%", rec.percent());
            let age = format_age(Utc::now() - rec.recorded_at);
            let unit_padded = format!("{:<width$}", unit, width = unit_width);

            let line = if use_colors {
                let tier = PerformanceTier::from_percent(rec.percent());
                let percent_colored = match tier {
                    PerformanceTier::Good => percent_str.green().to_string(),
                    PerformanceTier::Ok => percent_str.yellow().to_string(),
                    PerformanceTier::Bad => percent_str.red().to_string(),
                };
                format!(
                    "{}  {:>7}  {}  {}",
                    unit_padded.cyan(),
                    score_str.bold(),
                    percent_colored,
                    format!("recorded {} ago", age).dimmed()
                )
            } else {
                format!(
                    "{}  {:>7}  {}  recorded {} ago",
                    unit_padded, score_str, percent_str, age
                )
            };

            // Narrow terminals drop the age column rather than wrap
            match term_width {
                Some(w) if w < 40 => {
                    if use_colors {
                        format!("{}  {:>7}", unit_padded.cyan(), score_str.bold())
                    } else {
                        format!("{}  {:>7}", unit_padded, score_str)
                    }
                }
                _ => line,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "moments".to_string()
        }
    }
}
