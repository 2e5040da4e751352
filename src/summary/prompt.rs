use std::fmt::Write;

use time::Date;

use crate::{dates, tasks::Task};

use super::window::SummaryWindow;

pub const NO_FOLLOW_UP: &str = "Note that the user will not respond to you in any way, information you give should be more action-based and not request more information as none will be given";

pub fn build_prompt(window: SummaryWindow, today: Date, tasks: &[&Task]) -> String {
    let mut out = String::new();
    match window {
        SummaryWindow::Day => {
            let _ = writeln!(
                out,
                "Please summarize the following tasks for today ({}) for the user.",
                dates::format_date(today)
            );
            out.push_str("Provide a short concise summary and suggested next steps.\n\n");
        }
        SummaryWindow::Week => {
            let (start, end) = window.bounds(today);
            let _ = writeln!(
                out,
                "Please summarize the user's tasks for the current week ({} to {}).",
                dates::format_date(start),
                dates::format_date(end)
            );
            out.push_str("Give a concise weekly summary and suggested priorities.\n\n");
        }
    }
    out.push_str(NO_FOLLOW_UP);
    out.push('\n');

    for (idx, task) in tasks.iter().enumerate() {
        let _ = write!(out, "{}. ", idx + 1);
        if window == SummaryWindow::Week {
            let _ = write!(out, "{} — ", task.date);
        }
        out.push_str(&task.description);
        if let Some(location) = task.location_label() {
            let _ = write!(out, " — {location}");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn task(date: &str, description: &str, location: Option<&str>) -> Task {
        Task {
            id: description.into(),
            date: date.into(),
            description: description.into(),
            location: location.map(str::to_string),
            done: false,
            user: "ann@example.com".into(),
        }
    }

    #[test]
    fn daily_prompt_lists_tasks_with_locations() {
        let a = task("2025-10-22", "Dentist", Some("Main St"));
        let b = task("2025-10-22", "Call mom", Some("  "));
        let prompt = build_prompt(SummaryWindow::Day, date!(2025 - 10 - 22), &[&a, &b]);

        assert!(prompt.starts_with(
            "Please summarize the following tasks for today (2025-10-22) for the user.\n"
        ));
        assert!(prompt.contains(NO_FOLLOW_UP));
        assert!(prompt.ends_with("1. Dentist — Main St\n2. Call mom\n"));
    }

    #[test]
    fn weekly_prompt_names_range_and_dates() {
        let a = task("2025-10-24", "Submit report", None);
        let prompt = build_prompt(SummaryWindow::Week, date!(2025 - 10 - 22), &[&a]);

        assert!(prompt.starts_with(
            "Please summarize the user's tasks for the current week (2025-10-20 to 2025-10-26).\n"
        ));
        assert!(prompt.contains("Give a concise weekly summary and suggested priorities."));
        assert!(prompt.ends_with("1. 2025-10-24 — Submit report\n"));
    }
}
