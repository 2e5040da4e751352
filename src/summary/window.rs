use time::Date;

use crate::{dates, tasks::Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryWindow {
    Day,
    /// Monday through Sunday of the week containing today.
    Week,
}

impl SummaryWindow {
    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "daily",
            Self::Week => "weekly",
        }
    }

    pub fn bounds(self, today: Date) -> (Date, Date) {
        match self {
            Self::Day => (today, today),
            Self::Week => dates::week_bounds(today),
        }
    }

    pub fn contains(self, today: Date, day: Date) -> bool {
        let (start, end) = self.bounds(today);
        start <= day && day <= end
    }

    pub fn pending<'a>(self, today: Date, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks
            .iter()
            .filter(|t| !t.done)
            .filter(|t| t.parsed_date().is_some_and(|d| self.contains(today, d)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn task(date: &str, done: bool) -> Task {
        Task {
            id: date.to_string(),
            date: date.to_string(),
            description: "x".into(),
            location: None,
            done,
            user: "ann@example.com".into(),
        }
    }

    #[test]
    fn day_window_is_today_only() {
        let today = date!(2025 - 10 - 22);
        let tasks = [
            task("2025-10-22", false),
            task("2025-10-21", false),
            task("2025-10-22", true),
        ];
        let pending = SummaryWindow::Day.pending(today, &tasks);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].date, "2025-10-22");
    }

    #[test]
    fn week_window_spans_monday_to_sunday() {
        let today = date!(2025 - 10 - 22);
        let tasks = [
            task("2025-10-19", false),
            task("2025-10-20", false),
            task("2025-10-26", false),
            task("2025-10-27", false),
            task("someday", false),
        ];
        let dates: Vec<&str> = SummaryWindow::Week
            .pending(today, &tasks)
            .into_iter()
            .map(|t| t.date.as_str())
            .collect();
        assert_eq!(dates, vec!["2025-10-20", "2025-10-26"]);
    }
}
