use serde::{Deserialize, Serialize};
use time::Date;

use crate::dates;

pub const DEFAULT_USER: &str = "guest";

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default = "default_user")]
    pub user: String,
}

impl Task {
    pub fn parsed_date(&self) -> Option<Date> {
        dates::parse_date(&self.date)
    }

    pub fn location_label(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            description: self.description.clone(),
            location: self.location.clone(),
            date: self.date.clone(),
            done: self.done,
            user: self.user.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub description: String,
    pub location: Option<String>,
    pub date: String,
    pub done: bool,
    pub user: String,
}

impl TaskDraft {
    /// Not done, no location, dated today.
    pub fn new(user: &str, description: &str) -> Self {
        Self {
            description: description.to_string(),
            location: None,
            date: dates::format_date(dates::today()),
            done: false,
            user: user.to_string(),
        }
    }

    pub fn with_location(mut self, location: &str) -> Self {
        let trimmed = location.trim();
        self.location = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn into_task(self, id: String) -> Task {
        Task {
            id,
            date: self.date,
            description: self.description,
            location: self.location,
            done: self.done,
            user: self.user,
        }
    }
}
