use serde::Serialize;

use super::types::{Task, TaskDraft};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskListEntry {
    SectionHeader { date: String },
    TaskRow { task: Task },
}

pub fn group_by_date(tasks: &[Task]) -> Vec<TaskListEntry> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let mut out = Vec::with_capacity(sorted.len() * 2);
    let mut current: Option<&str> = None;
    for task in sorted {
        if current != Some(task.date.as_str()) {
            out.push(TaskListEntry::SectionHeader {
                date: task.date.clone(),
            });
            current = Some(task.date.as_str());
        }
        out.push(TaskListEntry::TaskRow { task: task.clone() });
    }
    out
}

/// In-memory list a screen renders from. New tasks show up immediately under
/// a provisional id and are swapped for the server copy once it arrives.
#[derive(Debug, Default, Clone)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn insert_provisional(&mut self, draft: TaskDraft) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.tasks.insert(0, draft.into_task(id.clone()));
        id
    }

    pub fn replace(&mut self, id: &str, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(slot) => *slot = task,
            None => self.tasks.insert(0, task),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }

    pub fn entries(&self) -> Vec<TaskListEntry> {
        group_by_date(&self.tasks)
    }
}
