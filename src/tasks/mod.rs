mod list;
mod service;
mod store;
mod types;

pub use list::{group_by_date, TaskBoard, TaskListEntry};
pub use service::TaskService;
pub use store::{HttpTaskStore, TaskStore};
pub use types::{Task, TaskDraft, DEFAULT_USER};
