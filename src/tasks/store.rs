use async_trait::async_trait;

use crate::{error::SecretaryError, remote::RemoteApi};

use super::types::{Task, TaskDraft};

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, SecretaryError>;
    async fn create(&self, draft: &TaskDraft) -> Result<Task, SecretaryError>;
    async fn update(&self, id: &str, draft: &TaskDraft) -> Result<Task, SecretaryError>;
    async fn delete(&self, id: &str) -> Result<(), SecretaryError>;
}

pub struct HttpTaskStore {
    api: RemoteApi,
}

impl HttpTaskStore {
    pub fn new(api: RemoteApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TaskStore for HttpTaskStore {
    async fn list(&self) -> Result<Vec<Task>, SecretaryError> {
        self.api.get_json("tasks").await
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, SecretaryError> {
        self.api.post_json("tasks", draft).await
    }

    async fn update(&self, id: &str, draft: &TaskDraft) -> Result<Task, SecretaryError> {
        self.api.put_json(&format!("tasks/{id}"), draft).await
    }

    async fn delete(&self, id: &str) -> Result<(), SecretaryError> {
        self.api.delete(&format!("tasks/{id}")).await
    }
}
