use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{cache::SummaryCache, error::SecretaryError};

use super::{
    store::TaskStore,
    types::{Task, TaskDraft},
};

/// Task mutations for one user. Every successful remote change drops the
/// user's cached summary so the next summary request regenerates it.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    cache: Arc<dyn SummaryCache>,
}

fn validate(draft: &TaskDraft) -> Result<(), SecretaryError> {
    if draft.description.trim().is_empty() || draft.date.trim().is_empty() {
        return Err(SecretaryError::Invalid("Missing required fields".to_string()));
    }
    Ok(())
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, cache: Arc<dyn SummaryCache>) -> Self {
        Self { store, cache }
    }

    pub async fn list(&self, user: &str) -> Result<Vec<Task>, SecretaryError> {
        let all = self.store.list().await?;
        Ok(all.into_iter().filter(|t| t.user == user).collect())
    }

    pub async fn create(&self, user: &str, mut draft: TaskDraft) -> Result<Task, SecretaryError> {
        draft.user = user.to_string();
        validate(&draft)?;
        let created = self.store.create(&draft).await?;
        info!(user, task = %created.id, "task created");
        self.invalidate(user);
        Ok(created)
    }

    pub async fn update(
        &self,
        user: &str,
        id: &str,
        mut draft: TaskDraft,
    ) -> Result<Task, SecretaryError> {
        draft.user = user.to_string();
        validate(&draft)?;
        let updated = self.store.update(id, &draft).await?;
        info!(user, task = id, "task updated");
        self.invalidate(user);
        Ok(updated)
    }

    pub async fn toggle_done(&self, user: &str, task: &Task) -> Result<Task, SecretaryError> {
        let mut draft = task.to_draft();
        draft.done = !task.done;
        self.update(user, &task.id, draft).await
    }

    pub async fn delete(&self, user: &str, id: &str) -> Result<(), SecretaryError> {
        if let Err(e) = self.store.delete(id).await {
            warn!(user, task = id, "task delete failed: {e}");
            return Err(e);
        }
        info!(user, task = id, "task deleted");
        self.invalidate(user);
        Ok(())
    }

    fn invalidate(&self, user: &str) {
        if let Err(e) = self.cache.clear(user) {
            error!(user, "summary cache clear failed: {e}");
        }
    }
}
