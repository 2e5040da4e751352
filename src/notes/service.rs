use std::sync::Arc;

use tracing::info;

use crate::error::SecretaryError;

use super::{
    store::NoteStore,
    types::{Note, NoteDraft},
};

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, user: &str) -> Result<Vec<Note>, SecretaryError> {
        let all = self.store.list().await?;
        Ok(all.into_iter().filter(|n| n.user == user).collect())
    }

    pub async fn create(&self, user: &str, mut draft: NoteDraft) -> Result<Note, SecretaryError> {
        draft.user = user.to_string();
        if !draft.is_complete() {
            return Err(SecretaryError::Invalid("Missing required fields".to_string()));
        }
        let note = self.store.create(&draft).await?;
        info!(user, note = %note.id, "note created");
        Ok(note)
    }

    pub async fn update(
        &self,
        user: &str,
        id: &str,
        mut draft: NoteDraft,
    ) -> Result<Note, SecretaryError> {
        draft.user = user.to_string();
        if !draft.is_complete() {
            return Err(SecretaryError::Invalid("Missing required fields".to_string()));
        }
        self.store.update(id, &draft).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), SecretaryError> {
        self.store.delete(id).await
    }
}
