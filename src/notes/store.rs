use async_trait::async_trait;

use crate::{error::SecretaryError, remote::RemoteApi};

use super::types::{Note, NoteDraft, NoteEnvelope};

#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Note>, SecretaryError>;
    async fn create(&self, draft: &NoteDraft) -> Result<Note, SecretaryError>;
    async fn update(&self, id: &str, draft: &NoteDraft) -> Result<Note, SecretaryError>;
    async fn delete(&self, id: &str) -> Result<(), SecretaryError>;
}

pub struct HttpNoteStore {
    api: RemoteApi,
}

impl HttpNoteStore {
    pub fn new(api: RemoteApi) -> Self {
        Self { api }
    }
}

fn unwrap_envelope(envelope: NoteEnvelope) -> Result<Note, SecretaryError> {
    match envelope.note {
        Some(note) if envelope.success => Ok(note),
        _ => Err(SecretaryError::Decode(
            envelope
                .message
                .unwrap_or_else(|| "backend did not return a note".to_string()),
        )),
    }
}

#[async_trait]
impl NoteStore for HttpNoteStore {
    async fn list(&self) -> Result<Vec<Note>, SecretaryError> {
        self.api.get_json("notes").await
    }

    async fn create(&self, draft: &NoteDraft) -> Result<Note, SecretaryError> {
        unwrap_envelope(self.api.post_json("notes", draft).await?)
    }

    async fn update(&self, id: &str, draft: &NoteDraft) -> Result<Note, SecretaryError> {
        unwrap_envelope(self.api.put_json(&format!("notes/{id}"), draft).await?)
    }

    async fn delete(&self, id: &str) -> Result<(), SecretaryError> {
        self.api.delete(&format!("notes/{id}")).await
    }
}
