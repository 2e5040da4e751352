//! In-memory fakes behind the crate's trait seams.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use time::Date;

use crate::{
    ai::{PromptResponse, PromptTransport},
    cache::{CachedSummary, ResponseCache, SummaryCache},
    error::{SecretaryError, TransportError},
    notes::{Note, NoteDraft, NoteStore},
    spending::{Transaction, TransactionSource},
    tasks::{Task, TaskDraft, TaskStore},
};

fn not_found(id: &str) -> SecretaryError {
    SecretaryError::Http {
        status: 404,
        message: format!("{id} not found"),
    }
}

#[derive(Default)]
pub(crate) struct FakeTaskStore {
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicUsize,
    mutations: AtomicUsize,
    fail_mutation: AtomicBool,
    fail_list: AtomicBool,
}

impl FakeTaskStore {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            ..Self::default()
        }
    }

    pub fn fail_next_mutation(&self) {
        self.fail_mutation.store(true, Ordering::SeqCst);
    }

    pub fn fail_lists(&self) {
        self.fail_list.store(true, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    fn begin_mutation(&self) -> Result<(), SecretaryError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutation.swap(false, Ordering::SeqCst) {
            return Err(TransportError::other("connection reset").into());
        }
        Ok(())
    }
}

#[async_trait]
impl TaskStore for FakeTaskStore {
    async fn list(&self) -> Result<Vec<Task>, SecretaryError> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(TransportError::other("connection refused").into());
        }
        Ok(self.snapshot())
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task, SecretaryError> {
        self.begin_mutation()?;
        let id = format!("task-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let task = draft.clone().into_task(id);
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: &str, draft: &TaskDraft) -> Result<Task, SecretaryError> {
        self.begin_mutation()?;
        let mut tasks = self.tasks.lock().unwrap();
        let slot = tasks.iter_mut().find(|t| t.id == id).ok_or_else(|| not_found(id))?;
        *slot = draft.clone().into_task(id.to_string());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), SecretaryError> {
        self.begin_mutation()?;
        let mut tasks = self.tasks.lock().unwrap();
        let idx = tasks.iter().position(|t| t.id == id).ok_or_else(|| not_found(id))?;
        tasks.remove(idx);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeNoteStore {
    notes: Mutex<Vec<Note>>,
    next_id: AtomicUsize,
}

impl FakeNoteStore {
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            notes: Mutex::new(notes),
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }
}

fn note_from(id: String, draft: &NoteDraft) -> Note {
    Note {
        id,
        date: draft.date.clone(),
        title: draft.title.clone(),
        description: draft.description.clone(),
        user: draft.user.clone(),
    }
}

#[async_trait]
impl NoteStore for FakeNoteStore {
    async fn list(&self) -> Result<Vec<Note>, SecretaryError> {
        Ok(self.snapshot())
    }

    async fn create(&self, draft: &NoteDraft) -> Result<Note, SecretaryError> {
        let id = format!("note-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let note = note_from(id, draft);
        self.notes.lock().unwrap().push(note.clone());
        Ok(note)
    }

    async fn update(&self, id: &str, draft: &NoteDraft) -> Result<Note, SecretaryError> {
        let mut notes = self.notes.lock().unwrap();
        let slot = notes.iter_mut().find(|n| n.id == id).ok_or_else(|| not_found(id))?;
        *slot = note_from(id.to_string(), draft);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), SecretaryError> {
        let mut notes = self.notes.lock().unwrap();
        let idx = notes.iter().position(|n| n.id == id).ok_or_else(|| not_found(id))?;
        notes.remove(idx);
        Ok(())
    }
}

/// Replays scripted replies in order; an exhausted script fails every call.
pub(crate) struct FakeTransport {
    script: Mutex<VecDeque<Result<PromptResponse, SecretaryError>>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn scripted(replies: Vec<Result<PromptResponse, SecretaryError>>) -> Self {
        Self {
            script: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl PromptTransport for FakeTransport {
    async fn send_prompt(&self, prompt: &str) -> Result<PromptResponse, SecretaryError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::other("script exhausted").into()))
    }
}

/// In-memory sqlite cache that counts reads and writes.
pub(crate) struct CountingCache {
    inner: ResponseCache,
    gets: AtomicUsize,
    puts: AtomicUsize,
}

impl Default for CountingCache {
    fn default() -> Self {
        Self {
            inner: ResponseCache::open_in_memory().expect("in-memory cache"),
            gets: AtomicUsize::new(0),
            puts: AtomicUsize::new(0),
        }
    }
}

impl CountingCache {
    pub fn inner(&self) -> &ResponseCache {
        &self.inner
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

impl SummaryCache for CountingCache {
    fn get(&self, user_id: &str) -> Result<Option<CachedSummary>, SecretaryError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(user_id)
    }

    fn put(&self, user_id: &str, date: &str, text: &str) -> Result<(), SecretaryError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put(user_id, date, text)
    }

    fn clear(&self, user_id: &str) -> Result<(), SecretaryError> {
        self.inner.clear(user_id)
    }
}

/// Fails `failures` fetches, then returns `transactions`; `None` never recovers.
pub(crate) struct FakeTransactionSource {
    failures: Option<usize>,
    transactions: Vec<Transaction>,
    fetches: AtomicUsize,
    last_range: Mutex<Option<(Date, Date)>>,
}

impl FakeTransactionSource {
    pub fn failing_then(failures: usize, transactions: Vec<Transaction>) -> Self {
        Self {
            failures: Some(failures),
            transactions,
            fetches: AtomicUsize::new(0),
            last_range: Mutex::new(None),
        }
    }

    pub fn always_failing() -> Self {
        Self {
            failures: None,
            ..Self::failing_then(0, Vec::new())
        }
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn last_range(&self) -> Option<(Date, Date)> {
        *self.last_range.lock().unwrap()
    }
}

#[async_trait]
impl TransactionSource for FakeTransactionSource {
    async fn create_access_token(&self) -> Result<String, SecretaryError> {
        Ok("access-sandbox-test".to_string())
    }

    async fn fetch_transactions(
        &self,
        _access_token: &str,
        start: Date,
        end: Date,
    ) -> Result<Vec<Transaction>, SecretaryError> {
        *self.last_range.lock().unwrap() = Some((start, end));
        let seen = self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.failures {
            Some(failures) if seen >= failures => Ok(self.transactions.clone()),
            _ => Err(SecretaryError::Http {
                status: 400,
                message: "PRODUCT_NOT_READY".to_string(),
            }),
        }
    }
}
