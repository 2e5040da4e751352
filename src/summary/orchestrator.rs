use std::sync::Arc;

use serde::Serialize;
use time::Date;
use tracing::{info, warn};

use crate::{
    ai::{BackendFailure, BackendRetrier},
    cache::SummaryCache,
    dates,
    error::SecretaryError,
    tasks::{Task, TaskStore},
};

use super::{prompt::build_prompt, window::SummaryWindow};

pub const NO_PENDING_TASKS: &str = "No pending tasks! Enjoy!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryOrigin {
    NoPendingTasks,
    /// Task list could not be loaded; rendered like an empty list.
    FetchFailed,
    CacheHit,
    Generated,
    /// Backend answered with an error; the literal is shown and not cached.
    BackendFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub text: String,
    pub origin: SummaryOrigin,
}

impl Summary {
    fn new(text: impl Into<String>, origin: SummaryOrigin) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }
}

/// Cache-through AI summary of a user's pending tasks.
///
/// The cache is consulted only when there is something to summarize, and it
/// is keyed by user alone: whichever window generated the entry serves both
/// until a task mutation clears it. There is no lock between the cache miss
/// and the write, so two concurrent misses for one user both reach the
/// backend and the later write wins.
#[derive(Clone)]
pub struct SummaryOrchestrator {
    tasks: Arc<dyn TaskStore>,
    cache: Arc<dyn SummaryCache>,
    backend: BackendRetrier,
}

impl SummaryOrchestrator {
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        cache: Arc<dyn SummaryCache>,
        backend: BackendRetrier,
    ) -> Self {
        Self {
            tasks,
            cache,
            backend,
        }
    }

    async fn user_tasks(&self, user: &str) -> Option<Vec<Task>> {
        match self.tasks.list().await {
            Ok(all) => Some(all.into_iter().filter(|t| t.user == user).collect()),
            Err(e) => {
                warn!(user, "task fetch failed, summarizing as empty: {e}");
                None
            }
        }
    }

    pub async fn summarize(
        &self,
        user: &str,
        window: SummaryWindow,
    ) -> Result<Summary, SecretaryError> {
        self.summarize_on(user, window, dates::today()).await
    }

    pub async fn summarize_on(
        &self,
        user: &str,
        window: SummaryWindow,
        today: Date,
    ) -> Result<Summary, SecretaryError> {
        let fetched = self.user_tasks(user).await;
        let fetch_failed = fetched.is_none();
        let tasks = fetched.unwrap_or_default();

        let pending = window.pending(today, &tasks);
        if pending.is_empty() {
            let origin = if fetch_failed {
                SummaryOrigin::FetchFailed
            } else {
                SummaryOrigin::NoPendingTasks
            };
            return Ok(Summary::new(NO_PENDING_TASKS, origin));
        }

        match self.cache.get(user) {
            Ok(Some(cached)) => {
                info!(user, window = window.label(), generated = %cached.date, "summary cache hit");
                return Ok(Summary::new(cached.response, SummaryOrigin::CacheHit));
            }
            Ok(None) => {}
            Err(e) => warn!(user, "summary cache read failed, regenerating: {e}"),
        }

        let prompt = build_prompt(window, today, &pending);
        match self.backend.try_send(&prompt).await {
            Ok(text) => {
                if let Err(e) = self.cache.put(user, &dates::format_date(today), &text) {
                    warn!(user, "summary cache write failed: {e}");
                }
                info!(user, window = window.label(), tasks = pending.len(), "summary generated");
                Ok(Summary::new(text, SummaryOrigin::Generated))
            }
            Err(BackendFailure::Unconfigured(message)) => Err(SecretaryError::Config(message)),
            Err(failure) => {
                warn!(user, window = window.label(), "summary backend failed: {failure}");
                Ok(Summary::new(failure.to_string(), SummaryOrigin::BackendFailed))
            }
        }
    }
}

pub fn summary_text(window: SummaryWindow, result: Result<Summary, SecretaryError>) -> String {
    match result {
        Ok(summary) => summary.text,
        Err(e) => format!("Error generating {} summary: {e}", window.label()),
    }
}
