pub mod ai;
pub mod auth;
pub mod cache;
pub mod config;
pub mod dates;
pub mod error;
pub mod net;
pub mod notes;
pub mod remote;
pub mod spending;
pub mod summary;
pub mod tasks;
pub mod weather;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use tracing::info;

use ai::{BackendRetrier, HttpPromptTransport};
use auth::AuthClient;
use cache::ResponseCache;
use config::AppConfig;
use error::SecretaryError;
use notes::{HttpNoteStore, NoteService};
use remote::RemoteApi;
use spending::{PlaidClient, SpendingService};
use summary::{SummaryOrchestrator, SummaryWindow};
use tasks::{HttpTaskStore, TaskService};
use weather::WeatherClient;

pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,secretary_lib=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

pub struct Secretary {
    config: AppConfig,
    cache: Arc<ResponseCache>,
    backend: BackendRetrier,
    auth: AuthClient,
    tasks: TaskService,
    notes: NoteService,
    summaries: SummaryOrchestrator,
    weather: WeatherClient,
}

impl Secretary {
    pub fn new(config: AppConfig) -> Result<Self, SecretaryError> {
        let cache = Arc::new(ResponseCache::open(&config.cache_db_path())?);
        let api = RemoteApi::new(config.api_base.clone())?;

        let task_store = Arc::new(HttpTaskStore::new(api.clone()));
        let backend = BackendRetrier::new(
            Arc::new(HttpPromptTransport::new(config.backend_url.clone())?),
            config.ai_retry,
        );
        let summaries = SummaryOrchestrator::new(task_store.clone(), cache.clone(), backend.clone());
        let tasks = TaskService::new(task_store, cache.clone());
        let notes = NoteService::new(Arc::new(HttpNoteStore::new(api.clone())));
        let weather = WeatherClient::new(config.weather_base.clone(), config.weather_api_key.clone())?;

        info!(
            api = config.api_base.as_str(),
            backend_configured = config.backend_url.is_some(),
            plaid_configured = config.plaid.is_some(),
            "secretary ready"
        );
        Ok(Self {
            auth: AuthClient::new(api),
            config,
            cache,
            backend,
            tasks,
            notes,
            summaries,
            weather,
        })
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    pub fn tasks(&self) -> &TaskService {
        &self.tasks
    }

    pub fn notes(&self) -> &NoteService {
        &self.notes
    }

    pub fn summaries(&self) -> &SummaryOrchestrator {
        &self.summaries
    }

    pub fn weather(&self) -> &WeatherClient {
        &self.weather
    }

    pub fn spending(&self) -> Result<SpendingService, SecretaryError> {
        let credentials = self.config.plaid.clone().ok_or_else(|| {
            SecretaryError::Config("PLAID_CLIENT_ID and PLAID_SECRET must be set".to_string())
        })?;
        let client = PlaidClient::new(self.config.plaid_base.clone(), credentials)?;
        Ok(SpendingService::new(
            Arc::new(client),
            self.config.transactions_retry,
            self.backend.clone(),
        ))
    }

    pub async fn summary_text(&self, user: &str, window: SummaryWindow) -> String {
        summary::summary_text(window, self.summaries.summarize(user, window).await)
    }

    pub async fn weather_text(&self, lat: f64, lon: f64) -> String {
        weather::weather_text(&self.weather, lat, lon, dates::today()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SummaryCache;
    use std::collections::HashMap;

    fn config_in(dir: &std::path::Path, extra: &[(&str, &str)]) -> AppConfig {
        let mut env: HashMap<String, String> = extra
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        env.insert("SECRETARY_DATA_DIR".into(), dir.display().to_string());
        AppConfig::from_lookup(|k| env.get(k).cloned()).unwrap()
    }

    #[test]
    fn opens_cache_under_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let secretary = Secretary::new(config_in(&dir.path().join("state"), &[])).unwrap();

        secretary.cache().put("ann@example.com", "2025-10-22", "hello").unwrap();
        assert!(dir.path().join("state").join("ai_response.db").exists());
    }

    #[test]
    fn spending_requires_plaid_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let secretary = Secretary::new(config_in(dir.path(), &[])).unwrap();
        assert!(matches!(secretary.spending(), Err(SecretaryError::Config(_))));

        let secretary = Secretary::new(config_in(
            dir.path(),
            &[("PLAID_CLIENT_ID", "client"), ("PLAID_SECRET", "shh")],
        ))
        .unwrap();
        assert!(secretary.spending().is_ok());
    }

    #[tokio::test]
    async fn unconfigured_backend_renders_summary_error() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::path("/tasks"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "_id": "t1",
                "date": dates::format_date(dates::today()),
                "description": "Dentist",
                "done": false,
                "user": "ann@example.com"
            }])))
            .mount(&server)
            .await;

        let uri = server.uri();
        let dir = tempfile::tempdir().unwrap();
        let secretary =
            Secretary::new(config_in(dir.path(), &[("SECRETARY_API_BASE", uri.as_str())])).unwrap();

        assert_eq!(
            secretary.summary_text("ann@example.com", SummaryWindow::Day).await,
            "Error generating daily summary: BACKEND_URL not set"
        );
    }

    #[tokio::test]
    async fn note_changes_keep_cached_summary() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/notes/n1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "note": {
                    "_id": "n1",
                    "date": "2025-10-22",
                    "title": "Groceries",
                    "description": "Eggs",
                    "user": "ann@example.com"
                }
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/notes/n1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "message": "Note deleted successfully"
            })))
            .mount(&server)
            .await;

        let uri = server.uri();
        let dir = tempfile::tempdir().unwrap();
        let secretary =
            Secretary::new(config_in(dir.path(), &[("SECRETARY_API_BASE", uri.as_str())])).unwrap();
        secretary.cache().put("ann@example.com", "2025-10-22", "cached").unwrap();

        let draft = notes::NoteDraft {
            date: "2025-10-22".into(),
            user: String::new(),
            title: "Groceries".into(),
            description: "Eggs".into(),
        };
        secretary.notes().update("ann@example.com", "n1", draft).await.unwrap();
        secretary.notes().delete("n1").await.unwrap();

        let cached = secretary.cache().get("ann@example.com").unwrap();
        assert_eq!(cached.map(|c| c.response).as_deref(), Some("cached"));
    }
}
