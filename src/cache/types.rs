use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachedSummary {
    pub user_id: String,
    pub date: String,
    pub response: String,
}
