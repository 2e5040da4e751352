mod schema;
mod store;
mod types;

pub use store::{ResponseCache, SummaryCache};
pub use types::CachedSummary;
