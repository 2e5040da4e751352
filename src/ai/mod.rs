mod retry;
mod transport;

pub use retry::{BackendFailure, BackendRetrier, EMPTY_RESPONSE};
pub use transport::{HttpPromptTransport, PromptResponse, PromptTransport};
