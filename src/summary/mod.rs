mod orchestrator;
mod prompt;
mod window;

pub use orchestrator::{summary_text, Summary, SummaryOrchestrator, SummaryOrigin, NO_PENDING_TASKS};
pub use prompt::{build_prompt, NO_FOLLOW_UP};
pub use window::SummaryWindow;
