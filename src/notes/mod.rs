mod service;
mod store;
mod types;

pub use service::NoteService;
pub use store::{HttpNoteStore, NoteStore};
pub use types::{Note, NoteDraft};
