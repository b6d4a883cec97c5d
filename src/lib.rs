pub mod app;
pub mod config;
pub mod error;
pub mod fmt;
pub mod note_core;
pub mod note_list;
pub mod templates;

pub use config::NotepadConfig;
pub use error::NotepadError;
pub use note_core::{make_notes, Note, NoteRecord, NoteState, NoteView};
pub use note_list::{NoteList, TitlePrompt};
