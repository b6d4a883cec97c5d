use crate::error::NotepadError;
use crate::note_core::NoteRecord;
use log::Level;
use serde::{Deserialize, Serialize};

/// Id of the optional `<script type="application/json">` element holding a
/// serialized [`NotepadConfig`].
pub const CONFIG_ELEMENT_ID: &str = "notepad-config";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct NotepadConfig {
    pub container_id: String,
    pub new_note_button_id: String,
    pub prompt_message: String,
    pub new_note_content: String,
    pub log_level: Level,
    pub notes: Vec<NoteRecord>,
}

impl Default for NotepadConfig {
    fn default() -> Self {
        Self {
            container_id: "notes".to_string(),
            new_note_button_id: "new-note".to_string(),
            prompt_message: "Note title:".to_string(),
            new_note_content: "New note content".to_string(),
            log_level: Level::Info,
            notes: vec![
                NoteRecord::new("Note 1", "Content of Note 1"),
                NoteRecord::new("Note 2", "Content of Note 2"),
            ],
        }
    }
}

impl NotepadConfig {
    pub fn from_json(json: &str) -> Result<Self, NotepadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the inline config element if the page has one, defaults
    /// otherwise.
    pub fn from_document(document: &web_sys::Document) -> Result<Self, NotepadError> {
        match document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(json) if !json.trim().is_empty() => Self::from_json(&json),
            _ => Ok(Self::default()),
        }
    }
}
