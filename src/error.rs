use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum NotepadError {
    #[error("no browser window or document available")]
    NoDocument,
    #[error("document has no element with id `{0}`")]
    MissingElement(String),
    #[error("element `{0}` is not an HTML element")]
    NotHtmlElement(String),
    #[error("invalid notepad config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid note data: {0}")]
    NoteData(#[from] serde_wasm_bindgen::Error),
    #[error("failed to {action}: {message}")]
    Dom { action: &'static str, message: String },
}

impl NotepadError {
    pub fn dom(action: &'static str, err: &JsValue) -> Self {
        Self::Dom {
            action,
            message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
        }
    }
}

impl From<NotepadError> for JsValue {
    fn from(err: NotepadError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
