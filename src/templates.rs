//! Compiled string templates.

use crate::fmt::escape_html;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Simple greeting.
const MSG_HELLO_NAME: &str = "Hello {$name}. Welcome";

/// Input of [`hello_name`]. Keys use camelCase on the wire so the same data
/// can come straight from JS.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct HelloName {
    pub name: Option<String>,
    pub greeting_word: Option<String>,
}

impl HelloName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            greeting_word: None,
        }
    }

    pub fn with_greeting_word(mut self, word: impl Into<String>) -> Self {
        self.greeting_word = Some(word.into());
        self
    }
}

/// Substitutes `{$placeholder}` occurrences in a message. Placeholders
/// without a value are left as written.
pub fn get_msg(message: &str, values: &[(&str, &str)]) -> String {
    static RE_PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let re = RE_PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\$([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid placeholder regex")
    });

    re.replace_all(message, |caps: &Captures| {
        let whole = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
        let key = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        values
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| (*value).to_string())
            .unwrap_or_else(|| whole.to_string())
    })
    .into_owned()
}

pub fn hello_name(data: &HelloName) -> String {
    let mut out = String::new();
    hello_name_into(data, &mut out);
    out
}

/// Like [`hello_name`] but appends to `out`.
pub fn hello_name_into(data: &HelloName, out: &mut String) {
    let name = escape_html(data.name.as_deref().unwrap_or_default());
    match data.greeting_word.as_deref().filter(|word| !word.is_empty()) {
        None => {
            out.push_str(&get_msg(MSG_HELLO_NAME, &[("name", &name)]));
            out.push('!');
        }
        Some(word) => {
            out.push_str(&escape_html(word));
            out.push(' ');
            out.push_str(&name);
            out.push('!');
        }
    }
}
