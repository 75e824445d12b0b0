//! Cover letters and portfolio copy. Both ask the text generator first and fall
//! back to a fixed template, so a request never fails on the collaborator.

pub mod cover_letter;
pub mod handlers;
pub mod portfolio;

use serde::Serialize;

/// Where the returned text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSource {
    Ai,
    Template,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub text: String,
    pub source: DocumentSource,
}

impl GeneratedDocument {
    fn ai(text: String) -> Self {
        Self { text, source: DocumentSource::Ai }
    }

    fn template(text: String) -> Self {
        Self { text, source: DocumentSource::Template }
    }
}

/// `value` trimmed, or `default` when blank.
fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    match value.trim() {
        "" => default,
        v => v,
    }
}
