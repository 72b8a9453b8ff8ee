//! Editor adapter boundary.
//!
//! The visual editing widget is an external collaborator; this module owns
//! the seam to it. The document lives inside the adapter as raw text, so
//! invalid intermediate states (half-typed JSON) are representable exactly
//! as they are in a code-mode editor.

use std::fmt;

use serde_json::Value;

/// The in-editor text is not valid JSON.
#[derive(Debug)]
pub struct ParseError(serde_json::Error);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid JSON document: {}", self.0)
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self(err)
    }
}

/// Seam to the structured-editing widget.
///
/// The document is owned by the adapter at all times; callers re-read it
/// through `get_document` instead of caching a copy.
pub trait EditorAdapter {
    /// Parse and return the current document.
    fn get_document(&self) -> Result<Value, ParseError>;

    /// Replace the document wholesale.
    fn set_document(&mut self, document: Value);
}

/// Text-buffer editor backing the CLI and the tests.
#[derive(Debug, Default)]
pub struct TextBufferEditor {
    text: String,
}

impl TextBufferEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw buffer contents, valid JSON or not.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the raw buffer contents (a user edit).
    pub fn replace_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl EditorAdapter for TextBufferEditor {
    fn get_document(&self) -> Result<Value, ParseError> {
        Ok(serde_json::from_str(&self.text)?)
    }

    fn set_document(&mut self, document: Value) {
        match serde_json::to_string_pretty(&document) {
            Ok(text) => self.text = text,
            Err(err) => log::error!("failed to render document into the editor: {}", err),
        }
    }
}
