//! Validation gate.
//!
//! One derived boolean decides whether the save action is available. The
//! inline error indicator is its exact negation, never stored separately.

use crate::editor::EditorAdapter;

/// Fixed indicator text shown while the document does not parse.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON! Please correct the errors.";

/// Gate between local edits and the save action.
///
/// `submittable` is true iff the most recent parse attempt succeeded. The
/// gate starts closed and opens on the first successful parse.
#[derive(Debug, Default)]
pub struct ValidationGate {
    submittable: bool,
}

impl ValidationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-validate after an edit notification.
    ///
    /// Synchronous and idempotent: repeated calls with an unchanged
    /// document yield identical state.
    pub fn on_edit(&mut self, editor: &dyn EditorAdapter) {
        self.submittable = editor.get_document().is_ok();
    }

    pub fn is_submittable(&self) -> bool {
        self.submittable
    }

    /// Inline error indicator; `Some` exactly when the gate is closed.
    pub fn error_message(&self) -> Option<&'static str> {
        (!self.submittable).then_some(INVALID_JSON_MESSAGE)
    }
}
