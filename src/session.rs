//! Editor session: the load/edit/validate/confirm/persist state machine.
//!
//! Owns the editor adapter, the validation gate, the remote store, and the
//! notification sink. `restore` and `persist` take `&mut self`, so a second
//! call cannot start while one is suspended at a network round trip; on the
//! current-thread runtime the two operations are serialized by construction.

use std::time::Duration;

use serde_json::Value;

use crate::editor::EditorAdapter;
use crate::gate::ValidationGate;
use crate::notify::{Decision, Notification, NotificationSink};
use crate::store::{decode, FetchOutcome, RemoteStore};

/// How long the low-severity "new configuration" toast stays up.
const NEW_CONFIG_TOAST_TTL: Duration = Duration::from_secs(2);

/// Result of a `restore` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// No load endpoint configured; nothing happened.
    Skipped,
    /// The remote document was installed.
    Loaded,
    /// The fallback empty document was installed.
    Fallback,
}

/// Result of a `persist` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The gate was closed; no prompt, no request.
    Blocked,
    /// The user declined the confirmation; no request, no notification.
    Cancelled,
    /// The document was written to the save endpoint.
    Saved,
    /// The write failed; local state is untouched and retrying is fine.
    Failed,
}

/// The config-editor session.
pub struct EditorSession<E, N> {
    editor: E,
    gate: ValidationGate,
    store: RemoteStore,
    sink: N,
}

impl<E, N> EditorSession<E, N>
where
    E: EditorAdapter,
    N: NotificationSink,
{
    pub fn new(editor: E, store: RemoteStore, sink: N) -> Self {
        Self {
            editor,
            gate: ValidationGate::new(),
            store,
            sink,
        }
    }

    /// Edit notification hook; must run after every edit, including the
    /// programmatic `set_document` a restore performs.
    pub fn notify_edit(&mut self) {
        self.gate.on_edit(&self.editor);
    }

    /// Apply an edit through the adapter and re-run the gate.
    pub fn edit<R>(&mut self, apply: impl FnOnce(&mut E) -> R) -> R {
        let out = apply(&mut self.editor);
        self.notify_edit();
        out
    }

    pub fn is_submittable(&self) -> bool {
        self.gate.is_submittable()
    }

    /// Inline validation indicator, shown iff the gate is closed.
    pub fn validation_error(&self) -> Option<&'static str> {
        self.gate.error_message()
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Raw handle to the editing widget. Edits made through this bypass the
    /// gate until the host delivers the widget's change notification via
    /// `notify_edit`.
    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    /// Mutable handle to the sink, for hosts whose input surface lives on
    /// the sink (a console sink owns the process's one stdin reader).
    pub fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }

    /// Load the remote document, falling back to an empty one.
    ///
    /// Runs once at startup and on demand afterwards. An absent load
    /// endpoint is a silent no-op; an absent or unusable remote document is
    /// an expected first-run condition and gets an informational toast, not
    /// an error.
    pub async fn restore(&mut self) -> RestoreOutcome {
        match self.store.fetch().await {
            FetchOutcome::NotConfigured => RestoreOutcome::Skipped,
            FetchOutcome::Document(document) => {
                self.install(document);
                self.sink.notify(Notification::success(
                    "Success!",
                    "Your configuration has been loaded.",
                ));
                RestoreOutcome::Loaded
            }
            FetchOutcome::Empty => {
                self.install_fallback();
                RestoreOutcome::Fallback
            }
            FetchOutcome::Failed(err) => {
                log::warn!("falling back to an empty configuration: {}", err);
                self.install_fallback();
                RestoreOutcome::Fallback
            }
        }
    }

    /// Save the current document behind confirmation.
    ///
    /// The triggering control is expected to be disabled while the gate is
    /// closed; the re-check here is defensive. The document is re-read at
    /// send time, never cached, so a parse failure between edit and trigger
    /// is a failed save rather than a panic.
    pub async fn persist(&mut self) -> PersistOutcome {
        if !self.gate.is_submittable() {
            return PersistOutcome::Blocked;
        }

        let decision = self
            .sink
            .confirm("Are you sure?", "Do you want to save the changes?")
            .await;
        if decision == Decision::Cancelled {
            return PersistOutcome::Cancelled;
        }

        let document = match self.editor.get_document() {
            Ok(document) => document,
            Err(err) => {
                log::error!("document became invalid before the save was sent: {}", err);
                self.sink.notify(Notification::error(
                    "Error!",
                    "The configuration is no longer valid JSON.",
                ));
                return PersistOutcome::Failed;
            }
        };

        match self.store.store(&document).await {
            Ok(()) => {
                self.sink.notify(Notification::success(
                    "Saved!",
                    "Your changes have been saved.",
                ));
                PersistOutcome::Saved
            }
            Err(err) => {
                log::error!("saving configuration failed: {}", err);
                self.sink.notify(Notification::error(
                    "Error!",
                    "There was an error saving your data.",
                ));
                PersistOutcome::Failed
            }
        }
    }

    fn install_fallback(&mut self) {
        self.install(decode::empty_document());
        self.sink.notify(
            Notification::info("New Config", "Loaded empty configuration.")
                .with_duration(NEW_CONFIG_TOAST_TTL),
        );
    }

    /// Replace the document wholesale and fire the edit hook so the gate
    /// re-validates the installed state.
    fn install(&mut self, document: Value) {
        self.editor.set_document(document);
        self.notify_edit();
    }
}
