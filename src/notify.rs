//! Notification sink boundary.
//!
//! Transient user feedback (toasts) and the blocking save confirmation both
//! go through the `NotificationSink` trait. The console implementation owns
//! its pending-hide timer: a new toast aborts and replaces the previous
//! timer instead of letting two run concurrently.

use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::task::JoinHandle;

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// How long the toast stays visible; the sink default applies if unset.
    pub duration: Option<Duration>,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, title, message)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, title, message)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            duration: None,
        }
    }
}

/// Outcome of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Cancelled,
}

/// User-feedback surface consumed by the session.
///
/// `confirm` is blocking from the caller's perspective but suspends rather
/// than stalling the task queue.
#[async_trait]
pub trait NotificationSink {
    fn notify(&mut self, note: Notification);

    async fn confirm(&mut self, title: &str, message: &str) -> Decision;
}

/// Default toast lifetime.
const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(5);

/// Console sink: prints toasts to stderr and prompts on stdin.
///
/// Owns the one buffered stdin reader of the process; hosts read their
/// command lines through `next_line` so a typed-ahead confirmation reply
/// is never stranded in a second reader's buffer. The currently visible
/// toast is tracked in `current`; the hide timer clearing that slot is an
/// owned field, replaced on every new notification.
#[derive(Debug)]
pub struct ConsoleSink {
    lines: Lines<BufReader<Stdin>>,
    current: Arc<Mutex<Option<Notification>>>,
    hide_timer: Option<JoinHandle<()>>,
    default_ttl: Duration,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TOAST_TTL)
    }

    pub fn with_ttl(default_ttl: Duration) -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            current: Arc::new(Mutex::new(None)),
            hide_timer: None,
            default_ttl,
        }
    }

    /// Next line from the shared stdin reader.
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.lines.next_line().await
    }

    /// The toast currently visible, if its timer has not yet fired.
    pub fn current(&self) -> Option<Notification> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSink for ConsoleSink {
    fn notify(&mut self, note: Notification) {
        eprintln!("[{}] {}: {}", note.kind, note.title, note.message);

        // Replace the pending hide timer; the previous toast is gone either way.
        if let Some(timer) = self.hide_timer.take() {
            timer.abort();
        }

        let ttl = note.duration.unwrap_or(self.default_ttl);
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(note);

        let slot = Arc::clone(&self.current);
        self.hide_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        }));
    }

    async fn confirm(&mut self, title: &str, message: &str) -> Decision {
        eprintln!("{}: {} [y/N]", title, message);
        match self.lines.next_line().await {
            Ok(Some(line)) if matches!(line.trim(), "y" | "Y" | "yes") => Decision::Confirmed,
            _ => Decision::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn toast_hides_after_its_ttl() {
        let mut sink = ConsoleSink::new();
        sink.notify(Notification::info("New Config", "Loaded empty configuration.")
            .with_duration(Duration::from_secs(2)));
        assert_eq!(sink.current().map(|n| n.title), Some("New Config".to_string()));

        // Let the spawned hide timer register its sleep before the clock moves.
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(2100)).await;
        tokio::task::yield_now().await;
        assert!(sink.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn new_toast_replaces_pending_hide_timer() {
        let mut sink = ConsoleSink::new();
        sink.notify(Notification::info("first", "").with_duration(Duration::from_secs(2)));
        // Let the spawned hide timer register its sleep before the clock moves.
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        sink.notify(Notification::success("second", "").with_duration(Duration::from_secs(2)));
        tokio::task::yield_now().await;

        // The first timer would have fired at t=2s; it was replaced, so the
        // second toast is still visible past that point.
        tokio::time::advance(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        assert_eq!(sink.current().map(|n| n.title), Some("second".to_string()));

        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;
        assert!(sink.current().is_none());
    }

    #[test]
    fn default_duration_is_unset() {
        let note = Notification::error("Error", "There was an error saving your data.");
        assert_eq!(note.kind, NotificationKind::Error);
        assert!(note.duration.is_none());
    }
}
