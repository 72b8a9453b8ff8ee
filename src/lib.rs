//! Config Editor Core
//!
//! A small control surface for editing a single remote JSON configuration
//! document.
//!
//! This library provides:
//! - The editor adapter seam and a text-buffer implementation
//! - Edit-time validation gating the save action
//! - The load/save persistence coordinator with confirmation
//! - Notification sink boundary with owned toast timers

pub mod config;
pub mod editor;
pub mod gate;
pub mod notify;
pub mod session;
pub mod store;

// Re-exports for clean public API
pub use config::{Config, Endpoints};
pub use editor::{EditorAdapter, ParseError, TextBufferEditor};
pub use gate::ValidationGate;
pub use notify::{Decision, Notification, NotificationKind, NotificationSink};
pub use session::{EditorSession, PersistOutcome, RestoreOutcome};
pub use store::RemoteStore;
