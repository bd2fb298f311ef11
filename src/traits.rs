//! Core traits that decouple hyprrc from any specific compositor or
//! transport mechanism.
//!
//! Every concrete backend (Hyprland, a Unix-socket listener, a test
//! harness, …) implements one of these traits.  The
//! [`Executor`](crate::executor::Executor) and the main loop only depend
//! on the abstractions.

use crate::action::{Event, LayoutOp, WindowInfo};
use crate::groups::GroupId;
use std::sync::mpsc;

/// Abstraction over a window manager that can execute the commands key
/// bindings resolve to.
///
/// An implementation might talk to Hyprland via IPC, or it might be a
/// recording stub used in tests.  hyprrc owns no layout geometry or
/// window stacking itself; every method here delegates to the host.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// Execute a layout command (focus movement, window shuffling,
    /// resizing, layout cycling).
    fn layout(&self, op: LayoutOp) -> Result<(), Self::Error>;

    /// Close the focused window.
    fn close_window(&self) -> Result<(), Self::Error>;

    /// Switch the visible group.
    fn switch_group(&self, group: GroupId) -> Result<(), Self::Error>;

    /// Move the focused window to `group`.  With `follow`, also switch
    /// to that group so the user stays with the window.
    fn move_window_to_group(&self, group: GroupId, follow: bool) -> Result<(), Self::Error>;

    /// Put the window with the given address into floating mode.
    fn set_floating(&self, address: &str) -> Result<(), Self::Error>;

    /// Information about the currently focused window, or `None` if no
    /// window is focused.
    fn active_window(&self) -> Result<Option<WindowInfo>, Self::Error>;
}

/// A source of [`Event`]s.
///
/// Implementations listen on some transport — a Unix socket, the
/// compositor's event stream, an in-memory channel, … — and forward
/// parsed events into the provided [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](EventSource::run) **blocks** until the source is exhausted
///   or an unrecoverable error occurs.
/// * Each received event must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated
///   thread.
pub trait EventSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Event`] into `sink`.
    ///
    /// This method blocks the calling thread.  To run multiple sources
    /// concurrently, spawn each one on its own thread.
    fn run(&mut self, sink: mpsc::Sender<Event>) -> Result<(), Self::Error>;
}

/// Notifications from the [`Executor`](crate::executor::Executor) to
/// whoever is showing status — the bar's event-driven widgets, a
/// notification daemon, or just the log.
///
/// The executor holds an `Option<mpsc::Sender<StatusEvent>>`; any
/// listener can receive these independently without being owned by the
/// executor.  Missing listeners are fine — events are best-effort.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    /// The visible group changed (drives the `GroupBox` widget).
    GroupSwitched(GroupId),
    /// The command prompt should open (drives the `Prompt` widget).
    PromptOpened,
    /// An external command failed to launch.  Reported once, never
    /// retried.
    SpawnFailed { command: String, reason: String },
}

//  Tests
