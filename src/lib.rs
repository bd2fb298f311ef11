//! **hyprrc** — a declarative keybinding and status-bar configuration
//! daemon for Hyprland-compatible compositors.
//!
//! The compositor keeps doing what compositors do — layout geometry,
//! window stacking, rendering.  hyprrc owns the *configuration layer*
//! on top of it: the keybinding table, workspace groups, layout
//! declarations, the status-bar composition model, window-floating
//! rules, and the one-shot autostart hook.  Everything is declared in
//! one JSON file, validated at load, and frozen into an immutable
//! snapshot that is swapped atomically on reload — a broken reload
//! never touches the running session.
//!
//! # Architecture
//!
//! The crate is organised around two core traits:
//!
//! * [`traits::WindowManager`] — abstracts action execution (focus
//!   moves, group switches, floating) so the dispatch logic is not
//!   coupled to any specific compositor.
//! * [`traits::EventSource`] — abstracts the transport that delivers
//!   key chords, window-open notifications, and control messages, so
//!   the main loop is not coupled to any specific IPC mechanism.
//!
//! Concrete implementations live in [`hyprland`] (Hyprland IPC) and
//! [`ipc`] (Unix-socket event listener).

pub mod action;
pub mod autostart;
pub mod bar;
pub mod config;
pub mod executor;
pub mod groups;
pub mod hyprland;
pub mod ipc;
pub mod keys;
pub mod layouts;
pub mod rules;
pub mod snapshot;
pub mod style;
pub mod table;
pub mod traits;
