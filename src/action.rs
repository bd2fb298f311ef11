//! Actions and types used throughout hyprrc.
//!
//! This module defines the vocabulary that all components share:
//! [`Action`] is the closed set of things a key binding can do, [`Event`]
//! is what arrives from the outside world, and [`Direction`] /
//! [`WindowInfo`] provide the supporting data types.
//!
//! Key bindings reference actions as plain data; nothing here performs
//! I/O.  Execution is the [`Executor`](crate::executor::Executor)'s job,
//! dispatching each variant exactly once through an exhaustive match.
//!
//! # Wire format
//!
//! Actions appear in config files as tagged JSON values:
//!
//! ```json
//! {"layout": {"focus": "left"}}
//! {"layout": "toggle_split"}
//! {"window": "close"}
//! {"spawn": "amixer -q set Master toggle"}
//! {"group": {"id": "3"}}
//! {"group": {"id": "3", "move_window": true}}
//! {"system": "reload_config"}
//! "prompt_spawn"
//! ```

use crate::groups::GroupId;
use crate::keys::KeyChord;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Direction for layout navigation and window movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Parse a direction string (case-insensitive).
fn parse_direction(s: &str) -> Option<Direction> {
    match s.trim().to_ascii_lowercase().as_str() {
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_direction(&s).ok_or_else(|| DeError::custom(format!("invalid direction: {:?}", s)))
    }
}

/// Commands addressed to the tiling layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutOp {
    /// Move focus to the adjacent window in the given direction.
    Focus(Direction),
    /// Move the focused window one position in the given direction.
    Shuffle(Direction),
    /// Grow the focused window toward the given direction.
    Grow(Direction),
    /// Move focus to the next window in stacking order.
    FocusNext,
    /// Reset all window sizes to the layout's defaults.
    Normalize,
    /// Toggle between split and unsplit presentation of the stack.
    ToggleSplit,
    /// Cycle to the next declared layout.
    NextLayout,
}

/// Commands addressed to the focused window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowOp {
    /// Close the focused window.
    Close,
}

/// A group command: switch to the group, or move the focused window
/// there (and follow it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupAction {
    /// Target group.
    pub id: GroupId,
    /// `false` = switch to the group; `true` = move the focused window
    /// to the group and switch along with it.
    #[serde(default)]
    pub move_window: bool,
}

/// Session-level commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemOp {
    /// Re-parse the config file and swap the active snapshot.
    ReloadConfig,
    /// Exit the daemon.
    Shutdown,
}

/// Everything a key binding can do.
///
/// A closed tagged enum instead of inline callbacks: the single
/// [`Executor::execute`](crate::executor::Executor::execute) match is
/// exhaustive, so adding a variant without handling it is a compile
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Send a command to the tiling layout.
    Layout(LayoutOp),
    /// Send a command to the focused window.
    Window(WindowOp),
    /// Spawn an external process, fire-and-forget.  The command line is
    /// split on whitespace; no shell is involved.
    Spawn(String),
    /// Switch to a group or move the focused window to it.
    Group(GroupAction),
    /// Reload the config or shut the daemon down.
    System(SystemOp),
    /// Open the bar's command prompt.
    PromptSpawn,
}

//  Mouse bindings

/// A mouse button, numbered the X11 way (1 = left, 2 = middle, 3 = right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MouseButton(pub u8);

/// What a mouse binding does to the window under the pointer.
///
/// `MoveFloating` and `ResizeFloating` are drag bindings; `BringToFront`
/// is a click binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseAction {
    /// Drag the window around in floating mode.
    MoveFloating,
    /// Drag-resize the window in floating mode.
    ResizeFloating,
    /// Raise the window above its siblings.
    BringToFront,
}

/// A (modifier-set, button, action) mouse binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseBinding {
    #[serde(default)]
    pub mods: crate::keys::Modifiers,
    pub button: MouseButton,
    pub action: MouseAction,
}

//  Window and event types

/// Information about a window, as reported by the compositor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    /// Compositor-assigned window address / id.
    pub address: String,
    /// Window class (the `xprop` WM_CLASS analog).
    pub class: String,
    /// Human-readable title.
    pub title: String,
}

/// Events delivered to the daemon's main loop.
///
/// Produced by [`EventSource`](crate::traits::EventSource)
/// implementations.  On the wire each event is one line of JSON:
///
/// ```json
/// {"key": {"mods": ["super", "shift"], "key": "h"}}
/// {"window_opened": {"address": "0x1f", "class": "pinentry", "title": "pinentry"}}
/// "reload"
/// "shutdown"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// A raw key chord forwarded by the compositor's key forwarder.
    Key(KeyChord),
    /// A window was mapped; the daemon decides whether it floats.
    WindowOpened(WindowInfo),
    /// Reload the config file.
    Reload,
    /// Exit the daemon.
    Shutdown,
}

//  Tests
