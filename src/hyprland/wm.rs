//! [`WindowManager`] implementation backed by Hyprland IPC.
//!
//! Communicates directly with Hyprland through its Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`,
//! avoiding any shell command invocation or third-party crate for socket
//! discovery.
//!
//! Layout commands map onto `dispatch` strings; groups map onto
//! Hyprland workspaces (digit identifiers become numeric workspaces,
//! anything else a named one).

use crate::action::{Direction, LayoutOp, WindowInfo};
use crate::groups::GroupId;
use crate::traits::WindowManager;
use serde::Deserialize;
use std::cell::Cell;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Hyprland-backed window manager.
///
/// All communication happens over Hyprland's IPC socket.  No child
/// processes are spawned; each method call opens a short-lived request.
pub struct HyprlandWm {
    /// Index into [`LAYOUT_CYCLE`] of the layout believed active.
    layout_index: Cell<usize>,
}

/// Compositor layout modes cycled by `next_layout`.
const LAYOUT_CYCLE: &[&str] = &["dwindle", "master"];

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandWmError(String);

impl Default for HyprlandWm {
    fn default() -> Self {
        Self::new()
    }
}

impl HyprlandWm {
    /// Create a new handle.  No connection is opened eagerly.
    pub fn new() -> Self {
        Self {
            layout_index: Cell::new(0),
        }
    }
}

//  Direct Hyprland IPC helpers

/// Resolve the Hyprland command socket path.
///
/// Hyprland ≥ 0.40 stores its sockets at
/// `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
fn socket_path() -> Result<PathBuf, HyprlandWmError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandWmError("XDG_RUNTIME_DIR not set".into()))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandWmError("HYPRLAND_INSTANCE_SIGNATURE not set".into()))?;
    Ok(PathBuf::from(format!(
        "{}/hypr/{}/.socket.sock",
        runtime_dir, his
    )))
}

/// Send a raw command to the Hyprland command socket and return the
/// response as a string.
fn ipc_request(command: &str) -> Result<String, HyprlandWmError> {
    let path = socket_path()?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandWmError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(command.as_bytes())
        .map_err(|e| HyprlandWmError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandWmError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandWmError(format!("utf-8: {}", e)))
}

/// Send a JSON data query (`j/<command>`) and return the raw JSON string.
fn ipc_json(data_command: &str) -> Result<String, HyprlandWmError> {
    ipc_request(&format!("j/{}", data_command))
}

/// Send a dispatch command and check for `"ok"`.
fn ipc_dispatch(args: &str) -> Result<(), HyprlandWmError> {
    let response = ipc_request(&format!("/dispatch {}", args))?;
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandWmError(format!("dispatch error: {}", response)))
    }
}

/// Set a config keyword and check for `"ok"`.
fn ipc_keyword(keyword: &str, value: &str) -> Result<(), HyprlandWmError> {
    let response = ipc_request(&format!("/keyword {} {}", keyword, value))?;
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandWmError(format!("keyword error: {}", response)))
    }
}

//  Command string mapping

/// Single-letter direction argument used by `movefocus` / `movewindow`.
fn direction_arg(direction: Direction) -> &'static str {
    match direction {
        Direction::Left => "l",
        Direction::Right => "r",
        Direction::Up => "u",
        Direction::Down => "d",
    }
}

/// Pixel deltas for `resizeactive` growing toward `direction`.
fn resize_args(direction: Direction) -> &'static str {
    match direction {
        Direction::Left => "-40 0",
        Direction::Right => "40 0",
        Direction::Up => "0 -40",
        Direction::Down => "0 40",
    }
}

/// Workspace reference for a group: digits address numeric workspaces,
/// anything else a named workspace.
fn workspace_ref(group: GroupId) -> String {
    let c = group.as_char();
    if c.is_ascii_digit() {
        c.to_string()
    } else {
        format!("name:{}", c)
    }
}

//  Minimal serde structs for the JSON we care about

/// Subset of the JSON object returned by `j/activewindow`.
#[derive(Deserialize)]
struct ActiveWindowJson {
    address: String,
    class: String,
    title: String,
}

//  WindowManager implementation

impl WindowManager for HyprlandWm {
    type Error = HyprlandWmError;

    fn layout(&self, op: LayoutOp) -> Result<(), Self::Error> {
        match op {
            LayoutOp::Focus(d) => ipc_dispatch(&format!("movefocus {}", direction_arg(d))),
            LayoutOp::Shuffle(d) => ipc_dispatch(&format!("movewindow {}", direction_arg(d))),
            LayoutOp::Grow(d) => ipc_dispatch(&format!("resizeactive {}", resize_args(d))),
            LayoutOp::FocusNext => ipc_dispatch("cyclenext"),
            LayoutOp::Normalize => ipc_dispatch("splitratio exact 0.5"),
            LayoutOp::ToggleSplit => ipc_dispatch("togglesplit"),
            LayoutOp::NextLayout => {
                let next = (self.layout_index.get() + 1) % LAYOUT_CYCLE.len();
                ipc_keyword("general:layout", LAYOUT_CYCLE[next])?;
                self.layout_index.set(next);
                Ok(())
            }
        }
    }

    fn close_window(&self) -> Result<(), Self::Error> {
        ipc_dispatch("killactive")
    }

    fn switch_group(&self, group: GroupId) -> Result<(), Self::Error> {
        ipc_dispatch(&format!("workspace {}", workspace_ref(group)))
    }

    fn move_window_to_group(&self, group: GroupId, follow: bool) -> Result<(), Self::Error> {
        let dispatch = if follow {
            "movetoworkspace"
        } else {
            "movetoworkspacesilent"
        };
        ipc_dispatch(&format!("{} {}", dispatch, workspace_ref(group)))
    }

    fn set_floating(&self, address: &str) -> Result<(), Self::Error> {
        ipc_dispatch(&format!("setfloating address:{}", address))
    }

    fn active_window(&self) -> Result<Option<WindowInfo>, Self::Error> {
        let json = ipc_json("activewindow")?;
        // Hyprland returns an empty object `{}` when no window is focused.
        if json.trim() == "{}" {
            return Ok(None);
        }
        let w: ActiveWindowJson =
            serde_json::from_str(&json).map_err(|e| HyprlandWmError(format!("parse: {}", e)))?;
        Ok(Some(WindowInfo {
            address: w.address,
            class: w.class,
            title: w.title,
        }))
    }
}

//  Tests
