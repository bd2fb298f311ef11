//! IPC listener that accepts events over a Unix socket.
//!
//! The compositor's key forwarder, window-open hooks, and external
//! tools (`hyprrc-msg`, scripts) connect to the socket and send
//! newline-delimited JSON events.

pub mod listener;
