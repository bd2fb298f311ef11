//! Unix-socket [`EventSource`] implementation.
//!
//! Binds a Unix stream socket and accepts one connection at a time.
//! Each line received is parsed as a JSON-encoded [`Event`].  This is
//! how everything reaches the daemon: the compositor's key forwarder
//! sends raw chords, its window hook sends newly mapped windows, and
//! external tools send control messages.
//!
//! # Wire format
//!
//! Every message is a single line of JSON followed by `\n`:
//!
//! ```json
//! {"key": {"mods": ["super", "shift"], "key": "h"}}
//! {"window_opened": {"address": "0x1f", "class": "pinentry", "title": "pinentry"}}
//! "reload"
//! "shutdown"
//! ```

use crate::action::Event;
use crate::traits::EventSource;
use log::{debug, error, info};
use std::io::{BufRead, BufReader};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// An [`EventSource`] that listens on a Unix stream socket for
/// JSON-encoded events.
///
/// Each accepted connection can send multiple newline-delimited JSON
/// events.  When the connection closes, the listener waits for the
/// next one.  A malformed line is logged and skipped; it never takes
/// the listener down.
pub struct UnixSocketListener {
    path: PathBuf,
}

/// Errors produced by the Unix socket listener.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UnixSocketListener {
    /// Create a new listener bound to `path`.
    ///
    /// The socket file is created when [`run`](EventSource::run) is
    /// called; a stale file from a previous run is removed first.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The filesystem path of the socket.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain one client connection into `sink`.
    ///
    /// Returns `false` once the sink is gone, which tells the accept
    /// loop to shut down.
    fn drain_client(stream: UnixStream, sink: &mpsc::Sender<Event>) -> bool {
        for line in BufReader::new(stream).lines() {
            let text = match line {
                Ok(text) => text,
                Err(e) => {
                    error!("read error: {}", e);
                    return true;
                }
            };
            if text.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Event>(&text) {
                Ok(event) => {
                    debug!("received {:?}", event);
                    if sink.send(event).is_err() {
                        return false;
                    }
                }
                Err(e) => error!("bad event: {} - {}", text, e),
            }
        }
        debug!("client disconnected");
        true
    }
}

impl EventSource for UnixSocketListener {
    type Error = ListenerError;

    /// Bind the socket and start accepting connections.
    ///
    /// This method **blocks** indefinitely.  Run it on a dedicated
    /// thread.
    fn run(&mut self, sink: mpsc::Sender<Event>) -> Result<(), Self::Error> {
        // Remove stale socket if present.
        let _ = std::fs::remove_file(&self.path);

        let listener = UnixListener::bind(&self.path)?;
        info!("listening on {}", self.path.display());

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    debug!("client connected");
                    if !Self::drain_client(stream, &sink) {
                        info!("sink closed, shutting down");
                        return Ok(());
                    }
                }
                Err(e) => error!("accept error: {}", e),
            }
        }
        Ok(())
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Monotonic counter to generate unique socket paths per test.
    static TEST_ID: AtomicU32 = AtomicU32::new(0);

    fn tmp_socket_path() -> PathBuf {
        let id = TEST_ID.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "hyprrc-test-{}-{}.sock",
            std::process::id(),
            id
        ))
    }

    /// Spawn a listener, write `lines` to it, and collect whatever
    /// events come out the other side.
    fn round_trip(lines: &[&str]) -> Vec<Event> {
        let path = tmp_socket_path();
        let path_clone = path.clone();
        let (tx, rx) = mpsc::channel();

        let _handle = std::thread::spawn(move || {
            let mut listener = UnixSocketListener::new(&path_clone);
            let _ = listener.run(tx);
        });

        // Give the listener a moment to bind.
        std::thread::sleep(Duration::from_millis(150));

        {
            let mut stream = UnixStream::connect(&path).expect("connect");
            for line in lines {
                writeln!(stream, "{}", line).unwrap();
            }
            stream.shutdown(std::net::Shutdown::Write).unwrap();
        }

        // Give the listener a moment to process.
        std::thread::sleep(Duration::from_millis(150));
        let events = rx.try_iter().collect();
        let _ = std::fs::remove_file(&path);
        events
    }

    #[test]
    fn events_round_trip_over_the_socket() {
        let events = round_trip(&[
            r#"{"key": {"mods": ["super"], "key": "h"}}"#,
            r#"{"window_opened": {"address": "0x1f", "class": "pinentry", "title": "pinentry"}}"#,
            r#""reload""#,
        ]);

        assert_eq!(events.len(), 3);
        assert_eq!(events[0], Event::Key("super+h".parse().unwrap()));
        match &events[1] {
            Event::WindowOpened(w) => assert_eq!(w.class, "pinentry"),
            other => panic!("expected window event, got {:?}", other),
        }
        assert_eq!(events[2], Event::Reload);
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let events = round_trip(&[
            "not json at all",
            // An unknown modifier is rejected at parse time, not later.
            r#"{"key": {"mods": ["hyper"], "key": "h"}}"#,
            "",
            r#""shutdown""#,
        ]);
        // Only the valid event should have arrived.
        assert_eq!(events, vec![Event::Shutdown]);
    }

    #[test]
    fn consecutive_connections_are_served() {
        let path = tmp_socket_path();
        let path_clone = path.clone();
        let (tx, rx) = mpsc::channel();

        let _handle = std::thread::spawn(move || {
            let mut listener = UnixSocketListener::new(&path_clone);
            let _ = listener.run(tx);
        });
        std::thread::sleep(Duration::from_millis(150));

        for _ in 0..2 {
            let mut stream = UnixStream::connect(&path).expect("connect");
            writeln!(stream, r#""reload""#).unwrap();
            stream.shutdown(std::net::Shutdown::Write).unwrap();
            std::thread::sleep(Duration::from_millis(100));
        }

        let events: Vec<Event> = rx.try_iter().collect();
        assert_eq!(events, vec![Event::Reload, Event::Reload]);

        let _ = std::fs::remove_file(&path);
    }
}
