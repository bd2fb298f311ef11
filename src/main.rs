//! Entry point for the **hyprrc** daemon.
//!
//! Loads the config (falling back to the compiled-in default on a
//! first-load failure), runs the autostart hook once, spawns the
//! Unix-socket [`EventSource`](hyprrc::traits::EventSource) on a
//! background thread, and processes incoming events on the main thread:
//! key chords resolve against the active snapshot, new windows consult
//! the floating rules, and reload swaps the snapshot atomically.

use hyprrc::action::Event;
use hyprrc::config::{self, Config};
use hyprrc::executor::{ExecError, Executor, Flow};
use hyprrc::hyprland::wm::HyprlandWm;
use hyprrc::ipc::listener::UnixSocketListener;
use hyprrc::snapshot::{Snapshot, SnapshotHandle};
use hyprrc::traits::{EventSource, StatusEvent, WindowManager};
use log::{debug, error, info, warn};
use std::sync::mpsc;

/// Default socket path for the event listener.
fn default_socket_path() -> String {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    format!("{}/hyprrc.sock", runtime)
}

/// Load the config file, falling back to the compiled-in default.
///
/// A missing or broken file at startup is reported, never fatal; the
/// stricter keep-the-old-snapshot semantics only apply to reloads,
/// where there is a previous good state to keep.
fn load_initial_snapshot() -> Snapshot {
    let path = config::config_file();
    let config = match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            warn!("config unusable ({}), using built-in defaults", e);
            Config::builtin()
        }
    };
    match Snapshot::build(&config) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("config invalid ({}), using built-in defaults", e);
            Snapshot::build(&Config::builtin()).expect("built-in config is valid")
        }
    }
}

/// Reload the config file, keeping the old snapshot on any error.
fn reload(handle: &SnapshotHandle) {
    match handle.reload() {
        Ok(snapshot) => info!(
            "config reloaded: {} bindings, {} groups, {} widgets",
            snapshot.table.len(),
            snapshot.groups.len(),
            snapshot.bar.widgets().len()
        ),
        Err(e) => error!("reload failed, keeping previous config: {}", e),
    }
}

fn main() {
    env_logger::init();

    let snapshot = load_initial_snapshot();
    let handle = SnapshotHandle::new(snapshot, config::config_file());

    // First startup only — reloads never re-run the script.
    hyprrc::autostart::run_once();

    // Status events are surfaced as log lines; a bar process could
    // consume them instead.
    let (status_tx, status_rx) = mpsc::channel::<StatusEvent>();
    std::thread::spawn(move || {
        for event in status_rx {
            match event {
                StatusEvent::SpawnFailed { command, reason } => {
                    warn!("spawn failed: {:?}: {}", command, reason)
                }
                other => debug!("status: {:?}", other),
            }
        }
    });

    let mut executor = Executor::new(HyprlandWm::new());
    executor.set_status_channel(status_tx);

    let (event_tx, event_rx) = mpsc::channel::<Event>();
    spawn_event_sources(event_tx);

    info!("hyprrc running");
    run_event_loop(&executor, &handle, event_rx);
    info!("exiting");
}

/// The single-threaded event loop.
fn run_event_loop<W: WindowManager>(
    executor: &Executor<W>,
    handle: &SnapshotHandle,
    events: mpsc::Receiver<Event>,
) {
    for event in events {
        match event {
            Event::Key(chord) => {
                let snapshot = handle.current();
                let Some(binding) = snapshot.table.resolve(&chord) else {
                    debug!("unbound chord {}", chord);
                    continue;
                };
                match executor.execute(&binding.action) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Reload) => reload(handle),
                    Ok(Flow::Shutdown) => break,
                    Err(ExecError::WindowManager(e)) => {
                        error!("{} ({}): {}", chord, binding.description, e)
                    }
                }
            }
            Event::WindowOpened(window) => {
                let snapshot = handle.current();
                if let Err(e) = executor.handle_window_opened(&window, &snapshot.rules) {
                    error!("window rule for {:?}: {}", window.title, e);
                }
            }
            Event::Reload => reload(handle),
            Event::Shutdown => break,
        }
    }
}

//  Helpers

fn spawn_event_sources(tx: mpsc::Sender<Event>) {
    let path = default_socket_path();
    std::thread::spawn(move || {
        let mut source = UnixSocketListener::new(&path);
        if let Err(e) = source.run(tx) {
            error!("socket listener error: {}", e);
        }
    });
}
