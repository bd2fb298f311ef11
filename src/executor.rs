//! The action executor — the single point where declarative [`Action`]s
//! become side effects.
//!
//! [`Executor`] is generic over any [`WindowManager`] implementation, so
//! the dispatch logic is completely independent of Hyprland or any other
//! concrete backend.  The `execute` match is exhaustive over the
//! [`Action`] enum: adding a variant without handling it here is a
//! compile error.
//!
//! Process spawns are fire-and-forget.  A failed launch is logged and
//! reported through the status channel exactly once; it is never retried
//! and never fails the event loop.

use crate::action::{Action, GroupAction, SystemOp, WindowInfo, WindowOp};
use crate::rules::FloatingRules;
use crate::traits::{StatusEvent, WindowManager};
use log::{debug, info, warn};
use std::sync::mpsc;

/// Possible errors from the executor.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The window manager returned an error.
    #[error("window manager error: {0}")]
    WindowManager(String),
}

/// What the main loop should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep processing events.
    Continue,
    /// Re-parse the config and swap the snapshot.
    Reload,
    /// Exit the daemon.
    Shutdown,
}

/// Dispatches actions against a window-manager backend.
///
/// # Typical usage
///
/// ```ignore
/// let mut executor = Executor::new(HyprlandWm::new());
/// executor.execute(&Action::Layout(LayoutOp::Focus(Direction::Left)))?;
/// ```
pub struct Executor<W: WindowManager> {
    wm: W,
    status_tx: Option<mpsc::Sender<StatusEvent>>,
}

impl<W: WindowManager> Executor<W> {
    /// Create an executor over the given backend.
    pub fn new(wm: W) -> Self {
        Self {
            wm,
            status_tx: None,
        }
    }

    /// Attach a status event channel.
    ///
    /// The executor will send [`StatusEvent::GroupSwitched`] after group
    /// commands, [`StatusEvent::PromptOpened`] for the prompt action,
    /// and [`StatusEvent::SpawnFailed`] when an external command cannot
    /// launch.  The receiver can be owned by any independent listener —
    /// a bar process, a notification shim, a test.
    pub fn set_status_channel(&mut self, tx: mpsc::Sender<StatusEvent>) {
        self.status_tx = Some(tx);
    }

    /// A shared reference to the underlying window manager.
    pub fn wm(&self) -> &W {
        &self.wm
    }

    /// Execute a single [`Action`].
    ///
    /// System actions do not act here — they are routed back to the
    /// main loop through the returned [`Flow`], because reload and
    /// shutdown concern state the executor does not own.
    pub fn execute(&self, action: &Action) -> Result<Flow, ExecError> {
        match action {
            Action::Layout(op) => {
                debug!("layout {:?}", op);
                self.wm
                    .layout(*op)
                    .map_err(|e| ExecError::WindowManager(e.to_string()))?;
            }

            Action::Window(WindowOp::Close) => {
                info!("close focused window");
                self.wm
                    .close_window()
                    .map_err(|e| ExecError::WindowManager(e.to_string()))?;
            }

            Action::Spawn(command) => {
                self.spawn(command);
            }

            Action::Group(GroupAction { id, move_window }) => {
                if *move_window {
                    info!("move focused window to group {} and follow", id);
                    self.wm
                        .move_window_to_group(*id, true)
                        .map_err(|e| ExecError::WindowManager(e.to_string()))?;
                } else {
                    info!("switch to group {}", id);
                    self.wm
                        .switch_group(*id)
                        .map_err(|e| ExecError::WindowManager(e.to_string()))?;
                }
                self.notify(StatusEvent::GroupSwitched(*id));
            }

            Action::System(SystemOp::ReloadConfig) => {
                info!("reload requested");
                return Ok(Flow::Reload);
            }

            Action::System(SystemOp::Shutdown) => {
                info!("shutdown requested");
                return Ok(Flow::Shutdown);
            }

            Action::PromptSpawn => {
                debug!("open command prompt");
                self.notify(StatusEvent::PromptOpened);
            }
        }
        Ok(Flow::Continue)
    }

    /// Decide whether a newly mapped window floats, and tell the window
    /// manager if it does.  Returns the decision.
    pub fn handle_window_opened(
        &self,
        window: &WindowInfo,
        rules: &FloatingRules,
    ) -> Result<bool, ExecError> {
        if rules.should_float(window) {
            info!("floating {:?} ({})", window.title, window.class);
            self.wm
                .set_floating(&window.address)
                .map_err(|e| ExecError::WindowManager(e.to_string()))?;
            Ok(true)
        } else {
            debug!("tiling {:?} ({})", window.title, window.class);
            Ok(false)
        }
    }

    /// Launch an external command, fire-and-forget.
    ///
    /// The command line is split on whitespace; no shell is involved.
    fn spawn(&self, command: &str) {
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            warn!("refusing to spawn empty command");
            self.notify(StatusEvent::SpawnFailed {
                command: command.to_string(),
                reason: "empty command".to_string(),
            });
            return;
        };
        info!("spawn {:?}", command);
        match std::process::Command::new(program).args(parts).spawn() {
            Ok(mut child) => {
                // Reap the exit status off the hot path; nothing is done
                // with it.
                std::thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(e) => {
                warn!("failed to spawn {:?}: {}", command, e);
                self.notify(StatusEvent::SpawnFailed {
                    command: command.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    fn notify(&self, event: StatusEvent) {
        if let Some(tx) = &self.status_tx {
            let _ = tx.send(event);
        }
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Direction, LayoutOp};
    use crate::groups::GroupId;
    use crate::rules::RuleMatch;
    use std::sync::Mutex;

    /// A test double that records every call made to it and can be told
    /// to fail.
    #[derive(Debug, Default)]
    struct MockWm {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    impl MockWm {
        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) -> Result<(), MockError> {
            if self.fail {
                return Err(MockError);
            }
            self.calls.lock().unwrap().push(call);
            Ok(())
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock wm failure")]
    struct MockError;

    impl WindowManager for MockWm {
        type Error = MockError;

        fn layout(&self, op: LayoutOp) -> Result<(), MockError> {
            self.record(format!("layout {:?}", op))
        }

        fn close_window(&self) -> Result<(), MockError> {
            self.record("close".into())
        }

        fn switch_group(&self, group: GroupId) -> Result<(), MockError> {
            self.record(format!("switch {}", group))
        }

        fn move_window_to_group(&self, group: GroupId, follow: bool) -> Result<(), MockError> {
            self.record(format!("move {} follow={}", group, follow))
        }

        fn set_floating(&self, address: &str) -> Result<(), MockError> {
            self.record(format!("float {}", address))
        }

        fn active_window(&self) -> Result<Option<WindowInfo>, MockError> {
            Ok(None)
        }
    }

    fn executor() -> Executor<MockWm> {
        Executor::new(MockWm::default())
    }

    #[test]
    fn layout_actions_reach_the_window_manager() {
        let ex = executor();
        let flow = ex
            .execute(&Action::Layout(LayoutOp::Focus(Direction::Left)))
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(ex.wm().calls(), vec!["layout Focus(Left)"]);
    }

    #[test]
    fn group_switch_and_move_dispatch_differently() {
        let ex = executor();
        ex.execute(&Action::Group(GroupAction {
            id: '3'.into(),
            move_window: false,
        }))
        .unwrap();
        ex.execute(&Action::Group(GroupAction {
            id: '4'.into(),
            move_window: true,
        }))
        .unwrap();
        assert_eq!(ex.wm().calls(), vec!["switch 3", "move 4 follow=true"]);
    }

    #[test]
    fn group_commands_emit_status_events() {
        let mut ex = executor();
        let (tx, rx) = mpsc::channel();
        ex.set_status_channel(tx);
        ex.execute(&Action::Group(GroupAction {
            id: '2'.into(),
            move_window: false,
        }))
        .unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            StatusEvent::GroupSwitched('2'.into())
        );
    }

    #[test]
    fn system_actions_route_back_to_the_loop() {
        let ex = executor();
        assert_eq!(
            ex.execute(&Action::System(SystemOp::ReloadConfig)).unwrap(),
            Flow::Reload
        );
        assert_eq!(
            ex.execute(&Action::System(SystemOp::Shutdown)).unwrap(),
            Flow::Shutdown
        );
        // Neither touched the window manager.
        assert!(ex.wm().calls().is_empty());
    }

    #[test]
    fn prompt_action_emits_status_event_only() {
        let mut ex = executor();
        let (tx, rx) = mpsc::channel();
        ex.set_status_channel(tx);
        let flow = ex.execute(&Action::PromptSpawn).unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(rx.try_recv().unwrap(), StatusEvent::PromptOpened);
        assert!(ex.wm().calls().is_empty());
    }

    #[test]
    fn wm_failure_surfaces_as_exec_error() {
        let ex = Executor::new(MockWm::failing());
        let err = ex
            .execute(&Action::Layout(LayoutOp::Normalize))
            .unwrap_err();
        assert!(matches!(err, ExecError::WindowManager(_)));
    }

    #[test]
    fn failed_spawn_reports_and_continues() {
        let mut ex = executor();
        let (tx, rx) = mpsc::channel();
        ex.set_status_channel(tx);
        let flow = ex
            .execute(&Action::Spawn("/nonexistent/hyprrc-test-binary".into()))
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        match rx.try_recv().unwrap() {
            StatusEvent::SpawnFailed { command, .. } => {
                assert_eq!(command, "/nonexistent/hyprrc-test-binary");
            }
            other => panic!("expected spawn failure, got {:?}", other),
        }
    }

    #[test]
    fn empty_spawn_reports_and_continues() {
        let mut ex = executor();
        let (tx, rx) = mpsc::channel();
        ex.set_status_channel(tx);
        ex.execute(&Action::Spawn("   ".into())).unwrap();
        assert!(matches!(
            rx.try_recv().unwrap(),
            StatusEvent::SpawnFailed { .. }
        ));
    }

    #[test]
    fn matching_window_is_floated() {
        let ex = executor();
        let rules = FloatingRules::from_rules(vec![RuleMatch::Class("pinentry".into())]);
        let floated = ex
            .handle_window_opened(
                &WindowInfo {
                    address: "0x7".into(),
                    class: "pinentry".into(),
                    title: "pinentry".into(),
                },
                &rules,
            )
            .unwrap();
        assert!(floated);
        assert_eq!(ex.wm().calls(), vec!["float 0x7"]);
    }

    #[test]
    fn non_matching_window_tiles_without_wm_calls() {
        let ex = executor();
        let rules = FloatingRules::from_rules(vec![RuleMatch::Class("pinentry".into())]);
        let floated = ex
            .handle_window_opened(
                &WindowInfo {
                    address: "0x8".into(),
                    class: "kitty".into(),
                    title: "~".into(),
                },
                &rules,
            )
            .unwrap();
        assert!(!floated);
        assert!(ex.wm().calls().is_empty());
    }
}
