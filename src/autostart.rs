//! The one-shot autostart hook.
//!
//! On first startup the daemon runs `$XDG_CONFIG_HOME/hyprrc/autostart.sh`
//! once, fire-and-forget: no supervision, no exit-code handling, no
//! restart policy.  Config reloads never re-run it — the guard is a
//! process-wide [`Once`], so calling [`run_once`] again is a no-op.

use crate::config;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Once;

static STARTED: Once = Once::new();

/// Path of the autostart script.
pub fn script_path() -> PathBuf {
    config::config_dir().join("autostart.sh")
}

/// Run the autostart script, at most once per daemon lifetime.
///
/// A missing or unlaunchable script is logged and otherwise ignored;
/// there is nothing to retry.
pub fn run_once() {
    STARTED.call_once(|| {
        let path = script_path();
        if !path.exists() {
            info!("no autostart script at {}", path.display());
            return;
        }
        info!("running autostart script {}", path.display());
        match std::process::Command::new(&path).spawn() {
            Ok(mut child) => {
                // Reap the exit status off the hot path; nothing is done
                // with it.
                std::thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(e) => {
                warn!("failed to run autostart script {}: {}", path.display(), e);
            }
        }
    });
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_lives_in_the_config_directory() {
        let path = script_path();
        assert!(path.ends_with("hyprrc/autostart.sh"));
    }

    #[test]
    fn repeated_calls_are_a_no_op() {
        // The guard is process-wide; with no script present both calls
        // fall through the existence check without side effects.
        run_once();
        run_once();
    }
}
