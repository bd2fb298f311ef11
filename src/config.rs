//! Application configuration.
//!
//! The configuration is loaded from
//! `$XDG_CONFIG_HOME/hyprrc/config.json`.  Every section is optional —
//! a minimal `{}` file is valid and each section falls back to its
//! compiled-in default — but the shipped default configuration
//! ([`Config::builtin`]) carries a complete setup: bindings, nine
//! groups, two layouts, a full bar, and the conventional float rules.
//!
//! # Example
//!
//! ```json
//! {
//!   "modifier": "super",
//!   "keys": [
//!     {"chord": "super+Return", "action": {"spawn": "kitty"}, "desc": "Launch terminal"}
//!   ],
//!   "groups": ["1", "2", "3"],
//!   "bar": {
//!     "height": 24,
//!     "widgets": [{"type": "group_box"}, {"type": "window_title"}]
//!   }
//! }
//! ```

use crate::action::{Action, MouseBinding};
use crate::bar::{BarError, Widget};
use crate::groups::{GroupId, GroupsError};
use crate::keys::KeyChord;
use crate::layouts::{self, LayoutChoice, LayoutsError};
use crate::rules::RuleMatch;
use crate::style::Style;
use crate::table::{KeyBinding, TableError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading, parsing, or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unknown primary modifier {0:?}")]
    UnknownModifier(String),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Groups(#[from] GroupsError),
    #[error(transparent)]
    Layouts(#[from] LayoutsError),
    #[error(transparent)]
    Bar(#[from] BarError),
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/hyprrc`).
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    PathBuf::from(base).join("hyprrc")
}

/// Path of the config file.
pub fn config_file() -> PathBuf {
    config_dir().join("config.json")
}

/// One declared key binding: a chord string, an action, and an optional
/// description shown by binding-listing tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindingDecl {
    pub chord: KeyChord,
    pub action: Action,
    #[serde(default)]
    pub desc: String,
}

impl From<KeyBindingDecl> for KeyBinding {
    fn from(decl: KeyBindingDecl) -> Self {
        KeyBinding {
            chord: decl.chord,
            action: decl.action,
            description: decl.desc,
        }
    }
}

/// Bar geometry and widget sequence, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarConfig {
    #[serde(default = "default_bar_height")]
    pub height: u32,
    /// Outer margin, `[top, right, bottom, left]`.
    #[serde(default)]
    pub margin: [u32; 4],
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            height: default_bar_height(),
            margin: [0; 4],
            widgets: Vec::new(),
        }
    }
}

/// How window activation requests affect focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusOnActivation {
    /// Focus the window only if it is on the visible group.
    #[default]
    Smart,
    /// Always focus.
    Focus,
    /// Never steal focus.
    Never,
}

/// Miscellaneous window-manager behavior toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub follow_mouse_focus: bool,
    pub bring_front_click: bool,
    pub cursor_warp: bool,
    pub auto_fullscreen: bool,
    /// Respect windows that minimize themselves on focus loss.
    pub auto_minimize: bool,
    pub focus_on_window_activation: FocusOnActivation,
    /// Name reported to clients that sniff the WM identity (java UI
    /// toolkits, mostly).
    pub wm_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            follow_mouse_focus: true,
            bring_front_click: false,
            cursor_warp: false,
            auto_fullscreen: true,
            auto_minimize: true,
            focus_on_window_activation: FocusOnActivation::Smart,
            wm_name: "LG3D".to_string(),
        }
    }
}

/// Top-level configuration, as declared in the file.
///
/// This is the parse target only; the daemon never works from a
/// `Config` directly.  [`Snapshot::build`](crate::snapshot::Snapshot::build)
/// turns it into the immutable tables everything else reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Primary modifier used for the generated group bindings.
    #[serde(default = "default_modifier")]
    pub modifier: String,
    #[serde(default)]
    pub keys: Vec<KeyBindingDecl>,
    #[serde(default = "default_groups")]
    pub groups: Vec<GroupId>,
    #[serde(default = "default_layouts")]
    pub layouts: Vec<LayoutChoice>,
    #[serde(default)]
    pub widget_defaults: Style,
    #[serde(default)]
    pub bar: BarConfig,
    #[serde(default)]
    pub mouse: Vec<MouseBinding>,
    /// User floating rules, appended after the conventional defaults.
    #[serde(default)]
    pub float_rules: Vec<RuleMatch>,
    #[serde(default)]
    pub settings: Settings,
}

fn default_modifier() -> String {
    "super".to_string()
}

fn default_bar_height() -> u32 {
    24
}

fn default_groups() -> Vec<GroupId> {
    ('1'..='9').map(GroupId::from).collect()
}

fn default_layouts() -> Vec<LayoutChoice> {
    vec![
        LayoutChoice::Columns {
            border_width: layouts::default_border_width(),
            margin: layouts::default_margin(),
            border_focus: layouts::default_border_focus(),
            border_normal: layouts::default_border_normal(),
        },
        LayoutChoice::Max,
    ]
}

impl Config {
    /// Load configuration from the JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The complete shipped configuration, embedded at compile time.
    ///
    /// Used when no config file exists yet (and as the fallback when the
    /// file at startup is unreadable).
    pub fn builtin() -> Self {
        serde_json::from_str(include_str!("../hyprrc.default.json"))
            .expect("embedded default config is valid")
    }

    /// An empty configuration: serde's per-section defaults, no explicit
    /// bindings, no widgets.
    pub fn empty() -> Self {
        serde_json::from_str("{}").expect("empty config is valid")
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Direction, LayoutOp};

    #[test]
    fn deserialize_minimal_config_uses_defaults() {
        let cfg = Config::empty();
        assert_eq!(cfg.modifier, "super");
        assert!(cfg.keys.is_empty());
        assert_eq!(cfg.groups.len(), 9);
        assert_eq!(cfg.layouts.len(), 2);
        assert_eq!(cfg.bar.height, 24);
        assert!(cfg.bar.widgets.is_empty());
        assert!(cfg.settings.follow_mouse_focus);
        assert_eq!(cfg.settings.wm_name, "LG3D");
    }

    #[test]
    fn deserialize_full_sections() {
        let json = r#"{
            "modifier": "super",
            "keys": [
                {"chord": "super+h", "action": {"layout": {"focus": "left"}}, "desc": "Move focus to left"}
            ],
            "groups": ["1", "2", "3"],
            "layouts": [{"type": "max"}],
            "widget_defaults": {"font": "RobotoMono Nerd Font", "font_size": 15, "padding": 3},
            "bar": {
                "height": 24,
                "margin": [10, 0, 0, 0],
                "widgets": [{"type": "group_box"}, {"type": "window_title"}]
            },
            "mouse": [{"mods": ["super"], "button": 1, "action": "move_floating"}],
            "float_rules": [{"class": "ssh-askpass"}, {"title": "pinentry"}],
            "settings": {"cursor_warp": true}
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.keys.len(), 1);
        assert_eq!(
            cfg.keys[0].action,
            Action::Layout(LayoutOp::Focus(Direction::Left))
        );
        assert_eq!(cfg.groups.len(), 3);
        assert_eq!(cfg.layouts, vec![LayoutChoice::Max]);
        assert_eq!(cfg.widget_defaults.font, "RobotoMono Nerd Font");
        assert_eq!(cfg.bar.margin, [10, 0, 0, 0]);
        assert_eq!(cfg.bar.widgets.len(), 2);
        assert_eq!(cfg.mouse.len(), 1);
        assert_eq!(cfg.float_rules.len(), 2);
        assert!(cfg.settings.cursor_warp);
        // Unspecified settings keep their defaults.
        assert!(cfg.settings.auto_fullscreen);
    }

    #[test]
    fn unknown_top_level_keys_are_ignored() {
        let json = r#"{"groups": ["1"], "future_section": {"key": 42}}"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.groups.len(), 1);
    }

    #[test]
    fn builtin_config_parses() {
        let cfg = Config::builtin();
        assert!(!cfg.keys.is_empty());
        assert_eq!(cfg.groups.len(), 9);
        assert!(!cfg.bar.widgets.is_empty());
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let path = PathBuf::from("/nonexistent/hyprrc/config.json");
        let err = Config::load(&path).unwrap_err();
        match err {
            ConfigError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected io error, got {:?}", other),
        }
    }

    #[test]
    fn load_reports_malformed_json_as_parse_error() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("hyprrc-test-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{not json").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        let _ = std::fs::remove_file(&path);
    }
}
