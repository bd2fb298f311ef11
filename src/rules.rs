//! Window-floating rules.
//!
//! When the compositor maps a new window it asks
//! [`FloatingRules::should_float`] whether the window should float
//! instead of tiling.  Rules are evaluated in declaration order and the
//! first match wins; a window matching no rule tiles normally.  The
//! check is a pure function over the window's class and title, safe to
//! run on every map event.

use crate::action::WindowInfo;
use serde::{Deserialize, Serialize};

/// A single floating predicate: exact match on window class or title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleMatch {
    /// Exact window-class match.
    Class(String),
    /// Exact window-title match.
    Title(String),
}

impl RuleMatch {
    /// Whether this predicate matches the window.
    pub fn matches(&self, window: &WindowInfo) -> bool {
        match self {
            RuleMatch::Class(class) => window.class == *class,
            RuleMatch::Title(title) => window.title == *title,
        }
    }
}

/// The ordered floating rule list.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingRules {
    rules: Vec<RuleMatch>,
}

/// Window classes that conventionally float: transient utility dialogs
/// that make no sense tiled.
const DEFAULT_FLOAT_CLASSES: &[&str] = &[
    "confirm",
    "dialog",
    "download",
    "error",
    "file_progress",
    "help",
    "splash",
    "toolbar",
];

impl FloatingRules {
    /// Rules from an explicit list only, in the given order.
    pub fn from_rules(rules: Vec<RuleMatch>) -> Self {
        Self { rules }
    }

    /// The conventional default rules followed by `user` rules.
    pub fn with_defaults(user: Vec<RuleMatch>) -> Self {
        let mut rules: Vec<RuleMatch> = DEFAULT_FLOAT_CLASSES
            .iter()
            .map(|c| RuleMatch::Class((*c).to_string()))
            .collect();
        rules.extend(user);
        Self { rules }
    }

    /// First-match-wins floating decision; no match tiles.
    pub fn should_float(&self, window: &WindowInfo) -> bool {
        self.rules.iter().any(|rule| rule.matches(window))
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[RuleMatch] {
        &self.rules
    }
}

impl Default for FloatingRules {
    /// Just the conventional default rules.
    fn default() -> Self {
        Self::with_defaults(Vec::new())
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn window(class: &str, title: &str) -> WindowInfo {
        WindowInfo {
            address: "0x1".into(),
            class: class.into(),
            title: title.into(),
        }
    }

    #[test]
    fn class_match_floats() {
        let rules = FloatingRules::from_rules(vec![RuleMatch::Class("ssh-askpass".into())]);
        assert!(rules.should_float(&window("ssh-askpass", "OpenSSH")));
        assert!(!rules.should_float(&window("firefox", "OpenSSH")));
    }

    #[test]
    fn title_match_floats() {
        let rules = FloatingRules::from_rules(vec![RuleMatch::Title("pinentry".into())]);
        assert!(rules.should_float(&window("gcr-prompter", "pinentry")));
        assert!(!rules.should_float(&window("gcr-prompter", "unlock")));
    }

    #[test]
    fn no_match_tiles() {
        let rules = FloatingRules::from_rules(vec![
            RuleMatch::Class("confirmreset".into()),
            RuleMatch::Title("branchdialog".into()),
        ]);
        assert!(!rules.should_float(&window("kitty", "~")));
    }

    #[test]
    fn matches_are_exact_not_substring() {
        let rules = FloatingRules::from_rules(vec![RuleMatch::Class("dialog".into())]);
        assert!(!rules.should_float(&window("dialog-helper", "x")));
        assert!(rules.should_float(&window("dialog", "x")));
    }

    #[test]
    fn evaluation_order_is_deterministic() {
        // Both rules match; the decision must reflect the first.
        // (Both predicates answer "float", so the observable property is
        // that reordering cannot change the outcome — and that a
        // window matched by rule A never consults rule B.)
        let a = RuleMatch::Class("gitk".into());
        let b = RuleMatch::Title("gitk".into());
        let forward = FloatingRules::from_rules(vec![a.clone(), b.clone()]);
        let backward = FloatingRules::from_rules(vec![b, a]);
        let w = window("gitk", "gitk");
        assert!(forward.should_float(&w));
        assert!(backward.should_float(&w));
    }

    #[test]
    fn defaults_precede_user_rules() {
        let rules = FloatingRules::with_defaults(vec![RuleMatch::Class("makebranch".into())]);
        let n = rules.rules().len();
        assert_eq!(rules.rules()[n - 1], RuleMatch::Class("makebranch".into()));
        assert!(rules.should_float(&window("splash", "loading")));
        assert!(rules.should_float(&window("makebranch", "gitk")));
    }

    #[test]
    fn rule_wire_format() {
        let r: RuleMatch = serde_json::from_str(r#"{"class": "ssh-askpass"}"#).unwrap();
        assert_eq!(r, RuleMatch::Class("ssh-askpass".into()));
        let r: RuleMatch = serde_json::from_str(r#"{"title": "pinentry"}"#).unwrap();
        assert_eq!(r, RuleMatch::Title("pinentry".into()));
    }
}
