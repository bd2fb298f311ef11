//! Declared tiling layouts.
//!
//! The config lists the layouts the compositor should cycle through, in
//! order.  hyprrc implements no layout geometry itself — each entry is a
//! parameter block handed to the host's layout engine, and the list order
//! defines what `next_layout` means.

use crate::style::Color;
use serde::{Deserialize, Serialize};

/// One layout declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutChoice {
    /// Column-based tiling with focus-dependent border colors.
    Columns {
        #[serde(default = "default_border_width")]
        border_width: u32,
        #[serde(default = "default_margin")]
        margin: u32,
        #[serde(default = "default_border_focus")]
        border_focus: Color,
        #[serde(default = "default_border_normal")]
        border_normal: Color,
    },
    /// One maximized window at a time.
    Max,
}

impl LayoutChoice {
    /// Short name for logging and the `CurrentLayout` widget.
    pub fn name(&self) -> &'static str {
        match self {
            LayoutChoice::Columns { .. } => "columns",
            LayoutChoice::Max => "max",
        }
    }
}

pub(crate) fn default_border_width() -> u32 {
    3
}

pub(crate) fn default_margin() -> u32 {
    8
}

pub(crate) fn default_border_focus() -> Color {
    "#81a1c1".parse().expect("literal color")
}

pub(crate) fn default_border_normal() -> Color {
    "#2e3440".parse().expect("literal color")
}

/// Error from validating the layout list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutsError {
    /// The config declared no layouts; the compositor needs at least one.
    #[error("at least one layout must be declared")]
    Empty,
}

/// The ordered, non-empty list of declared layouts.
#[derive(Debug, Clone, PartialEq)]
pub struct Layouts {
    choices: Vec<LayoutChoice>,
}

impl Layouts {
    /// Validate and wrap the declared list.
    pub fn new(choices: Vec<LayoutChoice>) -> Result<Self, LayoutsError> {
        if choices.is_empty() {
            return Err(LayoutsError::Empty);
        }
        Ok(Self { choices })
    }

    /// The declared layouts, in cycling order.
    pub fn choices(&self) -> &[LayoutChoice] {
        &self.choices
    }

    /// Index of the layout after `current`, wrapping around.
    pub fn next_index(&self, current: usize) -> usize {
        (current + 1) % self.choices.len()
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_defaults_match_declared_values() {
        let layout: LayoutChoice = serde_json::from_str(r#"{"type": "columns"}"#).unwrap();
        match layout {
            LayoutChoice::Columns {
                border_width,
                margin,
                border_focus,
                border_normal,
            } => {
                assert_eq!(border_width, 3);
                assert_eq!(margin, 8);
                assert_eq!(border_focus.as_str(), "#81a1c1");
                assert_eq!(border_normal.as_str(), "#2e3440");
            }
            other => panic!("expected columns, got {:?}", other),
        }
    }

    #[test]
    fn max_layout_parses() {
        let layout: LayoutChoice = serde_json::from_str(r#"{"type": "max"}"#).unwrap();
        assert_eq!(layout, LayoutChoice::Max);
        assert_eq!(layout.name(), "max");
    }

    #[test]
    fn empty_layout_list_is_rejected() {
        assert_eq!(Layouts::new(Vec::new()).unwrap_err(), LayoutsError::Empty);
    }

    #[test]
    fn next_index_cycles() {
        let layouts = Layouts::new(vec![
            serde_json::from_str(r#"{"type": "columns"}"#).unwrap(),
            LayoutChoice::Max,
        ])
        .unwrap();
        assert_eq!(layouts.next_index(0), 1);
        assert_eq!(layouts.next_index(1), 0);
    }
}
