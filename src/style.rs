//! Shared styling vocabulary: colors, widget style parameters, and the
//! power-line decoration hint.
//!
//! Styles compose explicitly: the bar declares one [`Style`] of defaults
//! and each widget carries a partial [`StyleOverride`]; the two are merged
//! field by field with [`StyleOverride::resolve`].  There is no dynamic
//! dict merging anywhere.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error from parsing a color literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}: expected #rrggbb or #rrggbbaa")]
pub struct ColorError(String);

/// A validated hex RGB/RGBA color, stored normalized as lowercase
/// `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color(String);

impl Color {
    /// The normalized `#`-prefixed hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let valid_len = hex.len() == 6 || hex.len() == 8;
        if !valid_len || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError(s.to_string()));
        }
        Ok(Color(format!("#{}", hex.to_ascii_lowercase())))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(DeError::custom)
    }
}

/// Fully resolved style parameters for one widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub font: String,
    pub font_size: u32,
    pub padding: u32,
    pub foreground: Color,
    pub background: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font: "sans".to_string(),
            font_size: 15,
            padding: 3,
            foreground: "#ffffff".parse().expect("literal color"),
            background: "#000000".parse().expect("literal color"),
        }
    }
}

/// Partial style carried by a widget declaration; unset fields fall back
/// to the bar-level defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
}

impl StyleOverride {
    /// Merge this override over `defaults`, field by field.
    pub fn resolve(&self, defaults: &Style) -> Style {
        Style {
            font: self.font.clone().unwrap_or_else(|| defaults.font.clone()),
            font_size: self.font_size.unwrap_or(defaults.font_size),
            padding: self.padding.unwrap_or(defaults.padding),
            foreground: self
                .foreground
                .clone()
                .unwrap_or_else(|| defaults.foreground.clone()),
            background: self
                .background
                .clone()
                .unwrap_or_else(|| defaults.background.clone()),
        }
    }
}

/// A purely visual connector drawn between adjacent bar widgets.
///
/// The arrow carries the trailing edge color of its own widget; the
/// leading edge color is simply the next widget's background.  It
/// introduces no data dependency between the widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoration {
    PowerlineArrow,
}

//  Tests
