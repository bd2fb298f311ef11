//! Key chords: modifier sets, key symbols, and chord parsing.
//!
//! A chord is written in config files as a single string such as
//! `"super+shift+h"` — every `+`-separated token except the last names a
//! modifier, the last token is the key symbol.  The compositor's key
//! forwarder sends the same chord in structured form
//! (`{"mods": ["super", "shift"], "key": "h"}`); both spellings
//! deserialize into the same [`KeyChord`].
//!
//! Key symbols are normalized so that the two paths always agree: a
//! single-character symbol is lowercased (`"H"` and `"h"` are the same
//! chord), while named symbols (`"Return"`, `"space"`, `"XF86AudioMute"`)
//! are kept verbatim.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Errors from parsing chord strings or key symbols.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    /// The key symbol was empty.
    #[error("empty key symbol")]
    EmptyKey,
    /// A modifier token was not recognised.
    #[error("unknown modifier {modifier:?} in chord {chord:?}")]
    UnknownModifier { modifier: String, chord: String },
    /// The chord string had no key symbol after its modifiers.
    #[error("chord {0:?} has no key symbol")]
    MissingKey(String),
}

/// A set of modifier keys held while a key symbol is pressed.
///
/// Modifier names are case-insensitive; `mod4`/`win` alias `super` and
/// `mod1` aliases `alt`, matching common window-manager conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Super / logo key (`mod4`).
    pub super_: bool,
    pub shift: bool,
    pub control: bool,
    /// Alt key (`mod1`).
    pub alt: bool,
}

impl Modifiers {
    /// The empty modifier set.
    pub const NONE: Modifiers = Modifiers {
        super_: false,
        shift: false,
        control: false,
        alt: false,
    };

    /// Just the super key.
    pub const SUPER: Modifiers = Modifiers {
        super_: true,
        shift: false,
        control: false,
        alt: false,
    };

    /// Whether no modifier is set.
    pub fn is_empty(&self) -> bool {
        !(self.super_ || self.shift || self.control || self.alt)
    }

    /// This set with shift added — used when deriving the
    /// "move window to group" binding from the "switch to group" one.
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Parse a single modifier token.  Returns `None` for unknown names.
    pub fn parse_token(token: &str) -> Option<Modifiers> {
        let mut mods = Modifiers::NONE;
        match token.to_ascii_lowercase().as_str() {
            "super" | "mod4" | "win" => mods.super_ = true,
            "shift" => mods.shift = true,
            "control" | "ctrl" => mods.control = true,
            "alt" | "mod1" => mods.alt = true,
            _ => return None,
        }
        Some(mods)
    }

    /// Union of two modifier sets.
    pub fn union(self, other: Modifiers) -> Modifiers {
        Modifiers {
            super_: self.super_ || other.super_,
            shift: self.shift || other.shift,
            control: self.control || other.control,
            alt: self.alt || other.alt,
        }
    }

    /// Canonical names of the active modifiers, in display order.
    fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.super_ {
            names.push("super");
        }
        if self.shift {
            names.push("shift");
        }
        if self.control {
            names.push("control");
        }
        if self.alt {
            names.push("alt");
        }
        names
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join("+"))
    }
}

impl Serialize for Modifiers {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.names().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Modifiers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tokens = Vec::<String>::deserialize(deserializer)?;
        let mut mods = Modifiers::NONE;
        for token in &tokens {
            let parsed = Modifiers::parse_token(token)
                .ok_or_else(|| DeError::custom(format!("unknown modifier: {:?}", token)))?;
            mods = mods.union(parsed);
        }
        Ok(mods)
    }
}

/// A normalized key-symbol name.
///
/// Single characters are stored lowercased; anything longer is stored
/// verbatim, so `"Return"` and `"XF86AudioLowerVolume"` survive untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeySym(String);

impl KeySym {
    /// Create a key symbol, normalizing single characters to lowercase.
    pub fn new(name: &str) -> Result<Self, KeyParseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(KeyParseError::EmptyKey);
        }
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(KeySym(c.to_lowercase().collect())),
            _ => Ok(KeySym(name.to_string())),
        }
    }

    /// The normalized symbol name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeySym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for KeySym {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for KeySym {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        KeySym::new(&s).map_err(DeError::custom)
    }
}

/// A modifier set plus a key symbol — the unit a key binding fires on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct KeyChord {
    pub mods: Modifiers,
    pub key: KeySym,
}

impl KeyChord {
    /// Build a chord from parts.
    pub fn new(mods: Modifiers, key: KeySym) -> Self {
        Self { mods, key }
    }
}

impl FromStr for KeyChord {
    type Err = KeyParseError;

    /// Parse `"super+shift+h"` form: all tokens but the last are
    /// modifiers, the last is the key symbol.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split('+').map(str::trim).collect();
        let (key_token, mod_tokens) = tokens
            .split_last()
            .ok_or_else(|| KeyParseError::MissingKey(s.to_string()))?;
        if key_token.is_empty() {
            return Err(KeyParseError::MissingKey(s.to_string()));
        }
        let mut mods = Modifiers::NONE;
        for token in mod_tokens {
            let parsed =
                Modifiers::parse_token(token).ok_or_else(|| KeyParseError::UnknownModifier {
                    modifier: token.to_string(),
                    chord: s.to_string(),
                })?;
            mods = mods.union(parsed);
        }
        Ok(KeyChord {
            mods,
            key: KeySym::new(key_token)?,
        })
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.mods, self.key)
        }
    }
}

impl<'de> Deserialize<'de> for KeyChord {
    /// Accepts either the config string form (`"super+shift+h"`) or the
    /// structured wire form (`{"mods": [...], "key": "h"}`).
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = KeyChord;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "chord string \"mod+key\" or object {{mods, key}}")
            }
            fn visit_str<E>(self, s: &str) -> Result<KeyChord, E>
            where
                E: DeError,
            {
                KeyChord::from_str(s).map_err(DeError::custom)
            }
            fn visit_map<A>(self, mut map: A) -> Result<KeyChord, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut mods = None;
                let mut key = None;
                while let Some(k) = map.next_key::<String>()? {
                    match k.as_str() {
                        "mods" => mods = Some(map.next_value()?),
                        "key" => key = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }
                Ok(KeyChord {
                    mods: mods.unwrap_or(Modifiers::NONE),
                    key: key.ok_or_else(|| DeError::missing_field("key"))?,
                })
            }
        }
        deserializer.deserialize_any(V)
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_chord() {
        let chord: KeyChord = "super+h".parse().unwrap();
        assert_eq!(chord.mods, Modifiers::SUPER);
        assert_eq!(chord.key.as_str(), "h");
    }

    #[test]
    fn parse_multi_modifier_chord() {
        let chord: KeyChord = "super+shift+Return".parse().unwrap();
        assert!(chord.mods.super_);
        assert!(chord.mods.shift);
        assert!(!chord.mods.control);
        assert_eq!(chord.key.as_str(), "Return");
    }

    #[test]
    fn modifier_names_are_case_insensitive_with_aliases() {
        let a: KeyChord = "Super+H".parse().unwrap();
        let b: KeyChord = "mod4+h".parse().unwrap();
        let c: KeyChord = "WIN+h".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);

        let ctrl: KeyChord = "ctrl+j".parse().unwrap();
        let control: KeyChord = "control+j".parse().unwrap();
        assert_eq!(ctrl, control);

        let alt: KeyChord = "mod1+Tab".parse().unwrap();
        assert!(alt.mods.alt);
    }

    #[test]
    fn bare_key_has_no_modifiers() {
        let chord: KeyChord = "XF86AudioMute".parse().unwrap();
        assert!(chord.mods.is_empty());
        assert_eq!(chord.key.as_str(), "XF86AudioMute");
    }

    #[test]
    fn single_char_symbols_are_lowercased() {
        assert_eq!(KeySym::new("H").unwrap(), KeySym::new("h").unwrap());
        // Named symbols keep their case.
        assert_ne!(
            KeySym::new("Return").unwrap().as_str(),
            "return"
        );
    }

    #[test]
    fn unknown_modifier_is_an_error() {
        let err = "hyper+x".parse::<KeyChord>().unwrap_err();
        assert_eq!(
            err,
            KeyParseError::UnknownModifier {
                modifier: "hyper".into(),
                chord: "hyper+x".into(),
            }
        );
    }

    #[test]
    fn empty_key_is_an_error() {
        assert!("super+".parse::<KeyChord>().is_err());
        assert!("".parse::<KeyChord>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for s in ["super+shift+h", "super+Return", "XF86AudioMute", "control+alt+t"] {
            let chord: KeyChord = s.parse().unwrap();
            let reparsed: KeyChord = chord.to_string().parse().unwrap();
            assert_eq!(chord, reparsed);
        }
    }

    #[test]
    fn deserialize_string_form() {
        let chord: KeyChord = serde_json::from_str(r#""super+shift+j""#).unwrap();
        assert!(chord.mods.super_ && chord.mods.shift);
        assert_eq!(chord.key.as_str(), "j");
    }

    #[test]
    fn deserialize_structured_form() {
        let chord: KeyChord =
            serde_json::from_str(r#"{"mods": ["super", "shift"], "key": "J"}"#).unwrap();
        assert!(chord.mods.super_ && chord.mods.shift);
        // Normalized the same way as the string form.
        assert_eq!(chord.key.as_str(), "j");
    }

    #[test]
    fn structured_form_without_mods_is_bare() {
        let chord: KeyChord = serde_json::from_str(r#"{"key": "F1"}"#).unwrap();
        assert!(chord.mods.is_empty());
        assert_eq!(chord.key.as_str(), "F1");
    }

    #[test]
    fn structured_form_rejects_unknown_modifier() {
        let result: Result<KeyChord, _> =
            serde_json::from_str(r#"{"mods": ["hyper"], "key": "x"}"#);
        assert!(result.is_err());
    }
}
