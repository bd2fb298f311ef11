//! Workspace groups.
//!
//! A group is a named workspace that windows are assigned to and switched
//! between.  Group identifiers are single characters, conventionally
//! `'1'..='9'`, and their declaration order is significant: it drives both
//! the order of the generated group key bindings and the order the
//! `GroupBox` bar widget lists them in.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single-character group identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(char);

impl GroupId {
    /// The identifier character.
    pub fn as_char(&self) -> char {
        self.0
    }
}

impl From<char> for GroupId {
    fn from(c: char) -> Self {
        GroupId(c)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for GroupId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for GroupId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(GroupId(c)),
            _ => Err(DeError::custom(format!(
                "group identifier must be a single character, got {:?}",
                s
            ))),
        }
    }
}

/// Error from building the group registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupsError {
    /// The same identifier was declared twice.
    #[error("duplicate group identifier {0:?}")]
    Duplicate(char),
}

/// The ordered, duplicate-free set of declared groups.
///
/// Constructed once at config load; iteration order is declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Groups {
    ids: Vec<GroupId>,
}

impl Groups {
    /// Build the registry, rejecting duplicate identifiers.
    pub fn new(ids: Vec<GroupId>) -> Result<Self, GroupsError> {
        let mut seen = std::collections::HashSet::new();
        for id in &ids {
            if !seen.insert(*id) {
                return Err(GroupsError::Duplicate(id.as_char()));
            }
        }
        Ok(Self { ids })
    }

    /// Iterate identifiers in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.ids.iter().copied()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no groups are declared.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether `id` is a declared group.
    pub fn contains(&self, id: GroupId) -> bool {
        self.ids.contains(&id)
    }

    /// Declaration-order position of `id`, if declared.
    pub fn position(&self, id: GroupId) -> Option<usize> {
        self.ids.iter().position(|g| *g == id)
    }
}

//  Tests
