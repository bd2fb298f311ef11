//! The keybinding table.
//!
//! [`BindingTable::build`] assembles the table from the explicitly
//! declared bindings plus two generated bindings per declared group
//! (switch-to and move-window-to), in group declaration order.  The build
//! is pure and deterministic: running it twice over the same config
//! yields an identical table, which is what makes hot-reload safe.
//!
//! The one table-wide invariant is chord uniqueness — no two bindings may
//! fire on the same (modifier-set, key-symbol) pair.  Violations are
//! reported with both conflicting entries named, so a config author can
//! find them without bisecting.

use crate::action::{Action, GroupAction};
use crate::groups::Groups;
use crate::keys::{KeyChord, KeySym, Modifiers};
use std::collections::HashMap;

/// Error from assembling the binding table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// Two bindings declare the same chord.
    #[error("duplicate binding for {chord:?}: {first:?} conflicts with {second:?}")]
    DuplicateBinding {
        chord: String,
        first: String,
        second: String,
    },
    /// A group identifier is not a valid key symbol (should not happen
    /// for single-character group ids, but the table refuses to guess).
    #[error("group {0:?} cannot be used as a key symbol")]
    UnboundableGroup(char),
}

/// One entry in the table.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBinding {
    pub chord: KeyChord,
    pub action: Action,
    pub description: String,
}

/// The immutable chord → action table.
///
/// Constructed once per config load; [`resolve`](BindingTable::resolve)
/// is the only lookup the event loop needs.
#[derive(Debug, Clone)]
pub struct BindingTable {
    bindings: Vec<KeyBinding>,
    index: HashMap<KeyChord, usize>,
    explicit_len: usize,
}

impl BindingTable {
    /// Assemble the table from explicit bindings plus generated group
    /// bindings.
    ///
    /// For every group, in declaration order, two bindings are emitted:
    ///
    /// * `primary + <id>` — switch to the group
    /// * `primary + shift + <id>` — move the focused window to the group
    ///   and follow it
    ///
    /// where `primary` is the configured primary modifier set.
    pub fn build(
        explicit: Vec<KeyBinding>,
        groups: &Groups,
        primary: Modifiers,
    ) -> Result<Self, TableError> {
        let explicit_len = explicit.len();
        let mut bindings = explicit;
        for id in groups.iter() {
            let key = KeySym::new(&id.as_char().to_string())
                .map_err(|_| TableError::UnboundableGroup(id.as_char()))?;
            bindings.push(KeyBinding {
                chord: KeyChord::new(primary, key.clone()),
                action: Action::Group(GroupAction {
                    id,
                    move_window: false,
                }),
                description: format!("Switch to group {}", id),
            });
            bindings.push(KeyBinding {
                chord: KeyChord::new(primary.with_shift(), key),
                action: Action::Group(GroupAction {
                    id,
                    move_window: true,
                }),
                description: format!("Switch to & move focused window to group {}", id),
            });
        }

        let mut index = HashMap::with_capacity(bindings.len());
        for (i, binding) in bindings.iter().enumerate() {
            if let Some(&first) = index.get(&binding.chord) {
                let first: &KeyBinding = &bindings[first];
                return Err(TableError::DuplicateBinding {
                    chord: binding.chord.to_string(),
                    first: first.description.clone(),
                    second: binding.description.clone(),
                });
            }
            index.insert(binding.chord.clone(), i);
        }

        Ok(Self {
            bindings,
            index,
            explicit_len,
        })
    }

    /// Look up the binding for a chord.  `None` means the chord is not
    /// bound and the event should be ignored.
    pub fn resolve(&self, chord: &KeyChord) -> Option<&KeyBinding> {
        self.index.get(chord).map(|&i| &self.bindings[i])
    }

    /// All bindings: explicit first (in declaration order), then the
    /// generated group bindings (in group declaration order).
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// The generated group bindings only.
    pub fn generated(&self) -> &[KeyBinding] {
        &self.bindings[self.explicit_len..]
    }

    /// Total number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

//  Tests
