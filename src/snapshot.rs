//! Immutable configuration snapshots and atomic reload.
//!
//! A [`Snapshot`] is the finalized form of a parsed [`Config`]: every
//! table validated and frozen.  The daemon never mutates one — reload
//! builds a complete candidate from scratch and, only if every check
//! passes, swaps it in atomically via [`SnapshotHandle`].  A reader that
//! grabbed the old `Arc` mid-swap keeps a consistent view; a reload that
//! fails anywhere leaves the active snapshot untouched.

use crate::action::MouseBinding;
use crate::bar::Bar;
use crate::config::{Config, ConfigError, Settings};
use crate::groups::Groups;
use crate::keys::Modifiers;
use crate::layouts::Layouts;
use crate::rules::FloatingRules;
use crate::table::{BindingTable, KeyBinding};
use arc_swap::ArcSwap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The finalized, immutable configuration state.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub table: BindingTable,
    pub groups: Groups,
    pub layouts: Layouts,
    pub bar: Bar,
    pub mouse: Vec<MouseBinding>,
    pub rules: FloatingRules,
    pub settings: Settings,
}

impl Snapshot {
    /// Validate a parsed config and freeze it into a snapshot.
    ///
    /// Pure and deterministic: building the same config twice yields
    /// identical snapshots, which is what makes hot-reload safe.
    pub fn build(config: &Config) -> Result<Self, ConfigError> {
        let primary = Modifiers::parse_token(&config.modifier)
            .ok_or_else(|| ConfigError::UnknownModifier(config.modifier.clone()))?;
        let groups = Groups::new(config.groups.clone())?;
        let explicit: Vec<KeyBinding> =
            config.keys.iter().cloned().map(KeyBinding::from).collect();
        let table = BindingTable::build(explicit, &groups, primary)?;
        let layouts = Layouts::new(config.layouts.clone())?;
        let bar = Bar::new(
            config.bar.height,
            config.bar.margin,
            config.widget_defaults.clone(),
            config.bar.widgets.clone(),
        )?;
        Ok(Self {
            table,
            groups,
            layouts,
            bar,
            mouse: config.mouse.clone(),
            rules: FloatingRules::with_defaults(config.float_rules.clone()),
            settings: config.settings.clone(),
        })
    }
}

/// Shared handle to the active snapshot.
///
/// Cheap to read from any thread; reload is the only writer.
pub struct SnapshotHandle {
    current: ArcSwap<Snapshot>,
    path: PathBuf,
}

impl SnapshotHandle {
    /// Wrap an initial snapshot; `path` is re-read on reload.
    pub fn new(initial: Snapshot, path: PathBuf) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
            path,
        }
    }

    /// The currently active snapshot.
    pub fn current(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// The config file this handle reloads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-parse the config file and swap in the new snapshot.
    ///
    /// On any error — unreadable file, malformed JSON, duplicate
    /// binding, invalid bar — the previously active snapshot stays in
    /// place and the error is returned for reporting.
    pub fn reload(&self) -> Result<Arc<Snapshot>, ConfigError> {
        let config = Config::load(&self.path)?;
        let snapshot = Arc::new(Snapshot::build(&config)?);
        self.current.store(Arc::clone(&snapshot));
        Ok(snapshot)
    }
}

//  Tests
