//! Lazy visibility registry
//!
//! Session-scoped state tracking which lazy fragments are currently consumed.
//! Visibility is reference-counted: a fragment stays in the wire query while
//! at least one consumer holds a claim on it, and drops out only when the
//! last claim is released. The renderer only ever reads this state; all
//! mutation happens through the session API or explicit [`set_visible`] calls.
//!
//! [`set_visible`]: VisibilityRegistry::set_visible

use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Reference-counted visibility state for lazy fragments
///
/// Entries are never removed individually; a missing name means "not
/// visible". Every visibility transition bumps a monotonic version counter
/// that outstanding query renders use to detect staleness.
#[derive(Debug, Default, Clone)]
pub struct VisibilityRegistry {
    counts: HashMap<String, usize>,
    version: u64,
}

impl VisibilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a lazy fragment is currently visible
    ///
    /// Unknown names default to not visible.
    pub fn is_visible(&self, name: &str) -> bool {
        self.counts.get(name).copied().unwrap_or(0) > 0
    }

    /// Monotonic counter, bumped on every visibility transition
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Claim visibility for a fragment name
    pub fn acquire(&mut self, name: &str) {
        let count = self.counts.entry(name.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            self.version += 1;
            debug!(fragment = name, "lazy fragment became visible");
        }
    }

    /// Release one visibility claim; saturates at zero
    ///
    /// The fragment only becomes invisible when the last claim is released,
    /// so one consumer unmounting cannot hide a fragment other consumers
    /// still need.
    pub fn release(&mut self, name: &str) {
        let Some(count) = self.counts.get_mut(name) else {
            return;
        };
        if *count == 0 {
            return;
        }
        *count -= 1;
        if *count == 0 {
            self.version += 1;
            debug!(fragment = name, "lazy fragment became invisible");
        }
    }

    /// Force a fragment's visibility, bypassing reference counting
    ///
    /// Idempotent: setting the current state is a no-op and does not bump the
    /// version. Intended for callers outside the handle lifecycle.
    pub fn set_visible(&mut self, name: &str, visible: bool) {
        if self.is_visible(name) == visible {
            return;
        }
        self.counts
            .insert(name.to_string(), if visible { 1 } else { 0 });
        self.version += 1;
        debug!(fragment = name, visible, "lazy fragment visibility forced");
    }
}

/// Fragment names included in the most recently executed document
///
/// Replaced wholesale when a fetch is acknowledged. Answers "is this
/// fragment's data present yet" independently of the registry's possibly
/// newer visibility state.
#[derive(Debug, Default, Clone)]
pub struct FetchedFragments {
    names: HashSet<String>,
}

impl FetchedFragments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Replace the record with the fragments of a just-fetched document
    pub fn replace(&mut self, names: impl IntoIterator<Item = String>) {
        self.names = names.into_iter().collect();
    }
}
