// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The set of live chart panels.

extern crate alloc;

use alloc::boxed::Box;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::panel::{ChartPanel, PanelId};
use crate::scale::CoordinateMapping;

/// A registered panel.
pub struct PanelBinding {
    id: PanelId,
    panel: Box<dyn ChartPanel>,
}

impl PanelBinding {
    /// The panel's identifier.
    pub fn id(&self) -> PanelId {
        self.id
    }

    /// The panel's coordinate mapping.
    pub fn mapping(&self) -> &dyn CoordinateMapping {
        self.panel.mapping()
    }

    /// The panel itself.
    pub fn panel(&self) -> &dyn ChartPanel {
        self.panel.as_ref()
    }

    pub(crate) fn highlight(&mut self, index: Option<usize>) {
        self.panel.set_active_index(index);
        self.panel.redraw_immediate();
    }
}

impl fmt::Debug for PanelBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelBinding")
            .field("id", &self.id)
            .field("len", &self.panel.mapping().len())
            .finish_non_exhaustive()
    }
}

/// Maps [`PanelId`]s to live panels.
///
/// At most one panel is bound per id. Panels come and go when a forecast is re-rendered; the
/// registry is the only place the synchronizer looks them up.
///
/// The registry also remembers which ids were bound since the last broadcast, so a highlight
/// can be replayed onto new panels only.
#[derive(Debug, Default)]
pub struct PanelRegistry {
    panels: HashMap<PanelId, PanelBinding>,
    fresh: SmallVec<[PanelId; 4]>,
}

impl PanelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `panel` to `id`, returning the binding it replaces.
    pub fn register(&mut self, id: PanelId, panel: Box<dyn ChartPanel>) -> Option<PanelBinding> {
        let replaced = self.panels.insert(id, PanelBinding { id, panel });
        if !self.fresh.contains(&id) {
            self.fresh.push(id);
        }
        if replaced.is_some() {
            log::debug!("replaced panel {id}");
        }
        replaced
    }

    /// Removes the panel bound to `id`.
    pub fn unregister(&mut self, id: PanelId) -> Option<PanelBinding> {
        self.fresh.retain(|fresh| *fresh != id);
        self.panels.remove(&id)
    }

    /// Removes every panel.
    pub fn clear(&mut self) {
        self.panels.clear();
        self.fresh.clear();
    }

    /// Returns the panel bound to `id`.
    pub fn get(&self, id: PanelId) -> Option<&PanelBinding> {
        self.panels.get(&id)
    }

    /// Returns the panel bound to `id`, mutably.
    pub fn get_mut(&mut self, id: PanelId) -> Option<&mut PanelBinding> {
        self.panels.get_mut(&id)
    }

    /// Iterates over all live panels in no particular order.
    pub fn all(&self) -> impl Iterator<Item = &PanelBinding> {
        self.panels.values()
    }

    /// Returns the bound ids in top-to-bottom order.
    pub fn ids(&self) -> SmallVec<[PanelId; 4]> {
        let mut ids: SmallVec<[PanelId; 4]> = self.panels.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of live panels.
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Returns `true` if no panel is registered.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Sets the highlighted index on every panel and redraws each one immediately.
    pub(crate) fn broadcast(&mut self, index: Option<usize>) {
        self.fresh.clear();
        for id in self.ids() {
            if let Some(binding) = self.panels.get_mut(&id) {
                binding.highlight(index);
            }
        }
    }

    /// Like [`broadcast`](Self::broadcast), but only to panels bound since the last broadcast.
    pub(crate) fn broadcast_fresh(&mut self, index: Option<usize>) {
        let mut fresh = core::mem::take(&mut self.fresh);
        fresh.sort_unstable();
        log::debug!("replaying {index:?} onto {} new panels", fresh.len());
        for id in fresh {
            if let Some(binding) = self.panels.get_mut(&id) {
                binding.highlight(index);
            }
        }
    }

    /// Forgets which panels were bound since the last broadcast.
    pub(crate) fn settle(&mut self) {
        self.fresh.clear();
    }
}
