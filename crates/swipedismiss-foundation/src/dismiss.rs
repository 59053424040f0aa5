//! Batching of concurrent dismiss animations.
//!
//! Every dismissal holds one reference on the coordinator from the moment
//! its first animation starts until its collapse finishes. Items collapse
//! independently, but the caller hears about them only when the last
//! reference is released, in a single [`DismissBatch`].

use crate::host::{ItemId, ItemView};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::rc::Rc;

/// A collapsed (or collapsing) item waiting for its batch to drain.
pub struct PendingDismissal {
    pub position: usize,
    pub item: Rc<dyn ItemView>,
    /// Extent before the collapse, restored once the batch is handed over.
    pub original_extent: f32,
}

impl std::fmt::Debug for PendingDismissal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingDismissal")
            .field("position", &self.position)
            .field("item", &self.item.id())
            .field("original_extent", &self.original_extent)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct DismissCoordinator {
    ref_count: usize,
    /// Flying off-screen; not yet collapsing.
    departing: FxHashSet<ItemId>,
    pending: IndexMap<ItemId, PendingDismissal>,
}

impl DismissCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dismiss animations still running.
    pub fn in_flight(&self) -> usize {
        self.ref_count
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_dismissing(&self, id: ItemId) -> bool {
        self.departing.contains(&id) || self.pending.contains_key(&id)
    }

    /// Takes a reference for a dismissal about to start. Returns false, and
    /// takes nothing, if the item is already on its way out.
    pub fn begin(&mut self, id: ItemId) -> bool {
        if self.is_dismissing(id) {
            return false;
        }
        self.ref_count += 1;
        self.departing.insert(id);
        log::debug!("dismiss of item {id} started; {} in flight", self.ref_count);
        true
    }

    /// Records the item as collapsing and returns the extent it collapses
    /// from.
    pub fn collapse(&mut self, item: Rc<dyn ItemView>, position: usize) -> f32 {
        let id = item.id();
        self.departing.remove(&id);
        let original_extent = item.extent();
        self.pending.insert(
            id,
            PendingDismissal {
                position,
                item,
                original_extent,
            },
        );
        original_extent
    }

    /// Releases one reference. When it was the last, hands back everything
    /// pending as one batch and starts afresh.
    pub fn complete_one(&mut self) -> Option<DismissBatch> {
        if self.ref_count == 0 {
            log::warn!("dismiss completion without a matching start");
            return None;
        }
        self.ref_count -= 1;
        if self.ref_count > 0 {
            log::trace!("dismiss finished; {} still in flight", self.ref_count);
            return None;
        }
        let pending = std::mem::take(&mut self.pending);
        Some(DismissBatch::new(pending.into_values()))
    }
}

/// Dismissed items handed over together, highest position first.
pub struct DismissBatch {
    entries: SmallVec<[PendingDismissal; 4]>,
}

impl DismissBatch {
    fn new(entries: impl IntoIterator<Item = PendingDismissal>) -> Self {
        let mut entries: SmallVec<[PendingDismissal; 4]> = entries.into_iter().collect();
        entries.sort_by(|a, b| b.position.cmp(&a.position));
        Self { entries }
    }

    /// Positions in descending order.
    pub fn positions(&self) -> SmallVec<[usize; 8]> {
        self.entries.iter().map(|entry| entry.position).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingDismissal> {
        self.entries.iter()
    }

    /// Puts every item back to its resting presentation so the host can
    /// reuse the views.
    pub fn restore_presentation(&self) {
        for entry in &self.entries {
            entry.item.set_alpha(1.0);
            entry.item.set_translation_x(0.0);
            entry.item.set_extent(entry.original_extent);
        }
    }
}

impl std::fmt::Debug for DismissBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}
