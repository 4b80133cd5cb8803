//! Arena registry for strips and items.
//!
//! Strips and items are stored in two `SlotMap` arenas and refer to each
//! other through [`StripId`] / [`ItemId`] handles. The registry is the only
//! place that mutates item sequences, which keeps the central ownership
//! invariant in one spot: an item is listed in at most one strip's sequence,
//! and its `owner` field always names that strip.
//!
//! # Example
//!
//! ```
//! use horizon_toolstrip_core::{ItemData, StripData, StripKind, StripRegistry};
//!
//! let mut registry = StripRegistry::new();
//! let strip = registry.create_strip(StripData::new(StripKind::ToolStrip).with_name("Main"));
//! let open = registry.create_item(ItemData::button("&Open"));
//! registry.add_item(strip, open).unwrap();
//!
//! assert_eq!(registry.items(strip).unwrap(), &[open]);
//! assert_eq!(registry.item(open).unwrap().owner(), Some(strip));
//! ```

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use slotmap::SlotMap;

use crate::error::{Result, StripError};
use crate::history::MergeHistory;
use crate::item::{ItemData, ItemId, ItemKind, Placement};
use crate::logging::targets;
use crate::strip::{StripData, StripId, StripKind};

/// The central registry owning every strip and item.
#[derive(Debug, Default)]
pub struct StripRegistry {
    strips: SlotMap<StripId, StripData>,
    items: SlotMap<ItemId, ItemData>,
}

impl StripRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            strips: SlotMap::with_key(),
            items: SlotMap::with_key(),
        }
    }

    // =========================================================================
    // Creation and destruction
    // =========================================================================

    /// Register a strip and return its ID.
    ///
    /// Every strip except an overflow popup also gets a grip, an overflow
    /// button, and the overflow popup the button opens.
    pub fn create_strip(&mut self, data: StripData) -> StripId {
        let kind = data.kind;
        let id = self.strips.insert(data);

        if kind != StripKind::Overflow {
            let grip = self.insert_owned_pseudo(ItemKind::Grip, id);
            let button = self.insert_owned_pseudo(ItemKind::OverflowButton, id);

            let mut popup_data = StripData::new(StripKind::Overflow);
            popup_data.owner_item = Some(button);
            let popup = self.strips.insert(popup_data);
            self.items[button].drop_down = Some(popup);

            let strip = &mut self.strips[id];
            strip.grip = Some(grip);
            strip.overflow_button = Some(button);
            strip.overflow_popup = Some(popup);
        }

        tracing::trace!(target: targets::REGISTRY, ?id, ?kind, "created strip");
        id
    }

    fn insert_owned_pseudo(&mut self, kind: ItemKind, owner: StripId) -> ItemId {
        let mut data = ItemData::new(kind, "");
        data.owner = Some(owner);
        data.parent = Some(owner);
        self.items.insert(data)
    }

    /// Register a detached item and return its ID.
    pub fn create_item(&mut self, data: ItemData) -> ItemId {
        let kind = data.kind;
        let id = self.items.insert(ItemData {
            owner: None,
            parent: None,
            selected: false,
            drop_down: None,
            ..data
        });
        tracing::trace!(target: targets::REGISTRY, ?id, ?kind, "created item");
        id
    }

    /// Register a detached item together with an empty drop-down menu for
    /// its children.
    pub fn create_drop_down_item(&mut self, data: ItemData) -> ItemId {
        let id = self.create_item(data);
        let mut menu = StripData::new(StripKind::DropDownMenu);
        menu.owner_item = Some(id);
        let drop_down = self.create_strip(menu);
        self.items[id].drop_down = Some(drop_down);
        id
    }

    /// Destroy a strip, its items, and every drop-down below them.
    #[tracing::instrument(skip(self), target = "horizon_toolstrip_core::registry", level = "trace")]
    pub fn destroy_strip(&mut self, id: StripId) -> Result<()> {
        let strip = self.strips.remove(id).ok_or(StripError::InvalidStrip(id))?;

        if let Some(owner_item) = strip.owner_item
            && let Some(item) = self.items.get_mut(owner_item)
            && item.drop_down == Some(id)
        {
            item.drop_down = None;
        }

        let owned = strip
            .items
            .iter()
            .copied()
            .chain(strip.grip)
            .chain(strip.overflow_button);
        for item_id in owned.collect::<Vec<_>>() {
            if let Some(item) = self.items.remove(item_id)
                && let Some(drop_down) = item.drop_down
                && self.strips.contains_key(drop_down)
            {
                self.destroy_strip(drop_down)?;
            }
        }

        // Items displayed in this strip but owned elsewhere only lose their parent.
        for item_id in strip.displayed {
            if let Some(item) = self.items.get_mut(item_id)
                && item.parent == Some(id)
            {
                item.parent = item.owner;
            }
        }
        Ok(())
    }

    /// Detach and destroy an item along with its drop-down.
    pub fn destroy_item(&mut self, id: ItemId) -> Result<()> {
        let item = self.items.get(id).ok_or(StripError::InvalidItem(id))?;
        if item.kind.is_pseudo() {
            return Err(StripError::PseudoItem(id));
        }
        self.detach(id);
        if let Some(item) = self.items.remove(id)
            && let Some(drop_down) = item.drop_down
            && self.strips.contains_key(drop_down)
        {
            self.destroy_strip(drop_down)?;
        }
        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn strip(&self, id: StripId) -> Result<&StripData> {
        self.strips.get(id).ok_or(StripError::InvalidStrip(id))
    }

    pub fn strip_mut(&mut self, id: StripId) -> Result<&mut StripData> {
        self.strips.get_mut(id).ok_or(StripError::InvalidStrip(id))
    }

    pub fn item(&self, id: ItemId) -> Result<&ItemData> {
        self.items.get(id).ok_or(StripError::InvalidItem(id))
    }

    pub fn item_mut(&mut self, id: ItemId) -> Result<&mut ItemData> {
        self.items.get_mut(id).ok_or(StripError::InvalidItem(id))
    }

    pub fn contains_strip(&self, id: StripId) -> bool {
        self.strips.contains_key(id)
    }

    pub fn contains_item(&self, id: ItemId) -> bool {
        self.items.contains_key(id)
    }

    pub fn strip_count(&self) -> usize {
        self.strips.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all strips.
    pub fn strips(&self) -> impl Iterator<Item = (StripId, &StripData)> {
        self.strips.iter()
    }

    /// Find the first strip with the given name.
    pub fn find_strip_by_name(&self, name: &str) -> Option<StripId> {
        if name.is_empty() {
            return None;
        }
        self.strips
            .iter()
            .find(|(_, strip)| strip.name == name)
            .map(|(id, _)| id)
    }

    /// The item sequence of a strip.
    pub fn items(&self, strip: StripId) -> Result<&[ItemId]> {
        Ok(&self.strip(strip)?.items)
    }

    /// Number of items in a strip's sequence.
    pub fn item_len(&self, strip: StripId) -> Result<usize> {
        Ok(self.strip(strip)?.items.len())
    }

    /// Position of an item in a strip's sequence.
    pub fn index_of(&self, strip: StripId, item: ItemId) -> Option<usize> {
        self.strips.get(strip)?.items.iter().position(|&i| i == item)
    }

    /// The drop-down strip of an item, if it has one.
    pub fn drop_down_of(&self, item: ItemId) -> Option<StripId> {
        self.items.get(item)?.drop_down
    }

    // =========================================================================
    // Sequence mutation
    // =========================================================================

    /// Append an item to a strip, taking it out of its previous owner first.
    ///
    /// Returns the index the item landed at.
    pub fn add_item(&mut self, strip: StripId, item: ItemId) -> Result<usize> {
        self.check_insertable(strip, item)?;
        self.detach(item);
        let items = &mut self.strips[strip].items;
        items.push(item);
        let index = items.len() - 1;
        self.attach(strip, item);
        Ok(index)
    }

    /// Insert an item at `index`, taking it out of its previous owner first.
    ///
    /// The index is interpreted after the item has left its previous owner,
    /// so re-inserting into the same strip behaves like a move.
    pub fn insert_item(&mut self, strip: StripId, index: usize, item: ItemId) -> Result<()> {
        self.check_insertable(strip, item)?;
        self.detach(item);
        let items = &mut self.strips[strip].items;
        if index > items.len() {
            let len = items.len();
            return Err(StripError::IndexOutOfRange { index, len });
        }
        items.insert(index, item);
        self.attach(strip, item);
        Ok(())
    }

    /// Remove an item from a strip's sequence, leaving it detached.
    ///
    /// Returns the index it was removed from, or `None` if the strip did not
    /// list it.
    pub fn remove_item(&mut self, strip: StripId, item: ItemId) -> Result<Option<usize>> {
        self.item(item)?;
        let data = self.strip_mut(strip)?;
        let Some(index) = data.items.iter().position(|&i| i == item) else {
            return Ok(None);
        };
        data.items.remove(index);
        if data.selected == Some(item) {
            data.selected = None;
        }
        let item_data = &mut self.items[item];
        item_data.owner = None;
        item_data.parent = None;
        item_data.selected = false;
        item_data.placement = Placement::None;
        tracing::trace!(target: targets::REGISTRY, ?strip, ?item, index, "removed item");
        Ok(Some(index))
    }

    fn check_insertable(&self, strip: StripId, item: ItemId) -> Result<()> {
        self.strip(strip)?;
        let data = self.item(item)?;
        if data.kind.is_pseudo() {
            return Err(StripError::PseudoItem(item));
        }
        Ok(())
    }

    fn attach(&mut self, strip: StripId, item: ItemId) {
        let data = &mut self.items[item];
        data.owner = Some(strip);
        data.parent = Some(strip);
        tracing::trace!(target: targets::REGISTRY, ?strip, ?item, "attached item");
    }

    /// Take an item out of whatever strip owns it.
    fn detach(&mut self, item: ItemId) {
        let Some(owner) = self.items.get(item).and_then(|data| data.owner) else {
            return;
        };
        let listed = self
            .strips
            .get(owner)
            .is_some_and(|strip| strip.items.contains(&item));
        if !listed {
            debug_assert!(listed, "item {item:?} claims owner {owner:?} which does not list it");
            tracing::warn!(target: targets::REGISTRY, ?item, ?owner, "owner does not list item; clearing stale owner");
            let data = &mut self.items[item];
            data.owner = None;
            data.parent = None;
            return;
        }
        // The owner is known to list the item, so this cannot fail.
        let _ = self.remove_item(owner, item);
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Change the selected item of a strip.
    ///
    /// The previous holder is unselected before the new one is selected.
    pub fn set_selected(&mut self, strip: StripId, item: Option<ItemId>) -> Result<()> {
        if let Some(item) = item {
            self.item(item)?;
        }
        let previous = self.strip(strip)?.selected;
        if previous == item {
            return Ok(());
        }
        if let Some(previous) = previous
            && let Some(data) = self.items.get_mut(previous)
        {
            data.selected = false;
        }
        self.strips[strip].selected = item;
        if let Some(item) = item {
            self.items[item].selected = true;
        }
        tracing::trace!(target: targets::REGISTRY, ?strip, ?previous, ?item, "selection changed");
        Ok(())
    }

    // =========================================================================
    // Layout results
    // =========================================================================

    /// Store the outcome of a partition pass on a strip.
    pub fn store_partition(
        &mut self,
        strip: StripId,
        displayed: Vec<ItemId>,
        overflow: Vec<ItemId>,
        has_visible_items: bool,
    ) -> Result<()> {
        let data = self.strip_mut(strip)?;
        data.displayed = displayed;
        data.overflow = overflow;
        data.has_visible_items = has_visible_items;
        Ok(())
    }

    /// Record where the partitioner put an item and which strip displays it.
    pub fn set_item_placement(
        &mut self,
        item: ItemId,
        placement: Placement,
        parent: Option<StripId>,
    ) -> Result<()> {
        let data = self.item_mut(item)?;
        data.placement = placement;
        data.parent = parent;
        Ok(())
    }

    // =========================================================================
    // Merge history
    // =========================================================================

    /// Push a merge record onto a strip's history stack.
    pub fn push_merge_history(&mut self, strip: StripId, history: MergeHistory) -> Result<()> {
        self.strip_mut(strip)?.merge_history.push(history);
        Ok(())
    }

    /// Pop the newest merge record off a strip's history stack.
    pub fn pop_merge_history(&mut self, strip: StripId) -> Result<Option<MergeHistory>> {
        Ok(self.strip_mut(strip)?.merge_history.pop())
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Check that every item's owner lists it exactly once and that every
    /// listed item names the listing strip as owner.
    ///
    /// Returns `false` on the first violation (after logging it).
    pub fn verify_ownership(&self) -> bool {
        for (strip_id, strip) in &self.strips {
            for &item_id in &strip.items {
                let owner = self.items.get(item_id).and_then(|item| item.owner);
                if owner != Some(strip_id) {
                    tracing::warn!(target: targets::REGISTRY, ?strip_id, ?item_id, ?owner, "listed item has a different owner");
                    return false;
                }
                if strip.items.iter().filter(|&&i| i == item_id).count() != 1 {
                    tracing::warn!(target: targets::REGISTRY, ?strip_id, ?item_id, "item listed twice");
                    return false;
                }
            }
        }
        for (item_id, item) in &self.items {
            if item.kind.is_pseudo() {
                continue;
            }
            if let Some(owner) = item.owner
                && !self.strips.get(owner).is_some_and(|s| s.items.contains(&item_id))
            {
                tracing::warn!(target: targets::REGISTRY, ?item_id, ?owner, "owner does not list item");
                return false;
            }
        }
        true
    }
}

/// Thread-safe wrapper around [`StripRegistry`] for hosts that share one
/// registry between components.
///
/// All engine operations take `&mut StripRegistry`; run them under
/// [`write`](Self::write).
#[derive(Debug, Default)]
pub struct SharedStripRegistry {
    inner: RwLock<StripRegistry>,
}

impl SharedStripRegistry {
    /// Create a new shared registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StripRegistry::new()),
        }
    }

    /// Wrap an existing registry.
    pub fn from_registry(registry: StripRegistry) -> Self {
        Self {
            inner: RwLock::new(registry),
        }
    }

    /// Acquire read access.
    pub fn read(&self) -> RwLockReadGuard<'_, StripRegistry> {
        self.inner.read()
    }

    /// Acquire write access.
    pub fn write(&self) -> RwLockWriteGuard<'_, StripRegistry> {
        self.inner.write()
    }

    /// Run a closure with read access.
    pub fn with<R>(&self, f: impl FnOnce(&StripRegistry) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run a closure with write access.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut StripRegistry) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Unwrap the registry.
    pub fn into_inner(self) -> StripRegistry {
        self.inner.into_inner()
    }
}

static_assertions::assert_impl_all!(StripRegistry: Send, Sync);
static_assertions::assert_impl_all!(SharedStripRegistry: Send, Sync);
