//! Displayed/overflow partitioning.
//!
//! After each layout pass a strip's item sequence is split into the items
//! drawn on the strip itself (`displayed`) and the items shown in its
//! overflow popup (`overflow`). Neither collection is ever edited by hand;
//! both are recomputed here on every pass.
//!
//! # List layouts
//!
//! 1. A visible grip is always the first displayed entry.
//! 2. A forward pass appends head-aligned items that fit, and remembers the
//!    last tail-aligned item it skipped.
//! 3. A backward pass from that item appends the tail-aligned items, so tail
//!    items are listed in the order they appear on screen.
//! 4. Items with `OverflowPolicy::Always` or an `Overflow` placement hint go
//!    to the overflow collection, except separators, which are dropped.
//! 5. The overflow button is appended last when the strip can overflow and
//!    something did.
//!
//! Flow and table layouts skip all of this: every item that participates in
//! layout is displayed, in sequence order.

use horizon_toolstrip_core::logging::targets;
use horizon_toolstrip_core::{
    Alignment, ItemData, ItemId, ItemKind, OverflowPolicy, Placement, Result, StripId,
    StripRegistry,
};

/// The outcome of partitioning one strip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Entries drawn on the strip, including the grip and overflow button.
    pub displayed: Vec<ItemId>,
    /// Entries shown in the overflow popup.
    pub overflow: Vec<ItemId>,
    /// Whether at least one real item was displayed.
    pub has_visible_items: bool,
    placements: Vec<(ItemId, Placement)>,
}

impl Partition {
    /// The placement decided for each item of the sequence, in sequence order.
    pub fn placements(&self) -> &[(ItemId, Placement)] {
        &self.placements
    }

    /// The placement decided for one item.
    pub fn placement_of(&self, item: ItemId) -> Option<Placement> {
        self.placements
            .iter()
            .find(|(id, _)| *id == item)
            .map(|(_, placement)| *placement)
    }
}

fn is_overflowed(item: &ItemData) -> bool {
    item.overflow() == OverflowPolicy::Always || item.placement_hint() == Placement::Overflow
}

/// Partition a strip's item sequence using the hints of the last layout pass.
///
/// This only reads the registry; use [`apply_partition`] to store the result.
pub fn partition(registry: &StripRegistry, strip: StripId) -> Result<Partition> {
    let data = registry.strip(strip)?;
    let items = data.items();
    let mut result = Partition::default();
    let mut placements: Vec<Option<Placement>> = vec![None; items.len()];

    if !data.layout_style().is_list() {
        for (index, &id) in items.iter().enumerate() {
            let item = registry.item(id)?;
            if item.participates_in_layout() {
                result.displayed.push(id);
                result.has_visible_items = true;
                placements[index] = Some(Placement::Main);
            } else {
                placements[index] = Some(Placement::None);
            }
        }
    } else {
        if data.is_grip_visible()
            && let Some(grip) = data.grip()
        {
            result.displayed.push(grip);
        }

        // Forward pass: head items and overflow.
        let mut last_tail = None;
        for (index, &id) in items.iter().enumerate() {
            let item = registry.item(id)?;
            if !item.participates_in_layout() {
                placements[index] = Some(Placement::None);
                continue;
            }
            if is_overflowed(item) {
                if item.kind() != ItemKind::Separator {
                    result.overflow.push(id);
                }
                placements[index] = Some(Placement::Overflow);
                continue;
            }
            match item.alignment() {
                Alignment::Head => {
                    result.displayed.push(id);
                    result.has_visible_items = true;
                    placements[index] = Some(Placement::Main);
                }
                Alignment::Tail => last_tail = Some(index),
            }
        }

        // Backward pass: tail items, starting from the last one.
        if let Some(last_tail) = last_tail {
            for index in (0..=last_tail).rev() {
                let id = items[index];
                let item = registry.item(id)?;
                if item.participates_in_layout()
                    && !is_overflowed(item)
                    && item.alignment() == Alignment::Tail
                {
                    result.displayed.push(id);
                    result.has_visible_items = true;
                    placements[index] = Some(Placement::Main);
                }
            }
        }

        if data.can_overflow()
            && !result.overflow.is_empty()
            && let Some(button) = data.overflow_button()
        {
            result.displayed.push(button);
        }
    }

    result.placements = items
        .iter()
        .zip(placements)
        .map(|(&id, placement)| (id, placement.unwrap_or(Placement::None)))
        .collect();

    tracing::debug!(
        target: targets::PARTITION,
        ?strip,
        displayed = result.displayed.len(),
        overflow = result.overflow.len(),
        has_visible_items = result.has_visible_items,
        "partitioned strip"
    );
    Ok(result)
}

/// Store a partition on its strip.
///
/// Records each item's placement, points the parent of overflow items at the
/// strip's overflow popup (and the parent of every other item back at the
/// strip), and mirrors the overflow collection into the popup.
pub fn apply_partition(
    registry: &mut StripRegistry,
    strip: StripId,
    partition: &Partition,
) -> Result<()> {
    let data = registry.strip(strip)?;
    let popup = data.overflow_popup();
    let grip = data.grip();
    let button = data.overflow_button();

    for &(id, placement) in &partition.placements {
        let listed_in_overflow = placement == Placement::Overflow && partition.overflow.contains(&id);
        let parent = if listed_in_overflow && popup.is_some() {
            popup
        } else {
            Some(strip)
        };
        registry.set_item_placement(id, placement, parent)?;
    }
    for pseudo in [grip, button].into_iter().flatten() {
        let placement = if partition.displayed.contains(&pseudo) {
            Placement::Main
        } else {
            Placement::None
        };
        registry.set_item_placement(pseudo, placement, Some(strip))?;
    }

    registry.store_partition(
        strip,
        partition.displayed.clone(),
        partition.overflow.clone(),
        partition.has_visible_items,
    )?;
    if let Some(popup) = popup {
        let has_items = !partition.overflow.is_empty();
        registry.store_partition(popup, partition.overflow.clone(), Vec::new(), has_items)?;
    }
    Ok(())
}

/// Partition a strip and store the result.
pub fn update_displayed_items(registry: &mut StripRegistry, strip: StripId) -> Result<Partition> {
    let result = partition(registry, strip)?;
    apply_partition(registry, strip, &result)?;
    Ok(result)
}
