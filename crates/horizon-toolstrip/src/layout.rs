//! Reference stack layout.
//!
//! The partitioner only reads the verdict of a layout pass: each item's
//! bounds and its placement hint (fits vs. overflowed). Hosts that measure
//! items themselves can write those directly. [`StackLayout`] is a simple
//! measurement pass over preferred sizes for hosts that don't.
//!
//! # Algorithm
//!
//! 1. Items that don't participate in layout get the `None` hint.
//! 2. `OverflowPolicy::Always` items get the `Overflow` hint.
//! 3. If the rest doesn't fit, room is reserved for the overflow button and
//!    `AsNeeded` items are moved to overflow starting from the end of the
//!    sequence until it does. `Never` items always stay.
//! 4. Head items are placed from the leading edge after the grip, tail items
//!    from the trailing edge inward (the first tail item ends up outermost).
//! 5. Right-to-left horizontal strips are mirrored.

use horizon_toolstrip_core::logging::targets;
use horizon_toolstrip_core::{
    Alignment, ItemId, OverflowPolicy, Orientation, Placement, Rect, Result, StripId, StripRegistry,
};

use crate::partition;

/// Metrics used by [`StackLayout`].
#[derive(Debug, Clone, PartialEq)]
pub struct StripStyle {
    /// Padding between the strip edge and its items.
    pub padding: f32,
    /// Spacing between adjacent items.
    pub spacing: f32,
    /// Length of the grip along the primary axis.
    pub grip_size: f32,
    /// Length of the overflow button along the primary axis.
    pub overflow_button_size: f32,
}

impl Default for StripStyle {
    fn default() -> Self {
        Self {
            padding: 2.0,
            spacing: 2.0,
            grip_size: 6.0,
            overflow_button_size: 16.0,
        }
    }
}

impl StripStyle {
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_grip_size(mut self, size: f32) -> Self {
        self.grip_size = size;
        self
    }

    pub fn with_overflow_button_size(mut self, size: f32) -> Self {
        self.overflow_button_size = size;
        self
    }
}

/// A measurement pass that writes bounds and placement hints.
#[derive(Debug, Clone, Default)]
pub struct StackLayout {
    style: StripStyle,
}

impl StackLayout {
    pub fn new(style: StripStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &StripStyle {
        &self.style
    }

    /// Measure a strip's items and write their bounds and placement hints.
    #[tracing::instrument(skip(self, registry), target = "horizon_toolstrip::layout", level = "trace")]
    pub fn arrange(&self, registry: &mut StripRegistry, strip: StripId) -> Result<()> {
        let data = registry.strip(strip)?;
        if !data.layout_style().is_list() {
            return self.arrange_flow(registry, strip);
        }

        let horizontal = data.orientation() == Orientation::Horizontal;
        let rtl = horizontal && data.is_right_to_left();
        let size = data.available_size();
        let (extent, cross) = if horizontal {
            (size.width, size.height)
        } else {
            (size.height, size.width)
        };
        let grip = data.grip().filter(|_| data.is_grip_visible());
        let overflow_button = data.overflow_button();
        let can_overflow = data.can_overflow();
        let items = data.items().to_vec();

        let style = &self.style;
        let grip_space = if grip.is_some() {
            style.grip_size + style.spacing
        } else {
            0.0
        };
        let available = extent - style.padding * 2.0 - grip_space;

        // Steps 1-2: fixed verdicts.
        let mut fitting: Vec<(ItemId, f32, OverflowPolicy)> = Vec::new();
        for &id in &items {
            let item = registry.item_mut(id)?;
            if !item.participates_in_layout() {
                item.set_placement_hint(Placement::None);
            } else if item.overflow() == OverflowPolicy::Always {
                item.set_placement_hint(Placement::Overflow);
            } else {
                item.set_placement_hint(Placement::Main);
                let preferred = item.preferred_size();
                let length = if horizontal { preferred.width } else { preferred.height };
                fitting.push((id, length, item.overflow()));
            }
        }

        // Step 3: shed items from the end until the rest fits.
        let required = |entries: &[(ItemId, f32, OverflowPolicy)], shed: &[bool]| -> f32 {
            entries
                .iter()
                .zip(shed)
                .filter(|(_, shed)| !**shed)
                .map(|((_, length, _), _)| length + style.spacing)
                .sum()
        };
        let mut shed = vec![false; fitting.len()];
        let has_always = items.iter().any(|&id| {
            registry
                .item(id)
                .is_ok_and(|i| i.placement_hint() == Placement::Overflow)
        });
        let mut budget = available;
        if has_always || required(&fitting, &shed) > budget {
            if can_overflow {
                budget -= style.overflow_button_size + style.spacing;
            }
            for index in (0..fitting.len()).rev() {
                if required(&fitting, &shed) <= budget {
                    break;
                }
                if fitting[index].2 == OverflowPolicy::AsNeeded {
                    shed[index] = true;
                    registry
                        .item_mut(fitting[index].0)?
                        .set_placement_hint(Placement::Overflow);
                }
            }
        }
        let overflowing = has_always || shed.iter().any(|&s| s);
        tracing::trace!(
            target: targets::LAYOUT,
            ?strip,
            available,
            shed = shed.iter().filter(|&&s| s).count(),
            overflowing,
            "measured strip"
        );

        // Step 4: place items.
        let place = |offset: f32, length: f32| -> Rect {
            let (x, y, w, h) = if horizontal {
                (offset, style.padding, length, cross - style.padding * 2.0)
            } else {
                (style.padding, offset, cross - style.padding * 2.0, length)
            };
            if rtl && extent.is_finite() {
                Rect::new(extent - x - w, y, w, h)
            } else {
                Rect::new(x, y, w, h)
            }
        };

        if let Some(grip) = grip {
            registry
                .item_mut(grip)?
                .set_bounds(place(style.padding, style.grip_size));
        }

        let mut head = style.padding + grip_space;
        let mut tail_items = Vec::new();
        for (index, &(id, length, _)) in fitting.iter().enumerate() {
            if shed[index] {
                continue;
            }
            let item = registry.item_mut(id)?;
            if item.alignment() == Alignment::Tail {
                tail_items.push((id, length));
                continue;
            }
            item.set_bounds(place(head, length));
            head += length + style.spacing;
        }

        let mut tail = if extent.is_finite() {
            extent - style.padding
        } else {
            head + tail_items.iter().map(|(_, l)| l + style.spacing).sum::<f32>()
                + style.overflow_button_size
        };
        if overflowing && can_overflow && let Some(button) = overflow_button {
            tail -= style.overflow_button_size;
            registry
                .item_mut(button)?
                .set_bounds(place(tail, style.overflow_button_size));
            tail -= style.spacing;
        }
        for (id, length) in tail_items {
            tail -= length;
            registry.item_mut(id)?.set_bounds(place(tail, length));
            tail -= style.spacing;
        }
        Ok(())
    }

    /// Flow and table layouts: wrap items into rows, nothing overflows.
    fn arrange_flow(&self, registry: &mut StripRegistry, strip: StripId) -> Result<()> {
        let data = registry.strip(strip)?;
        let width = data.available_size().width;
        let items = data.items().to_vec();
        let style = &self.style;

        let mut x = style.padding;
        let mut y = style.padding;
        let mut row_height: f32 = 0.0;
        for id in items {
            let item = registry.item_mut(id)?;
            if !item.participates_in_layout() {
                item.set_placement_hint(Placement::None);
                continue;
            }
            item.set_placement_hint(Placement::Main);
            let size = item.preferred_size();
            if x > style.padding && x + size.width > width - style.padding {
                x = style.padding;
                y += row_height + style.spacing;
                row_height = 0.0;
            }
            item.set_bounds(Rect::new(x, y, size.width, size.height));
            x += size.width + style.spacing;
            row_height = row_height.max(size.height);
        }
        Ok(())
    }
}

/// Run the layout pass and then partition the strip, storing the result.
pub fn perform_layout(
    registry: &mut StripRegistry,
    strip: StripId,
    layout: &StackLayout,
) -> Result<partition::Partition> {
    layout.arrange(registry, strip)?;
    let result = partition::partition(registry, strip)?;
    partition::apply_partition(registry, strip, &result)?;
    Ok(result)
}
