//! Keyboard navigation between displayed items.
//!
//! Left/Right (and Tab/Shift+Tab) walk the displayed list in order, wrapping
//! around. Up/Down on a horizontal strip pick the item geometrically closest
//! to the pure vertical direction; on a vertical strip they walk the list like
//! Left/Right do on a horizontal one.

use glam::Vec2;
use horizon_toolstrip_core::logging::targets;
use horizon_toolstrip_core::{ItemId, Orientation, Rect, Result, StripId, StripRegistry};

/// An arrow key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrowDirection {
    Left,
    Right,
    Up,
    Down,
}

impl ArrowDirection {
    /// Whether this is Up or Down.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// The item that receives selection when moving from `start` in `direction`.
///
/// Returns `None` when no displayed item can be selected.
#[tracing::instrument(skip(registry), target = "horizon_toolstrip::navigation", level = "trace")]
pub fn next_item(
    registry: &StripRegistry,
    strip: StripId,
    start: Option<ItemId>,
    direction: ArrowDirection,
) -> Result<Option<ItemId>> {
    let data = registry.strip(strip)?;
    let next = match direction {
        ArrowDirection::Left | ArrowDirection::Right => {
            let forward = (direction == ArrowDirection::Right) != data.is_right_to_left();
            next_item_horizontal(registry, strip, start, forward)?
        }
        ArrowDirection::Up | ArrowDirection::Down => {
            let forward = direction == ArrowDirection::Down;
            match (data.orientation(), start) {
                (Orientation::Horizontal, Some(start)) => {
                    next_item_vertical(registry, strip, start, forward)?
                }
                _ => next_item_horizontal(registry, strip, start, forward)?,
            }
        }
    };
    tracing::trace!(target: targets::NAVIGATION, ?next, "resolved next item");
    Ok(next)
}

/// Walk the displayed list circularly from `start`.
///
/// Without a start, forward traversal enters at the first item and backward
/// traversal at the last. The walk visits each position at most once, so it
/// returns `start` itself only if nothing else is selectable.
pub fn next_item_horizontal(
    registry: &StripRegistry,
    strip: StripId,
    start: Option<ItemId>,
    forward: bool,
) -> Result<Option<ItemId>> {
    let displayed = registry.strip(strip)?.displayed_items();
    let count = displayed.len();
    if count == 0 {
        return Ok(None);
    }

    let mut current = match start {
        Some(start) => match displayed.iter().position(|&id| id == start) {
            Some(index) => index,
            None => return Ok(None),
        },
        None if forward => count - 1,
        None => 0,
    };

    for _ in 0..count {
        current = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        let id = displayed[current];
        if registry.item(id)?.can_select() {
            return Ok(Some(id));
        }
    }
    Ok(None)
}

/// Pick the item above or below `start` on a horizontal strip.
///
/// Two winners are tracked over the selectable items on the correct side of
/// `start`: the one deviating least from the vertical (angle) and the nearest
/// one (distance). The angle winner is preferred only when it lies strictly
/// in front of the distance winner along the direction of travel; when the
/// two overlap the distance winner is taken. When nothing qualifies,
/// selection wraps through list order.
pub fn next_item_vertical(
    registry: &StripRegistry,
    strip: StripId,
    start: ItemId,
    down: bool,
) -> Result<Option<ItemId>> {
    let origin = registry.item(start)?.bounds();
    let mid = origin.center().to_vec2();

    let mut angle_winner: Option<(ItemId, f32, Rect)> = None;
    let mut distance_winner: Option<(ItemId, f32, Rect)> = None;

    for &id in registry.strip(strip)?.displayed_items() {
        if id == start {
            continue;
        }
        let item = registry.item(id)?;
        if !item.can_select() {
            continue;
        }
        let bounds = item.bounds();
        let target = if down {
            if bounds.top() < origin.bottom() {
                continue;
            }
            bounds.top_center()
        } else {
            if bounds.bottom() > origin.top() {
                continue;
            }
            bounds.bottom_center()
        };

        let offset: Vec2 = target.to_vec2() - mid;
        if offset.y != 0.0 {
            let angle = (offset.x.abs() / offset.y.abs()).atan();
            if angle_winner.is_none_or(|(_, best, _)| angle < best) {
                angle_winner = Some((id, angle, bounds));
            }
        }
        let distance = offset.length();
        if distance_winner.is_none_or(|(_, best, _)| distance < best) {
            distance_winner = Some((id, distance, bounds));
        }
    }

    let winner = match (angle_winner, distance_winner) {
        (Some((angle_id, _, angle_bounds)), Some((distance_id, _, distance_bounds))) => {
            if angle_id == distance_id || angle_in_front(angle_bounds, distance_bounds, down) {
                Some(angle_id)
            } else {
                Some(distance_id)
            }
        }
        (None, Some((distance_id, _, _))) => Some(distance_id),
        (Some((angle_id, _, _)), None) => Some(angle_id),
        (None, None) => None,
    };

    match winner {
        Some(id) => Ok(Some(id)),
        None => {
            tracing::trace!(target: targets::NAVIGATION, ?start, down, "no vertical candidate; wrapping");
            next_item_horizontal(registry, strip, None, down)
        }
    }
}

/// Whether `angle`'s far edge stops short of `distance`'s near edge when
/// travelling down (or up).
fn angle_in_front(angle: Rect, distance: Rect, down: bool) -> bool {
    if down {
        angle.bottom() < distance.top()
    } else {
        angle.top() > distance.bottom()
    }
}

/// Move the strip's selection one step in `direction`.
///
/// Returns the newly selected item. Selection is left alone when there is
/// nothing to move to.
pub fn select_next_item(
    registry: &mut StripRegistry,
    strip: StripId,
    direction: ArrowDirection,
) -> Result<Option<ItemId>> {
    let start = registry.strip(strip)?.selected_item();
    let next = next_item(registry, strip, start, direction)?;
    if let Some(next) = next {
        registry.set_selected(strip, Some(next))?;
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::update_displayed_items;
    use horizon_toolstrip_core::{ItemData, LayoutStyle, StripData, StripKind};

    fn list_strip(registry: &mut StripRegistry, data: StripData, items: Vec<ItemData>) -> (StripId, Vec<ItemId>) {
        let strip = registry.create_strip(data.with_grip_visible(false));
        let ids = items
            .into_iter()
            .map(|item| {
                let id = registry.create_item(item);
                registry.add_item(strip, id).unwrap();
                id
            })
            .collect();
        update_displayed_items(registry, strip).unwrap();
        (strip, ids)
    }

    fn buttons(texts: &[&str]) -> Vec<ItemData> {
        texts.iter().map(|t| ItemData::button(*t)).collect()
    }

    #[test]
    fn test_right_then_left_returns() {
        let mut registry = StripRegistry::new();
        let (strip, ids) = list_strip(&mut registry, StripData::new(StripKind::ToolStrip), buttons(&["A", "B", "C"]));

        let next = next_item(&registry, strip, Some(ids[0]), ArrowDirection::Right).unwrap();
        assert_eq!(next, Some(ids[1]));
        let back = next_item(&registry, strip, next, ArrowDirection::Left).unwrap();
        assert_eq!(back, Some(ids[0]));
    }

    #[test]
    fn test_wraps_around() {
        let mut registry = StripRegistry::new();
        let (strip, ids) = list_strip(&mut registry, StripData::new(StripKind::ToolStrip), buttons(&["A", "B"]));

        assert_eq!(next_item(&registry, strip, Some(ids[1]), ArrowDirection::Right).unwrap(), Some(ids[0]));
        assert_eq!(next_item(&registry, strip, Some(ids[0]), ArrowDirection::Left).unwrap(), Some(ids[1]));
    }

    #[test]
    fn test_entry_edges_without_start() {
        let mut registry = StripRegistry::new();
        let (strip, ids) = list_strip(&mut registry, StripData::new(StripKind::ToolStrip), buttons(&["A", "B", "C"]));

        assert_eq!(next_item_horizontal(&registry, strip, None, true).unwrap(), Some(ids[0]));
        assert_eq!(next_item_horizontal(&registry, strip, None, false).unwrap(), Some(ids[2]));
    }

    #[test]
    fn test_skips_unselectable() {
        let mut registry = StripRegistry::new();
        let items = vec![
            ItemData::button("A"),
            ItemData::separator(),
            ItemData::button("B").with_enabled(false),
            ItemData::label("L"),
            ItemData::button("C"),
        ];
        let (strip, ids) = list_strip(&mut registry, StripData::new(StripKind::ToolStrip), items);
        assert_eq!(next_item(&registry, strip, Some(ids[0]), ArrowDirection::Right).unwrap(), Some(ids[4]));
    }

    #[test]
    fn test_nothing_selectable_terminates() {
        let mut registry = StripRegistry::new();
        let items = vec![ItemData::separator(), ItemData::label("L")];
        let (strip, ids) = list_strip(&mut registry, StripData::new(StripKind::ToolStrip), items);

        assert_eq!(next_item(&registry, strip, None, ArrowDirection::Right).unwrap(), None);
        assert_eq!(next_item(&registry, strip, Some(ids[0]), ArrowDirection::Left).unwrap(), None);
        assert_eq!(next_item(&registry, strip, Some(ids[0]), ArrowDirection::Down).unwrap(), None);
    }

    #[test]
    fn test_only_start_selectable_returns_start() {
        let mut registry = StripRegistry::new();
        let items = vec![ItemData::button("A"), ItemData::separator()];
        let (strip, ids) = list_strip(&mut registry, StripData::new(StripKind::ToolStrip), items);
        assert_eq!(next_item(&registry, strip, Some(ids[0]), ArrowDirection::Right).unwrap(), Some(ids[0]));
    }

    #[test]
    fn test_right_to_left_swaps() {
        let mut registry = StripRegistry::new();
        let data = StripData::new(StripKind::ToolStrip).with_right_to_left(true);
        let (strip, ids) = list_strip(&mut registry, data, buttons(&["A", "B", "C"]));

        assert_eq!(next_item(&registry, strip, Some(ids[1]), ArrowDirection::Left).unwrap(), Some(ids[2]));
        assert_eq!(next_item(&registry, strip, Some(ids[1]), ArrowDirection::Right).unwrap(), Some(ids[0]));
    }

    #[test]
    fn test_vertical_strip_uses_list_order() {
        let mut registry = StripRegistry::new();
        let (strip, ids) = list_strip(&mut registry, StripData::new(StripKind::DropDownMenu), vec![
            ItemData::menu_item("Open"),
            ItemData::menu_item("Save"),
        ]);

        assert_eq!(next_item(&registry, strip, Some(ids[0]), ArrowDirection::Down).unwrap(), Some(ids[1]));
        assert_eq!(next_item(&registry, strip, Some(ids[0]), ArrowDirection::Up).unwrap(), Some(ids[1]));
        assert_eq!(next_item(&registry, strip, None, ArrowDirection::Down).unwrap(), Some(ids[0]));
    }

    fn grid(bounds: &[Rect]) -> (StripRegistry, StripId, Vec<ItemId>) {
        let mut registry = StripRegistry::new();
        let data = StripData::new(StripKind::ToolStrip).with_layout_style(LayoutStyle::Table);
        let items = bounds
            .iter()
            .enumerate()
            .map(|(i, b)| ItemData::button(format!("{i}")).with_bounds(*b))
            .collect();
        let (strip, ids) = list_strip(&mut registry, data, items);
        (registry, strip, ids)
    }

    #[test]
    fn test_down_picks_item_below() {
        let (registry, strip, ids) = grid(&[
            Rect::new(0.0, 0.0, 20.0, 20.0),
            Rect::new(30.0, 0.0, 20.0, 20.0),
            Rect::new(0.0, 20.0, 20.0, 20.0),
            Rect::new(30.0, 20.0, 20.0, 20.0),
        ]);
        assert_eq!(next_item(&registry, strip, Some(ids[1]), ArrowDirection::Down).unwrap(), Some(ids[3]));
        assert_eq!(next_item(&registry, strip, Some(ids[2]), ArrowDirection::Up).unwrap(), Some(ids[0]));
    }

    #[test]
    fn test_closer_side_item_beats_distant_straight_one() {
        let (registry, strip, ids) = grid(&[
            Rect::new(0.0, 0.0, 20.0, 20.0),
            Rect::new(0.0, 100.0, 20.0, 20.0),
            Rect::new(40.0, 25.0, 20.0, 20.0),
        ]);
        assert_eq!(next_item(&registry, strip, Some(ids[0]), ArrowDirection::Down).unwrap(), Some(ids[2]));
    }

    #[test]
    fn test_overlapping_closer_item_wins_down() {
        // ids[1] is straight below; ids[2] is nearer and overlaps it along y.
        let (registry, strip, ids) = grid(&[
            Rect::new(0.0, 0.0, 20.0, 20.0),
            Rect::new(0.0, 50.0, 20.0, 20.0),
            Rect::new(30.0, 25.0, 20.0, 40.0),
        ]);
        assert_eq!(next_item(&registry, strip, Some(ids[0]), ArrowDirection::Down).unwrap(), Some(ids[2]));
    }

    #[test]
    fn test_overlapping_closer_item_wins_up() {
        let (registry, strip, ids) = grid(&[
            Rect::new(0.0, 100.0, 20.0, 20.0),
            Rect::new(0.0, 50.0, 20.0, 20.0),
            Rect::new(30.0, 55.0, 20.0, 40.0),
        ]);
        assert_eq!(next_item(&registry, strip, Some(ids[0]), ArrowDirection::Up).unwrap(), Some(ids[2]));
    }

    #[test]
    fn test_angle_in_front_down() {
        let ahead = Rect::new(0.0, 30.0, 20.0, 20.0);
        assert!(angle_in_front(ahead, Rect::new(40.0, 60.0, 20.0, 20.0), true));
        // Touching edges count as overlap.
        assert!(!angle_in_front(ahead, Rect::new(40.0, 50.0, 20.0, 20.0), true));
        assert!(!angle_in_front(ahead, Rect::new(40.0, 25.0, 20.0, 40.0), true));
    }

    #[test]
    fn test_angle_in_front_up() {
        let ahead = Rect::new(0.0, 60.0, 20.0, 20.0);
        assert!(angle_in_front(ahead, Rect::new(40.0, 20.0, 20.0, 20.0), false));
        assert!(!angle_in_front(ahead, Rect::new(40.0, 40.0, 20.0, 20.0), false));
        assert!(!angle_in_front(ahead, Rect::new(40.0, 50.0, 20.0, 40.0), false));
    }

    #[test]
    fn test_no_vertical_candidate_wraps() {
        let (registry, strip, ids) = grid(&[
            Rect::new(0.0, 0.0, 20.0, 20.0),
            Rect::new(30.0, 0.0, 20.0, 20.0),
        ]);
        assert_eq!(next_item(&registry, strip, Some(ids[1]), ArrowDirection::Down).unwrap(), Some(ids[0]));
        assert_eq!(next_item(&registry, strip, Some(ids[0]), ArrowDirection::Up).unwrap(), Some(ids[1]));
    }

    #[test]
    fn test_select_next_item_moves_selection() {
        let mut registry = StripRegistry::new();
        let (strip, ids) = list_strip(&mut registry, StripData::new(StripKind::ToolStrip), buttons(&["A", "B"]));

        assert_eq!(select_next_item(&mut registry, strip, ArrowDirection::Right).unwrap(), Some(ids[0]));
        assert_eq!(select_next_item(&mut registry, strip, ArrowDirection::Right).unwrap(), Some(ids[1]));
        assert!(registry.item(ids[1]).unwrap().is_selected());
        assert!(!registry.item(ids[0]).unwrap().is_selected());
    }
}
