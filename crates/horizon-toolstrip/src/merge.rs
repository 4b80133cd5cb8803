//! Reversible strip merging.
//!
//! Merging moves items from a source strip into a target strip according to
//! each source item's [`MergeAction`], e.g. an MDI child's menu merging into
//! its parent's menu bar. Items are moved, never copied: after a merge, the
//! source no longer lists what it contributed.
//!
//! Every elementary edit is recorded in a [`MergeHistory`] pushed onto the
//! target's history stack, tagged with the action that undoes it. Reverting
//! pops records and replays their edits newest first. Reverting a layer that
//! is not on top of the stack unwinds the layers above it and merges them
//! again afterwards, so they end up exactly where they were.
//!
//! # Example
//!
//! ```
//! use horizon_toolstrip::merge;
//! use horizon_toolstrip_core::{ItemData, StripData, StripKind, StripRegistry};
//!
//! let mut registry = StripRegistry::new();
//! let parent = registry.create_strip(StripData::new(StripKind::MenuStrip));
//! let child = registry.create_strip(StripData::new(StripKind::MenuStrip));
//! let y = registry.create_item(ItemData::menu_item("Y"));
//! let x = registry.create_item(ItemData::menu_item("X"));
//! registry.add_item(parent, y).unwrap();
//! registry.add_item(child, x).unwrap();
//!
//! assert!(merge::merge(&mut registry, child, parent).unwrap());
//! assert_eq!(registry.items(parent).unwrap(), &[y, x]);
//!
//! assert!(merge::revert_merge(&mut registry, parent, child).unwrap());
//! assert_eq!(registry.items(parent).unwrap(), &[y]);
//! assert_eq!(registry.items(child).unwrap(), &[x]);
//! ```

use horizon_toolstrip_core::logging::targets;
use horizon_toolstrip_core::{
    ItemId, MergeAction, MergeEdit, MergeHistory, Result, StripError, StripId, StripRegistry,
};

/// Whether `source` may merge into `target`.
///
/// The special MDI strips are always eligible. Any other pair needs merging
/// allowed on both sides and kinds where one derives from the other.
pub fn can_merge(registry: &StripRegistry, source: StripId, target: StripId) -> Result<bool> {
    let source = registry.strip(source)?;
    let target = registry.strip(target)?;
    if source.kind().is_special_mdi() {
        return Ok(true);
    }
    Ok(source.allow_merge()
        && target.allow_merge()
        && (source.kind().is_assignable_from(target.kind())
            || target.kind().is_assignable_from(source.kind())))
}

/// Merge the items of `source` into `target`.
///
/// Returns `true` if at least one edit was made. An ineligible pair is not an
/// error: it returns `false` without touching either strip.
///
/// # Errors
///
/// [`StripError::IdenticalMerge`] if `source == target`, or an invalid-ID
/// error if either strip does not exist.
#[tracing::instrument(skip(registry), target = "horizon_toolstrip::merge", level = "debug")]
pub fn merge(registry: &mut StripRegistry, source: StripId, target: StripId) -> Result<bool> {
    if source == target {
        return Err(StripError::IdenticalMerge(source));
    }
    if !can_merge(registry, source, target)? {
        tracing::debug!(target: targets::MERGE, ?source, ?target, "strips are not mergeable");
        return Ok(false);
    }

    let mut history = MergeHistory::new(source);
    merge_children(registry, source, target, &mut history)?;

    if history.is_empty() {
        return Ok(false);
    }
    tracing::debug!(target: targets::MERGE, ?source, ?target, edits = history.len(), "merged");
    registry.push_merge_history(target, history)?;
    Ok(true)
}

/// Merge `source` into the strip named `target_name`.
///
/// Returns `false` when no strip has that name.
pub fn merge_named(registry: &mut StripRegistry, source: StripId, target_name: &str) -> Result<bool> {
    match registry.find_strip_by_name(target_name) {
        Some(target) => merge(registry, source, target),
        None => Ok(false),
    }
}

/// Walk the source sequence, merging each item into `destination`.
///
/// A successful move takes the item out of the source, shifting everything
/// after it down by one, so the cursor only advances when the source did not
/// shrink.
fn merge_children(
    registry: &mut StripRegistry,
    source: StripId,
    destination: StripId,
    history: &mut MergeHistory,
) -> Result<()> {
    let original_count = registry.item_len(source)?;
    let mut last_count = original_count;
    let mut item_to_look_at = 0;

    for _ in 0..original_count {
        let Some(&item) = registry.items(source)?.get(item_to_look_at) else {
            break;
        };
        merge_recursive(registry, item, destination, history)?;

        let count = registry.item_len(source)?;
        if count >= last_count {
            item_to_look_at += 1;
        }
        last_count = count;
    }
    Ok(())
}

fn merge_recursive(
    registry: &mut StripRegistry,
    item: ItemId,
    destination: StripId,
    history: &mut MergeHistory,
) -> Result<()> {
    let data = registry.item(item)?;
    let action = data.merge_action();
    let merge_index = data.merge_index();

    match action {
        MergeAction::MatchOnly | MergeAction::Replace | MergeAction::Remove => {
            let Some(matched) = find_match(registry, item, destination)? else {
                return Ok(());
            };

            if action == MergeAction::MatchOnly {
                if let (Some(source_menu), Some(destination_menu)) =
                    (registry.drop_down_of(item), registry.drop_down_of(matched))
                    && registry.item_len(source_menu)? > 0
                {
                    tracing::trace!(target: targets::MERGE, ?item, ?matched, "merging drop-down children");
                    merge_children(registry, source_menu, destination_menu, history)?;
                }
                return Ok(());
            }

            let Some(index) = registry.index_of(destination, matched) else {
                return Ok(());
            };
            registry.remove_item(destination, matched)?;
            history.push(MergeEdit::Insert {
                item: matched,
                collection: destination,
                index,
            });

            if action == MergeAction::Replace {
                let Some((previous_collection, previous_index)) = current_position(registry, item)?
                else {
                    return Ok(());
                };
                registry.insert_item(destination, index, item)?;
                history.push(MergeEdit::Remove {
                    item,
                    collection: destination,
                    index,
                    previous_collection,
                    previous_index,
                });
            }
        }
        MergeAction::Insert => {
            let Some(merge_index) = merge_index else {
                return Ok(());
            };
            let Some((previous_collection, previous_index)) = current_position(registry, item)?
            else {
                return Ok(());
            };
            let index = merge_index.min(registry.item_len(destination)?);
            registry.insert_item(destination, index, item)?;
            history.push(MergeEdit::Remove {
                item,
                collection: destination,
                index,
                previous_collection,
                previous_index,
            });
        }
        MergeAction::Append => {
            let Some((previous_collection, previous_index)) = current_position(registry, item)?
            else {
                return Ok(());
            };
            let index = registry.add_item(destination, item)?;
            history.push(MergeEdit::Remove {
                item,
                collection: destination,
                index,
                previous_collection,
                previous_index,
            });
        }
    }
    Ok(())
}

/// The owner of a source item and its index there.
fn current_position(registry: &StripRegistry, item: ItemId) -> Result<Option<(StripId, usize)>> {
    let owner = registry.item(item)?.owner();
    let position = owner.and_then(|owner| Some((owner, registry.index_of(owner, item)?)));
    if position.is_none() {
        debug_assert!(position.is_some(), "source item {item:?} is not listed by its owner");
        tracing::warn!(target: targets::MERGE, ?item, ?owner, "source item has no position; skipping");
    }
    Ok(position)
}

/// Find the destination item a source item merges against.
///
/// The first destination item whose text equals the source text (ignoring
/// case) wins. Failing that, the item at the source's merge index, if the
/// index is in range.
pub fn find_match(
    registry: &StripRegistry,
    item: ItemId,
    destination: StripId,
) -> Result<Option<ItemId>> {
    let source = registry.item(item)?;
    let candidates = registry.items(destination)?;

    if !source.text().is_empty() {
        for &candidate in candidates {
            if text_matches(source.text(), registry.item(candidate)?.text()) {
                return Ok(Some(candidate));
            }
        }
    }
    Ok(source
        .merge_index()
        .and_then(|index| candidates.get(index).copied()))
}

fn text_matches(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_uppercase)
        .eq(b.chars().flat_map(char::to_uppercase))
}

/// Revert the merge of `source` into `target`.
///
/// Layers merged after `source` are unwound first. Ordinary layers are
/// merged again once `source` is out; special MDI layers are not.
///
/// # Errors
///
/// [`StripError::IdenticalMerge`] if `source == target`;
/// [`StripError::NotMerged`] if `source` is not in the target's history.
pub fn revert_merge(registry: &mut StripRegistry, target: StripId, source: StripId) -> Result<bool> {
    revert_merge_internal(registry, target, Some(source), false)
}

/// Revert every merge into `target`, keeping the special MDI layers.
pub fn revert_merge_all(registry: &mut StripRegistry, target: StripId) -> Result<bool> {
    revert_merge_internal(registry, target, None, false)
}

/// Revert every merge into the strip named `target_name`.
///
/// Returns `false` when no strip has that name.
pub fn revert_merge_named(registry: &mut StripRegistry, target_name: &str) -> Result<bool> {
    match registry.find_strip_by_name(target_name) {
        Some(target) => revert_merge_all(registry, target),
        None => Ok(false),
    }
}

/// Revert merges into `target`.
///
/// With a `source`, records are popped and replayed until the one for
/// `source` has been replayed; every other ordinary record popped on the way
/// is merged again afterwards, oldest first, while special MDI layers stay
/// reverted. Without a `source` the whole stack is
/// unwound, and the special MDI layers are merged again unless
/// `revert_mdi_controls` is set.
///
/// Returns `true` if anything was reverted.
#[tracing::instrument(skip(registry), target = "horizon_toolstrip::merge", level = "debug")]
pub fn revert_merge_internal(
    registry: &mut StripRegistry,
    target: StripId,
    source: Option<StripId>,
    revert_mdi_controls: bool,
) -> Result<bool> {
    if source == Some(target) {
        return Err(StripError::IdenticalMerge(target));
    }
    let stack = registry.strip(target)?.merge_history();
    if let Some(source) = source
        && !stack.iter().any(|h| h.merged_strip() == source)
    {
        return Err(StripError::NotMerged {
            source_strip: source,
            target,
        });
    }

    let mut reapply: Vec<StripId> = Vec::new();
    let mut reverted = false;
    let mut found = false;

    while !found {
        let Some(history) = registry.pop_merge_history(target)? else {
            break;
        };
        reverted = true;
        let merged = history.merged_strip();
        let special = registry
            .strip(merged)
            .is_ok_and(|strip| strip.kind().is_special_mdi());

        if Some(merged) == source {
            found = true;
        } else if source.is_some() {
            if !special {
                reapply.push(merged);
            }
        } else if !revert_mdi_controls && special {
            reapply.push(merged);
        }

        tracing::trace!(target: targets::MERGE, ?target, ?merged, edits = history.len(), "replaying merge record");
        replay(registry, history)?;
    }

    while let Some(strip) = reapply.pop() {
        if !registry.contains_strip(strip) {
            tracing::warn!(target: targets::MERGE, ?strip, "merged strip no longer exists; not reapplying");
            continue;
        }
        merge(registry, strip, target)?;
    }
    Ok(reverted)
}

/// Undo one merge record, newest edit first.
fn replay(registry: &mut StripRegistry, history: MergeHistory) -> Result<()> {
    for edit in history.into_revert_order() {
        match edit {
            MergeEdit::Remove {
                item,
                collection,
                previous_collection,
                previous_index,
                ..
            } => {
                if !registry.contains_item(item) || !registry.contains_strip(previous_collection) {
                    tracing::warn!(target: targets::MERGE, ?item, ?previous_collection, "stale merge edit; skipping");
                    continue;
                }
                if registry.contains_strip(collection) {
                    registry.remove_item(collection, item)?;
                }
                insert_clamped(registry, previous_collection, previous_index, item)?;
            }
            MergeEdit::Insert {
                item,
                collection,
                index,
            } => {
                if !registry.contains_item(item) || !registry.contains_strip(collection) {
                    tracing::warn!(target: targets::MERGE, ?item, ?collection, "stale merge edit; skipping");
                    continue;
                }
                insert_clamped(registry, collection, index, item)?;
            }
        }
    }
    Ok(())
}

/// Insert `item` at `index`, clamped to the length the strip has once the
/// item has left its current owner.
fn insert_clamped(
    registry: &mut StripRegistry,
    strip: StripId,
    index: usize,
    item: ItemId,
) -> Result<()> {
    if let Some(owner) = registry.item(item)?.owner() {
        registry.remove_item(owner, item)?;
    }
    let index = index.min(registry.item_len(strip)?);
    registry.insert_item(strip, index, item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_toolstrip_core::{ItemData, StripData, StripKind};

    fn strip(registry: &mut StripRegistry, kind: StripKind, texts: &[&str]) -> (StripId, Vec<ItemId>) {
        let id = registry.create_strip(StripData::new(kind));
        let items = texts
            .iter()
            .map(|text| {
                let item = registry.create_item(ItemData::menu_item(*text));
                registry.add_item(id, item).unwrap();
                item
            })
            .collect();
        (id, items)
    }

    fn set_action(registry: &mut StripRegistry, item: ItemId, action: MergeAction) {
        registry.item_mut(item).unwrap().set_merge_action(action);
    }

    #[test]
    fn test_append_and_revert() {
        let mut registry = StripRegistry::new();
        let (dest, d) = strip(&mut registry, StripKind::MenuStrip, &["Y"]);
        let (src, s) = strip(&mut registry, StripKind::MenuStrip, &["X"]);

        assert!(merge(&mut registry, src, dest).unwrap());
        assert_eq!(registry.items(dest).unwrap(), &[d[0], s[0]]);
        assert!(registry.items(src).unwrap().is_empty());
        assert_eq!(registry.item(s[0]).unwrap().owner(), Some(dest));

        assert!(revert_merge(&mut registry, dest, src).unwrap());
        assert_eq!(registry.items(dest).unwrap(), &[d[0]]);
        assert_eq!(registry.items(src).unwrap(), &[s[0]]);
        assert!(registry.strip(dest).unwrap().merge_history().is_empty());
    }

    #[test]
    fn test_replace_and_revert() {
        let mut registry = StripRegistry::new();
        let (dest, d) = strip(&mut registry, StripKind::MenuStrip, &["File", "Edit", "Help"]);
        let (src, s) = strip(&mut registry, StripKind::MenuStrip, &["edit"]);
        set_action(&mut registry, s[0], MergeAction::Replace);

        assert!(merge(&mut registry, src, dest).unwrap());
        assert_eq!(registry.items(dest).unwrap(), &[d[0], s[0], d[2]]);
        assert_eq!(registry.item(d[1]).unwrap().owner(), None);

        revert_merge(&mut registry, dest, src).unwrap();
        assert_eq!(registry.items(dest).unwrap(), &d[..]);
        assert_eq!(registry.items(src).unwrap(), &s[..]);
        assert!(registry.verify_ownership());
    }

    #[test]
    fn test_remove_keeps_source_item() {
        let mut registry = StripRegistry::new();
        let (dest, d) = strip(&mut registry, StripKind::MenuStrip, &["File", "Window"]);
        let (src, s) = strip(&mut registry, StripKind::MenuStrip, &["Window"]);
        set_action(&mut registry, s[0], MergeAction::Remove);

        assert!(merge(&mut registry, src, dest).unwrap());
        assert_eq!(registry.items(dest).unwrap(), &[d[0]]);
        assert_eq!(registry.items(src).unwrap(), &[s[0]]);

        revert_merge(&mut registry, dest, src).unwrap();
        assert_eq!(registry.items(dest).unwrap(), &d[..]);
    }

    #[test]
    fn test_insert_clamps_merge_index() {
        let mut registry = StripRegistry::new();
        let (dest, d) = strip(&mut registry, StripKind::MenuStrip, &["A", "B"]);
        let (src, s) = strip(&mut registry, StripKind::MenuStrip, &["Front", "Back"]);
        set_action(&mut registry, s[0], MergeAction::Insert);
        registry.item_mut(s[0]).unwrap().set_merge_index(Some(0));
        set_action(&mut registry, s[1], MergeAction::Insert);
        registry.item_mut(s[1]).unwrap().set_merge_index(Some(99));

        assert!(merge(&mut registry, src, dest).unwrap());
        assert_eq!(registry.items(dest).unwrap(), &[s[0], d[0], d[1], s[1]]);
    }

    #[test]
    fn test_insert_without_index_is_a_no_op() {
        let mut registry = StripRegistry::new();
        let (dest, d) = strip(&mut registry, StripKind::MenuStrip, &["A"]);
        let (src, s) = strip(&mut registry, StripKind::MenuStrip, &["B"]);
        set_action(&mut registry, s[0], MergeAction::Insert);

        assert!(!merge(&mut registry, src, dest).unwrap());
        assert_eq!(registry.items(dest).unwrap(), &d[..]);
        assert!(registry.strip(dest).unwrap().merge_history().is_empty());
    }

    #[test]
    fn test_cursor_skips_items_that_stay() {
        let mut registry = StripRegistry::new();
        let (dest, d) = strip(&mut registry, StripKind::MenuStrip, &["Z"]);
        let (src, s) = strip(&mut registry, StripKind::MenuStrip, &["A", "B", "C", "D"]);
        set_action(&mut registry, s[1], MergeAction::MatchOnly);

        assert!(merge(&mut registry, src, dest).unwrap());
        assert_eq!(registry.items(dest).unwrap(), &[d[0], s[0], s[2], s[3]]);
        assert_eq!(registry.items(src).unwrap(), &[s[1]]);
    }

    #[test]
    fn test_match_only_merges_drop_downs() {
        let mut registry = StripRegistry::new();
        let dest = registry.create_strip(StripData::new(StripKind::MenuStrip));
        let file = registry.create_drop_down_item(ItemData::menu_item("&File"));
        registry.add_item(dest, file).unwrap();
        let file_menu = registry.drop_down_of(file).unwrap();
        let exit = registry.create_item(ItemData::menu_item("E&xit"));
        registry.add_item(file_menu, exit).unwrap();

        let src = registry.create_strip(StripData::new(StripKind::MenuStrip));
        let child_file = registry.create_drop_down_item(
            ItemData::menu_item("&file").with_merge_action(MergeAction::MatchOnly),
        );
        registry.add_item(src, child_file).unwrap();
        let child_menu = registry.drop_down_of(child_file).unwrap();
        let save = registry.create_item(
            ItemData::menu_item("&Save")
                .with_merge_action(MergeAction::Insert)
                .with_merge_index(0),
        );
        registry.add_item(child_menu, save).unwrap();

        assert!(merge(&mut registry, src, dest).unwrap());
        assert_eq!(registry.items(dest).unwrap(), &[file]);
        assert_eq!(registry.items(file_menu).unwrap(), &[save, exit]);
        assert_eq!(registry.items(src).unwrap(), &[child_file]);
        assert!(registry.items(child_menu).unwrap().is_empty());

        revert_merge(&mut registry, dest, src).unwrap();
        assert_eq!(registry.items(file_menu).unwrap(), &[exit]);
        assert_eq!(registry.items(child_menu).unwrap(), &[save]);
    }

    #[test]
    fn test_match_by_merge_index() {
        let mut registry = StripRegistry::new();
        let (dest, d) = strip(&mut registry, StripKind::MenuStrip, &["A", "B"]);
        let (_, s) = strip(&mut registry, StripKind::MenuStrip, &["Other"]);
        set_action(&mut registry, s[0], MergeAction::Replace);
        registry.item_mut(s[0]).unwrap().set_merge_index(Some(1));

        assert_eq!(find_match(&registry, s[0], dest).unwrap(), Some(d[1]));
        registry.item_mut(s[0]).unwrap().set_merge_index(Some(2));
        assert_eq!(find_match(&registry, s[0], dest).unwrap(), None);
        registry.item_mut(s[0]).unwrap().set_merge_index(None);
        assert_eq!(find_match(&registry, s[0], dest).unwrap(), None);
    }

    #[test]
    fn test_self_merge_is_an_error() {
        let mut registry = StripRegistry::new();
        let (dest, _) = strip(&mut registry, StripKind::MenuStrip, &["A"]);
        assert_eq!(merge(&mut registry, dest, dest), Err(StripError::IdenticalMerge(dest)));
        assert_eq!(
            revert_merge(&mut registry, dest, dest),
            Err(StripError::IdenticalMerge(dest))
        );
    }

    #[test]
    fn test_revert_unknown_source_is_an_error() {
        let mut registry = StripRegistry::new();
        let (dest, _) = strip(&mut registry, StripKind::MenuStrip, &["A"]);
        let (src, _) = strip(&mut registry, StripKind::MenuStrip, &["B"]);
        assert_eq!(
            revert_merge(&mut registry, dest, src),
            Err(StripError::NotMerged {
                source_strip: src,
                target: dest
            })
        );
    }

    #[test]
    fn test_ineligible_merge_is_silent() {
        let mut registry = StripRegistry::new();
        let (dest, d) = strip(&mut registry, StripKind::MenuStrip, &["A"]);
        let (src, s) = strip(&mut registry, StripKind::MenuStrip, &["B"]);
        registry.strip_mut(src).unwrap().set_allow_merge(false);

        assert!(!merge(&mut registry, src, dest).unwrap());
        assert_eq!(registry.items(dest).unwrap(), &d[..]);
        assert_eq!(registry.items(src).unwrap(), &s[..]);

        let (status, _) = strip(&mut registry, StripKind::StatusStrip, &["C"]);
        assert!(!can_merge(&registry, status, dest).unwrap());
        assert!(!merge(&mut registry, status, dest).unwrap());
    }

    #[test]
    fn test_special_mdi_always_eligible() {
        let mut registry = StripRegistry::new();
        let (dest, _) = strip(&mut registry, StripKind::MenuStrip, &["A"]);
        registry.strip_mut(dest).unwrap().set_allow_merge(false);
        let (mdi, _) = strip(&mut registry, StripKind::MdiControlStrip, &["Close"]);
        assert!(can_merge(&registry, mdi, dest).unwrap());
    }

    #[test]
    fn test_partial_revert_reapplies_later_layers() {
        let mut registry = StripRegistry::new();
        let (dest, d) = strip(&mut registry, StripKind::MenuStrip, &["D"]);
        let (a, sa) = strip(&mut registry, StripKind::MenuStrip, &["A"]);
        let (b, sb) = strip(&mut registry, StripKind::MenuStrip, &["B"]);

        merge(&mut registry, a, dest).unwrap();
        merge(&mut registry, b, dest).unwrap();
        assert_eq!(registry.items(dest).unwrap(), &[d[0], sa[0], sb[0]]);

        assert!(revert_merge(&mut registry, dest, a).unwrap());
        assert_eq!(registry.items(dest).unwrap(), &[d[0], sb[0]]);
        assert_eq!(registry.items(a).unwrap(), &sa[..]);
        let history = registry.strip(dest).unwrap().merge_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].merged_strip(), b);
    }

    #[test]
    fn test_revert_with_source_drops_mdi_layers() {
        let mut registry = StripRegistry::new();
        let (dest, _) = strip(&mut registry, StripKind::MenuStrip, &[]);
        let (a, sa) = strip(&mut registry, StripKind::MenuStrip, &["A"]);
        let (mdi, m) = strip(&mut registry, StripKind::MdiWindowListStrip, &["Window"]);

        merge(&mut registry, a, dest).unwrap();
        merge(&mut registry, mdi, dest).unwrap();
        assert_eq!(registry.items(dest).unwrap(), &[sa[0], m[0]]);

        assert!(revert_merge(&mut registry, dest, a).unwrap());
        assert!(registry.items(dest).unwrap().is_empty());
        assert_eq!(registry.items(a).unwrap(), &sa[..]);
        assert_eq!(registry.items(mdi).unwrap(), &m[..]);
        assert!(registry.strip(dest).unwrap().merge_history().is_empty());
        assert!(registry.verify_ownership());
    }

    #[test]
    fn test_revert_with_source_keeps_ordinary_layers_above_mdi() {
        let mut registry = StripRegistry::new();
        let (dest, _) = strip(&mut registry, StripKind::MenuStrip, &[]);
        let (a, _) = strip(&mut registry, StripKind::MenuStrip, &["A"]);
        let (mdi, m) = strip(&mut registry, StripKind::MdiControlStrip, &["Close"]);
        let (b, sb) = strip(&mut registry, StripKind::MenuStrip, &["B"]);

        merge(&mut registry, a, dest).unwrap();
        merge(&mut registry, mdi, dest).unwrap();
        merge(&mut registry, b, dest).unwrap();

        assert!(revert_merge(&mut registry, dest, a).unwrap());
        assert_eq!(registry.items(dest).unwrap(), &sb[..]);
        assert_eq!(registry.items(mdi).unwrap(), &m[..]);
        let history = registry.strip(dest).unwrap().merge_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].merged_strip(), b);
    }

    #[test]
    fn test_revert_all_keeps_mdi_layers() {
        let mut registry = StripRegistry::new();
        let (dest, d) = strip(&mut registry, StripKind::MenuStrip, &["File"]);
        let (mdi, m) = strip(&mut registry, StripKind::MdiWindowListStrip, &["Window"]);
        let (child, c) = strip(&mut registry, StripKind::MenuStrip, &["Tools"]);

        merge(&mut registry, mdi, dest).unwrap();
        merge(&mut registry, child, dest).unwrap();

        assert!(revert_merge_all(&mut registry, dest).unwrap());
        assert_eq!(registry.items(dest).unwrap(), &[d[0], m[0]]);
        assert_eq!(registry.items(child).unwrap(), &c[..]);

        assert!(revert_merge_internal(&mut registry, dest, None, true).unwrap());
        assert_eq!(registry.items(dest).unwrap(), &d[..]);
        assert_eq!(registry.items(mdi).unwrap(), &m[..]);
        assert!(!revert_merge_all(&mut registry, dest).unwrap());
    }

    #[test]
    fn test_merge_named() {
        let mut registry = StripRegistry::new();
        let dest = registry.create_strip(StripData::new(StripKind::MenuStrip).with_name("MainMenu"));
        let (src, s) = strip(&mut registry, StripKind::MenuStrip, &["X"]);

        assert!(!merge_named(&mut registry, src, "Missing").unwrap());
        assert!(merge_named(&mut registry, src, "MainMenu").unwrap());
        assert_eq!(registry.items(dest).unwrap(), &s[..]);
        assert!(revert_merge_named(&mut registry, "MainMenu").unwrap());
        assert_eq!(registry.items(src).unwrap(), &s[..]);
    }

    #[test]
    fn test_text_matches_ignores_case() {
        assert!(text_matches("&File", "&FILE"));
        assert!(!text_matches("File", "Files"));
    }
}
