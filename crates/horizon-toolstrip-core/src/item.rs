//! Item model.
//!
//! An item is anything a strip lays out: buttons, labels, separators, menu
//! items, and the two pseudo-items every strip owns (its grip and its
//! overflow button). Items live in the [`StripRegistry`](crate::StripRegistry)
//! arena and are referenced by [`ItemId`]; the owner and parent links are
//! plain handles, never strong references.

use slotmap::new_key_type;

use crate::geometry::{Rect, Size};
use crate::strip::StripId;

new_key_type! {
    /// A stable handle to an item in the registry.
    ///
    /// Handles stay valid while the item moves between strips and become
    /// invalid once the item is destroyed.
    pub struct ItemId;
}

/// The concrete kind of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemKind {
    /// A push button.
    #[default]
    Button,
    /// A static text label.
    Label,
    /// A visual separator between groups of items.
    Separator,
    /// An entry of a menu strip or drop-down menu.
    MenuItem,
    /// A button that opens a drop-down.
    DropDownButton,
    /// A button with a separate drop-down arrow.
    SplitButton,
    /// An embedded single-line text field.
    TextBox,
    /// The drag handle pseudo-item of a list-layout strip.
    Grip,
    /// The pseudo-item that opens the overflow popup.
    OverflowButton,
}

impl ItemKind {
    /// Whether items of this kind can ever take keyboard selection.
    pub fn is_selectable(self) -> bool {
        !matches!(self, Self::Separator | Self::Label | Self::Grip)
    }

    /// Whether this is a menu entry (eligible for first-letter mnemonics).
    pub fn is_menu_item(self) -> bool {
        self == Self::MenuItem
    }

    /// Whether items of this kind own a drop-down strip of child items.
    pub fn has_drop_down(self) -> bool {
        matches!(
            self,
            Self::MenuItem | Self::DropDownButton | Self::SplitButton | Self::OverflowButton
        )
    }

    /// Whether this is a strip-owned pseudo-item rather than a user item.
    pub fn is_pseudo(self) -> bool {
        matches!(self, Self::Grip | Self::OverflowButton)
    }
}

/// Which end of a list-layout strip an item is packed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Leading edge (left in left-to-right horizontal strips).
    #[default]
    Head,
    /// Trailing edge.
    Tail,
}

/// How an item behaves when the strip runs out of room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverflowPolicy {
    /// Never moved to the overflow popup.
    Never,
    /// Always shown in the overflow popup.
    Always,
    /// Moved to the overflow popup only when it does not fit.
    #[default]
    AsNeeded,
}

/// What a merge does with an item of the source strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MergeAction {
    /// Add the item to the end of the target.
    #[default]
    Append,
    /// Insert the item at its merge index.
    Insert,
    /// Replace the matching target item.
    Replace,
    /// Remove the matching target item.
    Remove,
    /// Only match; merge drop-down children into the matching item.
    MatchOnly,
}

/// Which parts of an item are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayStyle {
    None,
    Text,
    Image,
    #[default]
    ImageAndText,
}

impl DisplayStyle {
    /// Whether the text of the item is rendered.
    pub fn shows_text(self) -> bool {
        matches!(self, Self::Text | Self::ImageAndText)
    }
}

/// Where an item ended up after a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    /// On the primary surface.
    #[default]
    Main,
    /// In the overflow popup.
    Overflow,
    /// Not laid out at all.
    None,
}

/// Per-item state stored in the registry.
#[derive(Debug, Clone)]
pub struct ItemData {
    pub(crate) kind: ItemKind,
    pub(crate) text: String,
    pub(crate) name: String,
    pub(crate) bounds: Rect,
    pub(crate) preferred_size: Size,
    pub(crate) alignment: Alignment,
    pub(crate) overflow: OverflowPolicy,
    pub(crate) merge_action: MergeAction,
    pub(crate) merge_index: Option<usize>,
    pub(crate) available: bool,
    pub(crate) enabled: bool,
    pub(crate) display_style: DisplayStyle,
    pub(crate) placement_hint: Placement,
    pub(crate) placement: Placement,
    pub(crate) owner: Option<StripId>,
    pub(crate) parent: Option<StripId>,
    pub(crate) selected: bool,
    pub(crate) drop_down: Option<StripId>,
}

impl ItemData {
    /// Create an item of the given kind with default state.
    pub fn new(kind: ItemKind, text: impl Into<String>) -> Self {
        let display_style = match kind {
            ItemKind::Separator | ItemKind::Grip | ItemKind::OverflowButton => DisplayStyle::None,
            _ => DisplayStyle::default(),
        };
        let preferred_size = match kind {
            ItemKind::Separator => Size::new(6.0, 24.0),
            ItemKind::Grip => Size::new(6.0, 24.0),
            ItemKind::OverflowButton => Size::new(16.0, 24.0),
            _ => Size::new(24.0, 24.0),
        };
        Self {
            kind,
            text: text.into(),
            name: String::new(),
            bounds: Rect::ZERO,
            preferred_size,
            alignment: Alignment::Head,
            overflow: OverflowPolicy::default(),
            merge_action: MergeAction::default(),
            merge_index: None,
            available: true,
            enabled: true,
            display_style,
            placement_hint: Placement::Main,
            placement: Placement::None,
            owner: None,
            parent: None,
            selected: false,
            drop_down: None,
        }
    }

    /// A push button.
    pub fn button(text: impl Into<String>) -> Self {
        Self::new(ItemKind::Button, text)
    }

    /// A static label.
    pub fn label(text: impl Into<String>) -> Self {
        Self::new(ItemKind::Label, text)
    }

    /// A separator.
    pub fn separator() -> Self {
        Self::new(ItemKind::Separator, "")
    }

    /// A menu entry. Use [`StripRegistry::create_drop_down_item`](crate::StripRegistry::create_drop_down_item)
    /// to give it a drop-down of children.
    pub fn menu_item(text: impl Into<String>) -> Self {
        Self::new(ItemKind::MenuItem, text)
    }

    /// Set the item name used for lookup and debugging.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the overflow policy.
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Set the merge action.
    pub fn with_merge_action(mut self, action: MergeAction) -> Self {
        self.merge_action = action;
        self
    }

    /// Set the merge index.
    pub fn with_merge_index(mut self, index: usize) -> Self {
        self.merge_index = Some(index);
        self
    }

    /// Set whether the item takes part in layout.
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Set whether the item is enabled.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the display style.
    pub fn with_display_style(mut self, style: DisplayStyle) -> Self {
        self.display_style = style;
        self
    }

    /// Set the size the layout pass should reserve for the item.
    pub fn with_preferred_size(mut self, size: Size) -> Self {
        self.preferred_size = size;
        self
    }

    /// Set the bounds directly (for hosts with their own layout pass).
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Set the bounds. Normally written by the layout pass only.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn preferred_size(&self) -> Size {
        self.preferred_size
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    pub fn overflow(&self) -> OverflowPolicy {
        self.overflow
    }

    pub fn set_overflow(&mut self, overflow: OverflowPolicy) {
        self.overflow = overflow;
    }

    pub fn merge_action(&self) -> MergeAction {
        self.merge_action
    }

    pub fn set_merge_action(&mut self, action: MergeAction) {
        self.merge_action = action;
    }

    /// The merge index, `None` when unset.
    pub fn merge_index(&self) -> Option<usize> {
        self.merge_index
    }

    pub fn set_merge_index(&mut self, index: Option<usize>) {
        self.merge_index = index;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn display_style(&self) -> DisplayStyle {
        self.display_style
    }

    pub fn set_display_style(&mut self, style: DisplayStyle) {
        self.display_style = style;
    }

    /// Whether the item takes part in layout at all.
    pub fn participates_in_layout(&self) -> bool {
        self.available
    }

    /// Whether keyboard selection may land on this item.
    pub fn can_select(&self) -> bool {
        self.enabled && self.available && self.kind.is_selectable()
    }

    /// The placement suggested by the most recent layout pass.
    pub fn placement_hint(&self) -> Placement {
        self.placement_hint
    }

    /// Record the layout pass's verdict (fits vs. overflowed).
    pub fn set_placement_hint(&mut self, hint: Placement) {
        self.placement_hint = hint;
    }

    /// The placement decided by the most recent partition.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// The strip whose item sequence holds this item.
    pub fn owner(&self) -> Option<StripId> {
        self.owner
    }

    /// The strip currently displaying this item. Differs from the owner only
    /// while the item sits in an overflow popup.
    pub fn parent(&self) -> Option<StripId> {
        self.parent
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// The drop-down strip holding this item's children, if any.
    pub fn drop_down(&self) -> Option<StripId> {
        self.drop_down
    }
}
