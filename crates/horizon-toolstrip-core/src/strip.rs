//! Strip (item container) model.
//!
//! A strip owns an ordered item sequence. Order is meaningful three ways at
//! once: it is the z-order, the tab order and the anchor order for merges.
//! The displayed and overflow collections are derived from it on every
//! layout pass and are never edited by hand.

use slotmap::new_key_type;

use crate::geometry::Size;
use crate::history::MergeHistory;
use crate::item::ItemId;

new_key_type! {
    /// A stable handle to a strip in the registry.
    pub struct StripId;
}

/// The concrete kind of a strip.
///
/// Kinds form a single-inheritance hierarchy rooted at [`StripKind::ToolStrip`];
/// merge compatibility is decided by walking it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StripKind {
    /// A plain toolbar.
    #[default]
    ToolStrip,
    /// A window menu bar.
    MenuStrip,
    /// A status bar.
    StatusStrip,
    /// A popup strip.
    DropDown,
    /// A popup menu (the children of a menu item).
    DropDownMenu,
    /// A context menu.
    ContextMenu,
    /// The popup listing a strip's overflow items.
    Overflow,
    /// The system-control strip merged in by an MDI parent.
    MdiControlStrip,
    /// The window-list strip merged in by an MDI parent.
    MdiWindowListStrip,
}

impl StripKind {
    /// The kind this kind derives from.
    pub fn base(self) -> Option<StripKind> {
        match self {
            Self::ToolStrip => None,
            Self::MenuStrip | Self::StatusStrip | Self::DropDown => Some(Self::ToolStrip),
            Self::DropDownMenu | Self::Overflow => Some(Self::DropDown),
            Self::ContextMenu => Some(Self::DropDownMenu),
            Self::MdiControlStrip | Self::MdiWindowListStrip => Some(Self::MenuStrip),
        }
    }

    /// Whether a strip of kind `other` can stand in for a strip of this kind,
    /// i.e. `other` is this kind or derives from it.
    pub fn is_assignable_from(self, other: StripKind) -> bool {
        let mut current = Some(other);
        while let Some(kind) = current {
            if kind == self {
                return true;
            }
            current = kind.base();
        }
        false
    }

    /// The two MDI strips that are always eligible to merge.
    pub fn is_special_mdi(self) -> bool {
        matches!(self, Self::MdiControlStrip | Self::MdiWindowListStrip)
    }

    /// Whether strips of this kind are popups.
    pub fn is_drop_down(self) -> bool {
        StripKind::DropDown.is_assignable_from(self)
    }
}

/// How a strip arranges its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutStyle {
    /// A horizontal list with an overflow popup.
    #[default]
    HorizontalStackWithOverflow,
    /// A vertical list with an overflow popup.
    VerticalStackWithOverflow,
    /// Items wrap like text.
    Flow,
    /// Items sit in a grid.
    Table,
}

impl LayoutStyle {
    /// Whether this is a list layout (the only styles that partition into
    /// head, tail and overflow).
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Self::HorizontalStackWithOverflow | Self::VerticalStackWithOverflow
        )
    }
}

/// Primary axis of a strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Per-strip state stored in the registry.
#[derive(Debug, Clone)]
pub struct StripData {
    pub(crate) kind: StripKind,
    pub(crate) name: String,
    pub(crate) layout_style: LayoutStyle,
    pub(crate) right_to_left: bool,
    pub(crate) can_overflow: bool,
    pub(crate) grip_visible: bool,
    pub(crate) allow_merge: bool,
    pub(crate) available_size: Size,
    pub(crate) items: Vec<ItemId>,
    pub(crate) displayed: Vec<ItemId>,
    pub(crate) overflow: Vec<ItemId>,
    pub(crate) has_visible_items: bool,
    pub(crate) selected: Option<ItemId>,
    pub(crate) merge_history: Vec<MergeHistory>,
    pub(crate) grip: Option<ItemId>,
    pub(crate) overflow_button: Option<ItemId>,
    pub(crate) overflow_popup: Option<StripId>,
    pub(crate) owner_item: Option<ItemId>,
}

impl StripData {
    /// Create strip state of the given kind.
    ///
    /// Drop-downs default to a vertical list without a grip; menu strips do
    /// not overflow and show no grip; every other kind defaults to a
    /// horizontal list with a visible grip that can overflow.
    pub fn new(kind: StripKind) -> Self {
        let (layout_style, grip_visible, can_overflow) = if kind.is_drop_down() {
            (LayoutStyle::VerticalStackWithOverflow, false, false)
        } else if StripKind::MenuStrip.is_assignable_from(kind) {
            (LayoutStyle::HorizontalStackWithOverflow, false, false)
        } else if kind == StripKind::StatusStrip {
            (LayoutStyle::Table, false, false)
        } else {
            (LayoutStyle::HorizontalStackWithOverflow, true, true)
        };
        Self {
            kind,
            name: String::new(),
            layout_style,
            right_to_left: false,
            can_overflow,
            grip_visible,
            allow_merge: true,
            available_size: Size::new(f32::INFINITY, 25.0),
            items: Vec::new(),
            displayed: Vec::new(),
            overflow: Vec::new(),
            has_visible_items: false,
            selected: None,
            merge_history: Vec::new(),
            grip: None,
            overflow_button: None,
            overflow_popup: None,
            owner_item: None,
        }
    }

    /// Set the strip name (used for lookup by name).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the layout style.
    pub fn with_layout_style(mut self, style: LayoutStyle) -> Self {
        self.layout_style = style;
        self
    }

    /// Set the reading direction.
    pub fn with_right_to_left(mut self, rtl: bool) -> Self {
        self.right_to_left = rtl;
        self
    }

    /// Set whether items may move to the overflow popup.
    pub fn with_can_overflow(mut self, can_overflow: bool) -> Self {
        self.can_overflow = can_overflow;
        self
    }

    /// Set whether the grip is shown.
    pub fn with_grip_visible(mut self, visible: bool) -> Self {
        self.grip_visible = visible;
        self
    }

    /// Set whether the strip takes part in merges.
    pub fn with_allow_merge(mut self, allow: bool) -> Self {
        self.allow_merge = allow;
        self
    }

    /// Set the size the layout pass may fill.
    pub fn with_available_size(mut self, size: Size) -> Self {
        self.available_size = size;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn kind(&self) -> StripKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn layout_style(&self) -> LayoutStyle {
        self.layout_style
    }

    pub fn set_layout_style(&mut self, style: LayoutStyle) {
        self.layout_style = style;
    }

    /// The primary axis implied by the layout style and kind.
    pub fn orientation(&self) -> Orientation {
        match self.layout_style {
            LayoutStyle::VerticalStackWithOverflow => Orientation::Vertical,
            _ => Orientation::Horizontal,
        }
    }

    pub fn is_right_to_left(&self) -> bool {
        self.right_to_left
    }

    pub fn set_right_to_left(&mut self, rtl: bool) {
        self.right_to_left = rtl;
    }

    pub fn can_overflow(&self) -> bool {
        self.can_overflow
    }

    pub fn set_can_overflow(&mut self, can_overflow: bool) {
        self.can_overflow = can_overflow;
    }

    pub fn is_grip_visible(&self) -> bool {
        self.grip_visible
    }

    pub fn set_grip_visible(&mut self, visible: bool) {
        self.grip_visible = visible;
    }

    pub fn allow_merge(&self) -> bool {
        self.allow_merge
    }

    pub fn set_allow_merge(&mut self, allow: bool) {
        self.allow_merge = allow;
    }

    pub fn available_size(&self) -> Size {
        self.available_size
    }

    pub fn set_available_size(&mut self, size: Size) {
        self.available_size = size;
    }

    /// The ordered item sequence.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Items on the primary surface after the last layout pass.
    pub fn displayed_items(&self) -> &[ItemId] {
        &self.displayed
    }

    /// Items in the overflow popup after the last layout pass.
    pub fn overflow_items(&self) -> &[ItemId] {
        &self.overflow
    }

    /// Whether the last layout pass displayed at least one real item.
    pub fn has_visible_items(&self) -> bool {
        self.has_visible_items
    }

    pub fn selected_item(&self) -> Option<ItemId> {
        self.selected
    }

    /// The merge history stack, oldest first.
    pub fn merge_history(&self) -> &[MergeHistory] {
        &self.merge_history
    }

    /// The grip pseudo-item.
    pub fn grip(&self) -> Option<ItemId> {
        self.grip
    }

    /// The overflow button pseudo-item.
    pub fn overflow_button(&self) -> Option<ItemId> {
        self.overflow_button
    }

    /// The popup strip that displays overflow items.
    pub fn overflow_popup(&self) -> Option<StripId> {
        self.overflow_popup
    }

    /// For drop-down strips, the item that owns the drop-down.
    pub fn owner_item(&self) -> Option<ItemId> {
        self.owner_item
    }
}
