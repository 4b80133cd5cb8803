//! Prelude module for Horizon ToolStrip.
//!
//! ```ignore
//! use horizon_toolstrip::prelude::*;
//! ```
//!
//! This provides access to:
//! - The registry and its handles (`StripRegistry`, `StripId`, `ItemId`)
//! - Item and strip configuration (`ItemData`, `StripData` and their enums)
//! - The engine entry points (layout, partition, merge, navigation, mnemonics)

// ============================================================================
// Object Model
// ============================================================================

pub use crate::{
    Alignment, DisplayStyle, ItemData, ItemId, ItemKind, LayoutStyle, MergeAction,
    OverflowPolicy, Placement, Rect, Result, SharedStripRegistry, Size, StripData, StripError,
    StripId, StripKind, StripRegistry,
};

// ============================================================================
// Layout and Partitioning
// ============================================================================

pub use crate::layout::{StackLayout, StripStyle, perform_layout};
pub use crate::partition::{Partition, update_displayed_items};

// ============================================================================
// Merging
// ============================================================================

pub use crate::merge::{merge, revert_merge, revert_merge_all};

// ============================================================================
// Keyboard
// ============================================================================

pub use crate::mnemonic::{MatchOutcome, MnemonicAction, process_mnemonic};
pub use crate::navigation::{ArrowDirection, select_next_item};
