//! Error types for Horizon ToolStrip.
//!
//! Only caller-contract violations are errors. Expected steady-state
//! outcomes (an ineligible merge, no navigation candidate, no mnemonic
//! match) are reported through `bool` / `Option` return values instead.

use crate::item::ItemId;
use crate::strip::StripId;

/// Result type alias for toolstrip operations.
pub type Result<T> = std::result::Result<T, StripError>;

/// Errors that can occur when operating on strips and items.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StripError {
    /// A strip was asked to merge with (or revert from) itself.
    #[error("Cannot merge strip {0:?} with itself")]
    IdenticalMerge(StripId),

    /// The requested source never merged into the target.
    #[error("Strip {source_strip:?} is not part of the merge history of {target:?}")]
    NotMerged {
        source_strip: StripId,
        target: StripId,
    },

    /// The strip ID is invalid or the strip has been destroyed.
    #[error("Invalid or destroyed strip ID {0:?}")]
    InvalidStrip(StripId),

    /// The item ID is invalid or the item has been destroyed.
    #[error("Invalid or destroyed item ID {0:?}")]
    InvalidItem(ItemId),

    /// An insertion index was past the end of the item sequence.
    #[error("Index {index} out of range for strip with {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// The item is a pseudo-item (grip or overflow button) that cannot be
    /// placed in an item sequence.
    #[error("Item {0:?} is a pseudo-item and cannot be added to a strip")]
    PseudoItem(ItemId),
}
