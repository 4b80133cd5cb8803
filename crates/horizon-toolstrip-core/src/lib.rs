//! Core object model for Horizon ToolStrip.
//!
//! This crate provides the foundational pieces the composition engine in
//! `horizon-toolstrip` works on:
//!
//! - **Registry**: arena storage for strips and items with stable handles
//! - **Item model**: alignment, overflow policy, merge action, enablement
//! - **Strip model**: kind hierarchy, layout style, item sequence, selection
//! - **Merge history**: revert-tagged edit records
//! - **Geometry**: points, sizes and rectangles for item bounds
//! - **Logging**: `tracing` targets and a strip tree formatter
//!
//! # Example
//!
//! ```
//! use horizon_toolstrip_core::{Alignment, ItemData, StripData, StripKind, StripRegistry};
//!
//! let mut registry = StripRegistry::new();
//! let strip = registry.create_strip(StripData::new(StripKind::ToolStrip));
//!
//! let open = registry.create_item(ItemData::button("&Open"));
//! let help = registry.create_item(ItemData::button("&Help").with_alignment(Alignment::Tail));
//! registry.add_item(strip, open).unwrap();
//! registry.add_item(strip, help).unwrap();
//!
//! registry.set_selected(strip, Some(open)).unwrap();
//! assert!(registry.item(open).unwrap().is_selected());
//! ```

mod error;
pub mod geometry;
pub mod history;
pub mod item;
pub mod logging;
pub mod registry;
pub mod strip;

pub use error::{Result, StripError};
pub use geometry::{Point, Rect, Size};
pub use history::{MergeEdit, MergeHistory};
pub use item::{
    Alignment, DisplayStyle, ItemData, ItemId, ItemKind, MergeAction, OverflowPolicy, Placement,
};
pub use logging::{StripTreeDebug, TreeFormatOptions};
pub use registry::{SharedStripRegistry, StripRegistry};
pub use strip::{LayoutStyle, Orientation, StripData, StripId, StripKind};
