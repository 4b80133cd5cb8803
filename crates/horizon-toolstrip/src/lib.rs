//! Horizon ToolStrip - toolbar and menu composition engine.
//!
//! This is the main crate. It re-exports the object model from
//! `horizon-toolstrip-core` and adds the engines that operate on it:
//!
//! - [`layout`]: a reference stack layout writing bounds and placement hints
//! - [`partition`]: splits a strip into displayed and overflow items
//! - [`merge`]: reversible merging of one strip's items into another
//! - [`navigation`]: arrow key and Tab traversal between items
//! - [`mnemonic`]: `&X` accelerator dispatch
//!
//! # Example
//!
//! ```
//! use horizon_toolstrip::prelude::*;
//!
//! let mut registry = StripRegistry::new();
//! let strip = registry.create_strip(StripData::new(StripKind::ToolStrip));
//! for text in ["&New", "&Open", "&Save"] {
//!     let item = registry.create_item(ItemData::button(text));
//!     registry.add_item(strip, item).unwrap();
//! }
//!
//! let partition = perform_layout(&mut registry, strip, &StackLayout::default()).unwrap();
//! assert!(partition.overflow.is_empty());
//!
//! let action = process_mnemonic(&mut registry, strip, 's').unwrap();
//! assert!(action.is_consumed());
//! ```

pub use horizon_toolstrip_core::*;

pub mod layout;
pub mod merge;
pub mod mnemonic;
pub mod navigation;
pub mod partition;
pub mod prelude;
