//! Logging and debugging facilities for Horizon ToolStrip.
//!
//! This module provides:
//! - Target names for filtering the `tracing` output of each subsystem
//! - Debug visualization of a strip, its items, drop-downs and merge history
//!
//! # Tracing Integration
//!
//! The engine emits `tracing` events and spans but never installs a
//! subscriber. To see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_toolstrip::merge=trace")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! ```
//! use horizon_toolstrip_core::{ItemData, StripData, StripKind, StripRegistry, StripTreeDebug};
//!
//! let mut registry = StripRegistry::new();
//! let strip = registry.create_strip(StripData::new(StripKind::MenuStrip).with_name("Main"));
//! let file = registry.create_item(ItemData::menu_item("&File"));
//! registry.add_item(strip, file).unwrap();
//!
//! let tree = StripTreeDebug::new().format_strip(&registry, strip).unwrap();
//! assert!(tree.contains("&File"));
//! ```

use std::fmt::Write as FmtWrite;

use crate::error::Result;
use crate::history::MergeEdit;
use crate::registry::StripRegistry;
use crate::strip::StripId;

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Registry (arena, ownership, selection) target.
    pub const REGISTRY: &str = "horizon_toolstrip_core::registry";
    /// Layout collaborator target.
    pub const LAYOUT: &str = "horizon_toolstrip::layout";
    /// Displayed/overflow partitioning target.
    pub const PARTITION: &str = "horizon_toolstrip::partition";
    /// Merge engine target.
    pub const MERGE: &str = "horizon_toolstrip::merge";
    /// Keyboard navigation target.
    pub const NAVIGATION: &str = "horizon_toolstrip::navigation";
    /// Mnemonic dispatch target.
    pub const MNEMONIC: &str = "horizon_toolstrip::mnemonic";
}

/// Configuration for strip tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// Whether to show item and strip IDs.
    pub show_ids: bool,
    /// Whether to descend into drop-down strips.
    pub show_drop_downs: bool,
    /// Whether to list the merge history stack.
    pub show_history: bool,
    /// Maximum drop-down depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            show_ids: false,
            show_drop_downs: true,
            show_history: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_ids: true,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing strips.
#[derive(Debug, Clone, Default)]
pub struct StripTreeDebug {
    options: TreeFormatOptions,
}

impl StripTreeDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format a strip and everything below it.
    pub fn format_strip(&self, registry: &StripRegistry, strip: StripId) -> Result<String> {
        let mut output = String::new();
        self.format_strip_into(registry, strip, 0, &mut output)?;
        Ok(output)
    }

    fn format_strip_into(
        &self,
        registry: &StripRegistry,
        id: StripId,
        depth: usize,
        output: &mut String,
    ) -> Result<()> {
        let strip = registry.strip(id)?;
        let indent = " ".repeat(depth * self.options.indent_size);

        write!(output, "{indent}{:?}", strip.kind()).expect("write to String");
        if !strip.name().is_empty() {
            write!(output, " \"{}\"", strip.name()).expect("write to String");
        }
        if self.options.show_ids {
            write!(output, " [{id:?}]").expect("write to String");
        }
        writeln!(output, " ({} items)", strip.items().len()).expect("write to String");

        let child_indent = " ".repeat((depth + 1) * self.options.indent_size);
        for &item_id in strip.items() {
            let item = registry.item(item_id)?;
            write!(output, "{child_indent}- {:?} \"{}\"", item.kind(), item.text())
                .expect("write to String");
            if self.options.show_ids {
                write!(output, " [{item_id:?}]").expect("write to String");
            }
            if item.is_selected() {
                write!(output, " *").expect("write to String");
            }
            writeln!(output).expect("write to String");

            let within_depth = self.options.max_depth.is_none_or(|max| depth < max);
            if self.options.show_drop_downs
                && within_depth
                && let Some(drop_down) = item.drop_down()
                && !registry.strip(drop_down)?.items().is_empty()
            {
                self.format_strip_into(registry, drop_down, depth + 2, output)?;
            }
        }

        if self.options.show_history && !strip.merge_history().is_empty() {
            writeln!(output, "{child_indent}merge history:").expect("write to String");
            for history in strip.merge_history() {
                let source = registry
                    .strip(history.merged_strip())
                    .map(|s| s.name().to_owned())
                    .unwrap_or_default();
                let inserts = history
                    .edits()
                    .iter()
                    .filter(|e| matches!(e, MergeEdit::Insert { .. }))
                    .count();
                writeln!(
                    output,
                    "{child_indent}  from \"{source}\": {} edits ({} removals to undo)",
                    history.len(),
                    inserts
                )
                .expect("write to String");
            }
        }
        Ok(())
    }
}
