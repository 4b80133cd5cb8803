//! Merge history records.
//!
//! Every merge into a strip pushes one [`MergeHistory`] onto that strip's
//! history stack. The record holds the elementary edits the merge made, each
//! tagged with the action that *undoes* it, so reverting is a matter of
//! popping the edits and applying their tags in LIFO order.
//!
//! Records are consumed when reverted and never edited after being pushed.

use crate::item::ItemId;
use crate::strip::StripId;

/// An elementary edit, tagged with its revert action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeEdit {
    /// The merge removed `item` from `collection` at `index`.
    /// Reverting re-inserts it there.
    Insert {
        item: ItemId,
        collection: StripId,
        index: usize,
    },
    /// The merge moved `item` into `collection` at `index`.
    /// Reverting takes it out and restores it to `previous_collection` at
    /// `previous_index`.
    Remove {
        item: ItemId,
        collection: StripId,
        index: usize,
        previous_collection: StripId,
        previous_index: usize,
    },
}

impl MergeEdit {
    /// The item this edit touched.
    pub fn item(&self) -> ItemId {
        match self {
            Self::Insert { item, .. } | Self::Remove { item, .. } => *item,
        }
    }
}

/// One whole merge of a source strip into a target strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeHistory {
    merged_strip: StripId,
    edits: Vec<MergeEdit>,
}

impl MergeHistory {
    /// Start an empty record for a merge from `merged_strip`.
    pub fn new(merged_strip: StripId) -> Self {
        Self {
            merged_strip,
            edits: Vec::new(),
        }
    }

    /// The source strip of the merge.
    pub fn merged_strip(&self) -> StripId {
        self.merged_strip
    }

    /// Record an edit.
    pub fn push(&mut self, edit: MergeEdit) {
        self.edits.push(edit);
    }

    /// The recorded edits, oldest first.
    pub fn edits(&self) -> &[MergeEdit] {
        &self.edits
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Consume the record, yielding edits newest first (revert order).
    pub fn into_revert_order(self) -> impl Iterator<Item = MergeEdit> {
        self.edits.into_iter().rev()
    }
}
