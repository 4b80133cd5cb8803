//! Mnemonic dispatch.
//!
//! Mnemonics are indicated by '&' in item text:
//!
//! - `"&Open"` -> displayed "Open", mnemonic 'o'
//! - `"Save &As"` -> displayed "Save As", mnemonic 'a'
//! - `"Fish && Chips"` -> displayed "Fish & Chips", no mnemonic
//!
//! Pressing a mnemonic key while a strip has keyboard focus resolves against
//! the strip's displayed items, scanning circularly from just after the
//! current selection. A unique match is activated; when two items share the
//! mnemonic the selection moves between them instead, so repeated presses
//! cycle. Menu items without any marker also answer to their first letter,
//! but only when no item has a real mnemonic for the key.

use horizon_toolstrip_core::logging::targets;
use horizon_toolstrip_core::{ItemData, ItemId, Result, StripId, StripRegistry};

/// Result of parsing text for a mnemonic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnemonicText {
    /// The text to display (with '&' markers processed).
    pub display_text: String,
    /// The mnemonic character, if any. Lowercase unless lowering it would
    /// produce more than one char.
    pub mnemonic: Option<char>,
    /// The byte index in `display_text` of the mnemonic character.
    pub mnemonic_index: Option<usize>,
}

/// Parse text containing an optional mnemonic marker.
///
/// `&&` is a literal ampersand and the first `&X` marker wins:
///
/// - `"&Open"` -> display "Open", mnemonic 'o', index 0
/// - `"&&Open"` -> display "&Open", no mnemonic
/// - `"&Save &As"` -> display "Save As", mnemonic 's'
pub fn parse_mnemonic(text: &str) -> MnemonicText {
    let mut display_text = String::with_capacity(text.len());
    let mut mnemonic: Option<char> = None;
    let mut mnemonic_index: Option<usize> = None;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '&' {
            display_text.push(ch);
            continue;
        }
        match chars.peek() {
            Some('&') => {
                display_text.push('&');
                chars.next();
            }
            Some(&next_ch) if next_ch.is_alphanumeric() => {
                if mnemonic.is_none() {
                    mnemonic = Some(lowercase_char(next_ch));
                    mnemonic_index = Some(display_text.len());
                }
                display_text.push(next_ch);
                chars.next();
            }
            // Lone '&' at the end or before a non-alphanumeric is kept.
            _ => display_text.push(ch),
        }
    }

    MnemonicText {
        display_text,
        mnemonic,
        mnemonic_index,
    }
}

/// `ch` lowercased, or `ch` itself when its lowercase form spans several chars.
fn lowercase_char(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

fn chars_match(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Whether `text` carries `ch` as its mnemonic, ignoring case.
pub fn is_mnemonic(ch: char, text: &str) -> bool {
    parse_mnemonic(text)
        .mnemonic
        .is_some_and(|mnemonic| chars_match(mnemonic, ch))
}

/// Whether a menu item answers to `ch` by its first letter.
fn is_first_letter_match(ch: char, text: &str) -> bool {
    parse_mnemonic(text).mnemonic.is_none()
        && text
            .chars()
            .next()
            .is_some_and(|first| chars_match(first, ch))
}

/// Outcome of resolving a mnemonic key against a strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Exactly one item matches.
    Unique(ItemId),
    /// Several items match; the payload is the one to move selection to.
    Ambiguous(ItemId),
    /// Nothing matches. The key should propagate.
    None,
}

/// What [`process_mnemonic`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicAction {
    /// The item was selected and should be activated by the host.
    Activate(ItemId),
    /// Selection moved to the item; nothing is activated.
    Select(ItemId),
    /// The key was not consumed.
    NotConsumed,
}

impl MnemonicAction {
    /// Whether the key press was handled.
    pub fn is_consumed(self) -> bool {
        !matches!(self, Self::NotConsumed)
    }
}

fn shows_text(item: &ItemData) -> bool {
    item.is_enabled() && !item.text().is_empty() && item.display_style().shows_text()
}

/// Resolve a mnemonic key against the displayed items of `strip`.
#[tracing::instrument(skip(registry), target = "horizon_toolstrip::mnemonic", level = "trace")]
pub fn resolve_mnemonic(registry: &StripRegistry, strip: StripId, ch: char) -> Result<MatchOutcome> {
    let data = registry.strip(strip)?;
    let displayed = data.displayed_items();
    let current = data.selected_item();
    let count = displayed.len();
    if count == 0 {
        return Ok(MatchOutcome::None);
    }

    let start = current
        .and_then(|current| displayed.iter().position(|&id| id == current))
        .map_or(0, |index| index + 1);
    let scan_order = move || (0..count).map(move |offset| displayed[(start + offset) % count]);

    let mut first_match = None;
    let mut found_menu_item = false;
    for id in scan_order() {
        let item = registry.item(id)?;
        found_menu_item |= item.kind().is_menu_item();
        if !shows_text(item) || !is_mnemonic(ch, item.text()) {
            continue;
        }
        match first_match {
            None => first_match = Some(id),
            Some(first) => return Ok(ambiguous(first, id, current)),
        }
    }
    if let Some(first) = first_match {
        return Ok(MatchOutcome::Unique(first));
    }
    if !found_menu_item {
        return Ok(MatchOutcome::None);
    }

    for id in scan_order() {
        let item = registry.item(id)?;
        if !item.kind().is_menu_item() || !shows_text(item) || !is_first_letter_match(ch, item.text()) {
            continue;
        }
        match first_match {
            None => first_match = Some(id),
            Some(first) => return Ok(ambiguous(first, id, current)),
        }
    }
    Ok(first_match.map_or(MatchOutcome::None, MatchOutcome::Unique))
}

fn ambiguous(first: ItemId, second: ItemId, current: Option<ItemId>) -> MatchOutcome {
    let target = if Some(first) == current { second } else { first };
    tracing::trace!(target: targets::MNEMONIC, ?first, ?second, ?target, "ambiguous mnemonic");
    MatchOutcome::Ambiguous(target)
}

/// Resolve a mnemonic key and apply the outcome to the strip's selection.
pub fn process_mnemonic(registry: &mut StripRegistry, strip: StripId, ch: char) -> Result<MnemonicAction> {
    let action = match resolve_mnemonic(registry, strip, ch)? {
        MatchOutcome::Unique(item) => {
            registry.set_selected(strip, Some(item))?;
            MnemonicAction::Activate(item)
        }
        MatchOutcome::Ambiguous(item) => {
            registry.set_selected(strip, Some(item))?;
            MnemonicAction::Select(item)
        }
        MatchOutcome::None => MnemonicAction::NotConsumed,
    };
    tracing::debug!(target: targets::MNEMONIC, ?strip, %ch, ?action, "processed mnemonic");
    Ok(action)
}
