//! Ordered collection primitives.
//!
//! # Responsibility
//! - Renumber position fields to `1..=n` after insertion/removal.
//! - Compute the next journal-scoped page number.
//!
//! # Invariants
//! - All functions are pure; callers decide when the results become state.
//! - Page numbers are monotonic per journal and never reused.

use crate::model::rundown::Item;
use crate::store::panel::PanelBlock;

/// First page number handed out in a journal with no items.
pub const PAGE_NUMBER_BASE: i64 = 1;

/// Returns the sequence with `position` set to `1..=n` in input order.
pub fn renumber_items(items: Vec<Item>) -> Vec<Item> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, mut item)| {
            item.position = index as i64 + 1;
            item
        })
        .collect()
}

/// Returns the tree with block `position` set to `1..=n` in input order.
pub fn renumber_blocks(blocks: Vec<PanelBlock>) -> Vec<PanelBlock> {
    blocks
        .into_iter()
        .enumerate()
        .map(|(index, mut entry)| {
            entry.block.position = index as i64 + 1;
            entry
        })
        .collect()
}

/// Returns the next unique page number for a journal's tree.
///
/// `max(existing) + 1`, or [`PAGE_NUMBER_BASE`] when the journal has no
/// items at all.
pub fn next_page_number(blocks: &[PanelBlock]) -> i64 {
    blocks
        .iter()
        .flat_map(|entry| entry.items.iter())
        .map(|item| item.page_number)
        .max()
        .map(|highest| highest + 1)
        .unwrap_or(PAGE_NUMBER_BASE)
}

/// Whether item positions equal `{1..=n}` in display order.
pub fn item_positions_contiguous(items: &[Item]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(index, item)| item.position == index as i64 + 1)
}

/// Whether no two items across the tree share a page number.
pub fn page_numbers_unique(blocks: &[PanelBlock]) -> bool {
    let mut seen = std::collections::BTreeSet::new();
    blocks
        .iter()
        .flat_map(|entry| entry.items.iter())
        .all(|item| seen.insert(item.page_number))
}
