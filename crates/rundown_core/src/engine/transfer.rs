//! Cross-panel transfer engine.
//!
//! # Responsibility
//! - Plan the move of one item from a block in one panel's journal into a
//!   block of the other panel's journal.
//! - Stamp the moved item with a fresh page number from the destination
//!   journal's numbering space.
//!
//! # Invariants
//! - Both journals must be open; the gate re-runs here regardless of what
//!   the UI allowed.
//! - The moved item's new page number is strictly greater than every page
//!   number already in the destination journal; no other item's page number
//!   changes.
//! - A transfer always assigns a fresh page number, even when the item lands
//!   back in the slot it came from.
//! - Editorial payload crosses unchanged; only `block_uuid`, `position` and
//!   `page_number` are rewritten.

use crate::engine::drag::{validate_both_open, DropRef};
use crate::engine::ordering::{next_page_number, renumber_items};
use crate::engine::EngineError;
use crate::gateway::ItemUpdate;
use crate::model::rundown::Item;
use crate::store::panel::{PanelBlock, PanelState};

/// Result of a cross-panel transfer: both panels' new trees, the batched
/// persistence payload, and the moved item as it now exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub source_blocks: Vec<PanelBlock>,
    pub dest_blocks: Vec<PanelBlock>,
    /// The item after relocation: destination block, renumbered position,
    /// fresh page number, payload untouched.
    pub moved: Item,
    /// Full renumbered remainder of the source block plus the full
    /// destination block, in one batch.
    pub updates: Vec<ItemUpdate>,
}

/// Plans a transfer between the two panels' journals.
///
/// Pure computation over the current trees; the caller applies both block
/// lists optimistically, submits `updates` as one gateway batch, and rolls
/// back to its pre-apply snapshot if the batch fails.
pub fn plan_cross_panel(
    source_panel: &PanelState,
    dest_panel: &PanelState,
    source: DropRef,
    destination: DropRef,
) -> Result<TransferPlan, EngineError> {
    validate_both_open(&source_panel.journal, &dest_panel.journal)?;

    let source_pos = source_panel
        .blocks
        .iter()
        .position(|entry| entry.block.uuid == source.block_uuid)
        .ok_or(EngineError::BlockNotFound(source.block_uuid))?;
    let dest_pos = dest_panel
        .blocks
        .iter()
        .position(|entry| entry.block.uuid == destination.block_uuid)
        .ok_or(EngineError::BlockNotFound(destination.block_uuid))?;

    if source.index >= source_panel.blocks[source_pos].items.len() {
        return Err(EngineError::ItemIndexOutOfRange {
            block_uuid: source.block_uuid,
            index: source.index,
        });
    }

    // Page numbering is journal-scoped: scan the whole destination tree, not
    // just the destination block.
    let new_page_number = next_page_number(&dest_panel.blocks);

    let mut source_blocks = source_panel.blocks.clone();
    let taken = source_blocks[source_pos].items.remove(source.index);
    source_blocks[source_pos].items =
        renumber_items(std::mem::take(&mut source_blocks[source_pos].items));

    let mut relocated = taken.relocated(destination.block_uuid);
    relocated.page_number = new_page_number;

    let mut dest_blocks = dest_panel.blocks.clone();
    let insert_at = destination.index.min(dest_blocks[dest_pos].items.len());
    let mut dest_items = std::mem::take(&mut dest_blocks[dest_pos].items);
    dest_items.insert(insert_at, relocated);
    dest_blocks[dest_pos].items = renumber_items(dest_items);

    let moved = dest_blocks[dest_pos].items[insert_at].clone();

    let updates = source_blocks[source_pos]
        .items
        .iter()
        .chain(dest_blocks[dest_pos].items.iter())
        .map(ItemUpdate::from)
        .collect();

    Ok(TransferPlan {
        source_blocks,
        dest_blocks,
        moved,
        updates,
    })
}
