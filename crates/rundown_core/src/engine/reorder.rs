//! Single-panel reorder engine.
//!
//! # Responsibility
//! - Plan item moves confined to one journal: within a block, or between two
//!   blocks of the same journal.
//! - Plan block rank changes within one journal.
//!
//! # Invariants
//! - Page numbers are never touched: within one journal the existing number
//!   stays valid and unique.
//! - Every affected block comes back fully renumbered, positions `1..=n`.

use crate::engine::drag::{validate_open, DropRef};
use crate::engine::ordering::{renumber_blocks, renumber_items};
use crate::engine::EngineError;
use crate::gateway::{BlockUpdate, ItemUpdate};
use crate::model::rundown::{BlockId, ItemId};
use crate::store::panel::{PanelBlock, PanelState};

/// Result of a single-panel item move: the panel's new tree plus the batched
/// persistence payload covering every renumbered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan {
    pub blocks: Vec<PanelBlock>,
    pub updates: Vec<ItemUpdate>,
    /// The item that was dragged, for notifications and logs.
    pub item_uuid: ItemId,
}

/// Result of a block rank change within one journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReorderPlan {
    pub blocks: Vec<PanelBlock>,
    pub updates: Vec<BlockUpdate>,
}

/// Plans a drag wholly contained in one panel.
///
/// The journal must be open; the gate re-runs here even though the UI should
/// not have allowed the gesture to start. No state is mutated: the caller
/// applies `blocks` to the store and persists `updates`.
pub fn plan_single_panel(
    panel: &PanelState,
    source: DropRef,
    destination: DropRef,
) -> Result<ReorderPlan, EngineError> {
    validate_open(&panel.journal)?;

    let mut blocks = panel.blocks.clone();
    let source_pos = index_of_block(&blocks, source.block_uuid)?;
    let dest_pos = index_of_block(&blocks, destination.block_uuid)?;

    if source_pos == dest_pos {
        let entry = &mut blocks[source_pos];
        if source.index >= entry.items.len() {
            return Err(EngineError::ItemIndexOutOfRange {
                block_uuid: source.block_uuid,
                index: source.index,
            });
        }
        let mut items = std::mem::take(&mut entry.items);
        let moved = items.remove(source.index);
        let item_uuid = moved.uuid;
        let insert_at = destination.index.min(items.len());
        items.insert(insert_at, moved);
        entry.items = renumber_items(items);

        let updates = entry.items.iter().map(ItemUpdate::from).collect();
        return Ok(ReorderPlan {
            blocks,
            updates,
            item_uuid,
        });
    }

    // Two blocks of the same journal: remove, relocate, renumber both sides.
    let source_entry = &mut blocks[source_pos];
    if source.index >= source_entry.items.len() {
        return Err(EngineError::ItemIndexOutOfRange {
            block_uuid: source.block_uuid,
            index: source.index,
        });
    }
    let moved = source_entry.items.remove(source.index);
    let item_uuid = moved.uuid;
    source_entry.items = renumber_items(std::mem::take(&mut source_entry.items));

    let dest_entry = &mut blocks[dest_pos];
    let insert_at = destination.index.min(dest_entry.items.len());
    let mut dest_items = std::mem::take(&mut dest_entry.items);
    dest_items.insert(insert_at, moved.relocated(destination.block_uuid));
    dest_entry.items = renumber_items(dest_items);

    let updates = blocks[source_pos]
        .items
        .iter()
        .chain(blocks[dest_pos].items.iter())
        .map(ItemUpdate::from)
        .collect();

    Ok(ReorderPlan {
        blocks,
        updates,
        item_uuid,
    })
}

/// Plans a block rank change within one journal.
pub fn plan_block_reorder(
    panel: &PanelState,
    source_index: usize,
    dest_index: usize,
) -> Result<BlockReorderPlan, EngineError> {
    validate_open(&panel.journal)?;

    if source_index >= panel.blocks.len() {
        return Err(EngineError::BlockIndexOutOfRange {
            index: source_index,
        });
    }

    let mut blocks = panel.blocks.clone();
    let moved = blocks.remove(source_index);
    let insert_at = dest_index.min(blocks.len());
    blocks.insert(insert_at, moved);
    let blocks = renumber_blocks(blocks);

    let updates = blocks
        .iter()
        .map(|entry| BlockUpdate {
            uuid: entry.block.uuid,
            position: entry.block.position,
        })
        .collect();

    Ok(BlockReorderPlan { blocks, updates })
}

fn index_of_block(blocks: &[PanelBlock], block_uuid: BlockId) -> Result<usize, EngineError> {
    blocks
        .iter()
        .position(|entry| entry.block.uuid == block_uuid)
        .ok_or(EngineError::BlockNotFound(block_uuid))
}
