//! Dual-panel state store.
//!
//! # Responsibility
//! - Keep the authoritative in-memory journal tree per panel.
//! - Maintain the explicit block-to-panel membership map used by drag
//!   classification.
//! - Provide deep snapshot/restore for persistence rollback.
//!
//! # Invariants
//! - The membership map always reflects the current trees; it is rebuilt on
//!   every whole-tree replacement.
//! - Restoring a snapshot leaves both panels byte-identical to the moment it
//!   was taken.

use crate::model::rundown::{Block, BlockId, Item, Journal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One of the two side-by-side journal views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelSide {
    Primary,
    Secondary,
}

/// A block together with its ordered items, as displayed in a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelBlock {
    pub block: Block,
    /// Items in display order, positions `1..=n`.
    pub items: Vec<Item>,
}

impl PanelBlock {
    pub fn new(block: Block, items: Vec<Item>) -> Self {
        Self { block, items }
    }
}

/// One panel's journal tree: the journal record plus its ordered blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    pub journal: Journal,
    /// Blocks in display order, positions `1..=n`.
    pub blocks: Vec<PanelBlock>,
}

impl PanelState {
    /// Creates a panel over a journal with no blocks loaded yet.
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            blocks: Vec::new(),
        }
    }

    /// Creates a fully loaded panel.
    pub fn with_blocks(journal: Journal, blocks: Vec<PanelBlock>) -> Self {
        Self { journal, blocks }
    }

    /// Returns the block entry with the given id, if present.
    pub fn block(&self, block_uuid: BlockId) -> Option<&PanelBlock> {
        self.blocks.iter().find(|entry| entry.block.uuid == block_uuid)
    }
}

/// Deep copy of both panels, retained while a persistence call is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    primary: PanelState,
    secondary: PanelState,
}

/// The single authority for both panels' in-memory state.
///
/// Mutated only by the engines via whole-tree replacement, or wholesale by
/// the external change feed through [`PanelStore::apply_remote_snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelStore {
    primary: PanelState,
    secondary: PanelState,
    membership: BTreeMap<BlockId, PanelSide>,
}

impl PanelStore {
    /// Creates the store for one dual-view session.
    pub fn new(primary: PanelState, secondary: PanelState) -> Self {
        let mut store = Self {
            primary,
            secondary,
            membership: BTreeMap::new(),
        };
        store.rebuild_membership();
        store
    }

    /// Returns read access to one panel's tree.
    pub fn panel(&self, side: PanelSide) -> &PanelState {
        match side {
            PanelSide::Primary => &self.primary,
            PanelSide::Secondary => &self.secondary,
        }
    }

    /// Returns which panel currently contains the given block.
    pub fn panel_of(&self, block_uuid: BlockId) -> Option<PanelSide> {
        self.membership.get(&block_uuid).copied()
    }

    /// Replaces one panel's block tree, keeping its journal record.
    pub fn replace_blocks(&mut self, side: PanelSide, blocks: Vec<PanelBlock>) {
        self.panel_mut(side).blocks = blocks;
        self.rebuild_membership();
    }

    /// Replaces one panel wholesale with a tree fetched from the remote
    /// store. This is the only entry point for change-feed reconciliation,
    /// so a future version can swap the refresh policy without touching the
    /// engines.
    pub fn apply_remote_snapshot(
        &mut self,
        side: PanelSide,
        journal: Journal,
        blocks: Vec<PanelBlock>,
    ) {
        *self.panel_mut(side) = PanelState::with_blocks(journal, blocks);
        self.rebuild_membership();
    }

    /// Takes a deep copy of both panels for rollback.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            primary: self.primary.clone(),
            secondary: self.secondary.clone(),
        }
    }

    /// Restores both panels to a previously taken snapshot.
    pub fn restore(&mut self, snapshot: StoreSnapshot) {
        self.primary = snapshot.primary;
        self.secondary = snapshot.secondary;
        self.rebuild_membership();
    }

    fn panel_mut(&mut self, side: PanelSide) -> &mut PanelState {
        match side {
            PanelSide::Primary => &mut self.primary,
            PanelSide::Secondary => &mut self.secondary,
        }
    }

    fn rebuild_membership(&mut self) {
        self.membership.clear();
        for entry in &self.primary.blocks {
            self.membership.insert(entry.block.uuid, PanelSide::Primary);
        }
        for entry in &self.secondary.blocks {
            self.membership
                .insert(entry.block.uuid, PanelSide::Secondary);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PanelBlock, PanelSide, PanelState, PanelStore};
    use crate::model::rundown::{Block, Item, Journal};

    fn store_with_one_block_each() -> (PanelStore, Block, Block) {
        let journal_a = Journal::new("Morning Edition");
        let journal_b = Journal::new("Evening Edition");
        let block_a = Block::new(journal_a.uuid, "A1", 1);
        let block_b = Block::new(journal_b.uuid, "B1", 1);
        let store = PanelStore::new(
            PanelState::with_blocks(
                journal_a,
                vec![PanelBlock::new(block_a.clone(), Vec::new())],
            ),
            PanelState::with_blocks(
                journal_b,
                vec![PanelBlock::new(block_b.clone(), Vec::new())],
            ),
        );
        (store, block_a, block_b)
    }

    #[test]
    fn membership_tracks_both_panels() {
        let (store, block_a, block_b) = store_with_one_block_each();
        assert_eq!(store.panel_of(block_a.uuid), Some(PanelSide::Primary));
        assert_eq!(store.panel_of(block_b.uuid), Some(PanelSide::Secondary));
        assert_eq!(store.panel_of(uuid::Uuid::new_v4()), None);
    }

    #[test]
    fn membership_follows_tree_replacement() {
        let (mut store, block_a, _block_b) = store_with_one_block_each();
        let journal_uuid = store.panel(PanelSide::Primary).journal.uuid;

        let replacement = Block::new(journal_uuid, "A2", 1);
        store.replace_blocks(
            PanelSide::Primary,
            vec![PanelBlock::new(replacement.clone(), Vec::new())],
        );

        assert_eq!(store.panel_of(block_a.uuid), None);
        assert_eq!(store.panel_of(replacement.uuid), Some(PanelSide::Primary));
    }

    #[test]
    fn snapshot_restore_is_deep() {
        let (mut store, block_a, _block_b) = store_with_one_block_each();
        let before = store.snapshot();

        let item = Item::new(block_a.uuid, 1, 1, "Opening");
        store.replace_blocks(
            PanelSide::Primary,
            vec![PanelBlock::new(block_a.clone(), vec![item])],
        );
        assert_eq!(store.panel(PanelSide::Primary).blocks[0].items.len(), 1);

        store.restore(before);
        assert!(store.panel(PanelSide::Primary).blocks[0].items.is_empty());
        assert_eq!(store.panel_of(block_a.uuid), Some(PanelSide::Primary));
    }

    #[test]
    fn remote_snapshot_overwrites_panel_wholesale() {
        let (mut store, _block_a, block_b) = store_with_one_block_each();

        let mut refreshed_journal = store.panel(PanelSide::Secondary).journal.clone();
        refreshed_journal.close();
        let refreshed_block = PanelBlock::new(
            block_b.clone(),
            vec![Item::new(block_b.uuid, 1, 7, "Weather")],
        );
        store.apply_remote_snapshot(
            PanelSide::Secondary,
            refreshed_journal,
            vec![refreshed_block],
        );

        let panel = store.panel(PanelSide::Secondary);
        assert!(!panel.journal.is_open);
        assert_eq!(panel.blocks[0].items[0].page_number, 7);
    }
}
