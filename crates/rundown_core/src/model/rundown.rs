//! Journal, block and item records.
//!
//! # Responsibility
//! - Define the canonical shapes shared by the store, engines and gateway.
//! - Provide lifecycle helpers for the open/closed editing gate.
//!
//! # Invariants
//! - `Block::position` is 1-based and contiguous within its journal.
//! - `Item::position` is 1-based and contiguous within its block.
//! - `Item::page_number` is unique within the owning journal and is only
//!   reassigned when the item crosses into another journal.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one journal (broadcast program).
pub type JournalId = Uuid;

/// Stable identifier of one block (segment container).
pub type BlockId = Uuid;

/// Stable identifier of one item (schedulable unit).
pub type ItemId = Uuid;

/// Top-level broadcast program owning an ordered list of blocks.
///
/// Journals are created and edited outside this core; the engines only read
/// the `is_open` editing gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    /// Stable journal id.
    pub uuid: JournalId,
    /// User-facing program name.
    pub display_name: String,
    /// Edits to blocks/items are permitted only while open.
    pub is_open: bool,
}

impl Journal {
    /// Creates an open journal with a generated id.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), display_name)
    }

    /// Creates an open journal with a caller-provided id.
    ///
    /// Used by hydration paths where identity already exists remotely.
    pub fn with_id(uuid: JournalId, display_name: impl Into<String>) -> Self {
        Self {
            uuid,
            display_name: display_name.into(),
            is_open: true,
        }
    }

    /// Closes the journal for editing.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Reopens the journal for editing.
    pub fn reopen(&mut self) {
        self.is_open = true;
    }
}

/// Ordered segment container belonging to exactly one journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Stable block id.
    pub uuid: BlockId,
    /// Owning journal id.
    pub journal_uuid: JournalId,
    /// User-facing block label.
    pub display_name: String,
    /// 1-based rank within the owning journal.
    pub position: i64,
}

impl Block {
    /// Creates a block with a generated id.
    pub fn new(journal_uuid: JournalId, display_name: impl Into<String>, position: i64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            journal_uuid,
            display_name: display_name.into(),
            position,
        }
    }
}

/// Smallest schedulable unit of content within a block.
///
/// `title`, `duration_secs` and `script` are opaque editorial payload: the
/// engines never interpret them and every relocation carries them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable item id.
    pub uuid: ItemId,
    /// Owning block id. Rewritten by moves and transfers.
    pub block_uuid: BlockId,
    /// 1-based rank within the owning block. Rewritten by renumbering.
    pub position: i64,
    /// Journal-scoped unique page number. Rewritten on cross-journal
    /// transfer only.
    pub page_number: i64,
    /// Editorial slug line.
    pub title: String,
    /// Planned running time, when known.
    pub duration_secs: Option<i64>,
    /// Script/prompter text.
    pub script: Option<String>,
}

impl Item {
    /// Creates an item with a generated id and empty payload extras.
    pub fn new(
        block_uuid: BlockId,
        position: i64,
        page_number: i64,
        title: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), block_uuid, position, page_number, title)
    }

    /// Creates an item with a caller-provided stable id.
    pub fn with_id(
        uuid: ItemId,
        block_uuid: BlockId,
        position: i64,
        page_number: i64,
        title: impl Into<String>,
    ) -> Self {
        Self {
            uuid,
            block_uuid,
            position,
            page_number,
            title: title.into(),
            duration_secs: None,
            script: None,
        }
    }

    /// Clones this item into another block.
    ///
    /// Identity and editorial payload are preserved; `position` is left for
    /// the caller to renumber and `page_number` is untouched.
    pub fn relocated(&self, block_uuid: BlockId) -> Self {
        Self {
            block_uuid,
            ..self.clone()
        }
    }
}
