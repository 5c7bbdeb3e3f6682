//! Reorder and transfer engines.
//!
//! # Responsibility
//! - Classify drag results and gate them on journal editability.
//! - Compute new panel trees as pure plans; the service applies and persists.
//!
//! # Invariants
//! - A failed validation returns before any tree is built; plans are only
//!   produced for operations that keep every ordering invariant.

use crate::model::rundown::{BlockId, JournalId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod drag;
pub mod ordering;
pub mod reorder;
pub mod transfer;

/// Errors from drag classification and plan computation.
///
/// All variants are raised before any state mutation; a caller receiving one
/// of these has nothing to roll back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The journal owning the dragged item is closed for editing.
    JournalClosed {
        journal_uuid: JournalId,
        display_name: String,
    },
    /// A cross-journal transfer was attempted while one side is closed.
    BothJournalsMustBeOpen,
    /// A referenced block is no longer present in the current trees.
    BlockNotFound(BlockId),
    /// The source index does not address an item in its block.
    ItemIndexOutOfRange { block_uuid: BlockId, index: usize },
    /// The source index does not address a block in its journal.
    BlockIndexOutOfRange { index: usize },
    /// The drag spans both panels but was handed to the single-panel engine.
    NotWithinOnePanel,
    /// The drag stays within one panel but was handed to the transfer engine.
    NotCrossPanel,
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::JournalClosed { display_name, .. } => {
                write!(f, "rundown `{display_name}` is closed for editing")
            }
            Self::BothJournalsMustBeOpen => {
                write!(f, "both rundowns must be open to transfer items")
            }
            Self::BlockNotFound(id) => write!(f, "block not found: {id}"),
            Self::ItemIndexOutOfRange { block_uuid, index } => {
                write!(f, "no item at index {index} in block {block_uuid}")
            }
            Self::BlockIndexOutOfRange { index } => {
                write!(f, "no block at index {index}")
            }
            Self::NotWithinOnePanel => {
                write!(f, "drag crosses panels; use the transfer engine")
            }
            Self::NotCrossPanel => {
                write!(f, "drag stays within one panel; use the reorder engine")
            }
        }
    }
}

impl Error for EngineError {}
