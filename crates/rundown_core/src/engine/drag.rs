//! Drag result classification and editability gates.
//!
//! # Responsibility
//! - Describe the host UI's completed drag gesture as data.
//! - Decide whether a drag stays within one panel or crosses panels, using
//!   the store's explicit block-to-panel map.
//! - Gate cross-panel transfers on both journals being open.

use crate::engine::EngineError;
use crate::model::rundown::{BlockId, Journal};
use crate::store::panel::{PanelSide, PanelStore};
use serde::{Deserialize, Serialize};

/// One end of a drag gesture: a block and an index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRef {
    pub block_uuid: BlockId,
    /// 0-based index within the block's item list, as rendered.
    pub index: usize,
}

impl DropRef {
    pub fn new(block_uuid: BlockId, index: usize) -> Self {
        Self { block_uuid, index }
    }
}

/// A completed drag gesture as reported by the host UI.
///
/// A gesture that ended outside any droppable target has no `destination`
/// and is a no-op everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragResult {
    pub source: DropRef,
    pub destination: Option<DropRef>,
}

impl DragResult {
    pub fn new(source: DropRef, destination: DropRef) -> Self {
        Self {
            source,
            destination: Some(destination),
        }
    }

    /// A gesture dropped outside every target.
    pub fn without_destination(source: DropRef) -> Self {
        Self {
            source,
            destination: None,
        }
    }
}

/// Panel routing decision for one drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Source and destination blocks live in the same panel.
    WithinPanel(PanelSide),
    /// The item leaves one panel's journal for the other's.
    CrossPanel {
        source: PanelSide,
        destination: PanelSide,
    },
}

/// Determines panel membership for both ends of a drag.
///
/// Membership comes from the store's block map rather than a scan of the
/// current render, so stale block ids surface as [`EngineError::BlockNotFound`]
/// instead of silently misrouting.
pub fn classify(
    store: &PanelStore,
    source_block: BlockId,
    dest_block: BlockId,
) -> Result<DragKind, EngineError> {
    let source = store
        .panel_of(source_block)
        .ok_or(EngineError::BlockNotFound(source_block))?;
    let destination = store
        .panel_of(dest_block)
        .ok_or(EngineError::BlockNotFound(dest_block))?;

    if source == destination {
        Ok(DragKind::WithinPanel(source))
    } else {
        Ok(DragKind::CrossPanel {
            source,
            destination,
        })
    }
}

/// Gate for cross-panel transfers: both journals must be open.
pub fn validate_both_open(source: &Journal, destination: &Journal) -> Result<(), EngineError> {
    if source.is_open && destination.is_open {
        Ok(())
    } else {
        Err(EngineError::BothJournalsMustBeOpen)
    }
}

/// Gate for single-panel edits: the owning journal must be open.
pub fn validate_open(journal: &Journal) -> Result<(), EngineError> {
    if journal.is_open {
        Ok(())
    } else {
        Err(EngineError::JournalClosed {
            journal_uuid: journal.uuid,
            display_name: journal.display_name.clone(),
        })
    }
}
