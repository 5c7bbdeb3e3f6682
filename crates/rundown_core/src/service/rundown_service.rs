//! Dual-rundown coordination service.
//!
//! # Responsibility
//! - Turn completed drag gestures into consistent panel trees and batched
//!   remote writes.
//! - Apply every change optimistically and roll the store back when the
//!   gateway reports failure.
//!
//! # Invariants
//! - Validation and not-found rejections return before any store mutation.
//! - A persistence failure restores both panels byte-identical to the
//!   pre-operation snapshot before the error is returned.
//! - One gateway batch per gesture; the pre-apply snapshot is held until the
//!   batch resolves.

use crate::engine::drag::{classify, DragKind, DragResult};
use crate::engine::reorder::{plan_block_reorder, plan_single_panel};
use crate::engine::transfer::plan_cross_panel;
use crate::engine::EngineError;
use crate::gateway::{GatewayError, ItemUpdate, PersistenceGateway};
use crate::model::rundown::{Block, ItemId, Journal, JournalId};
use crate::store::panel::{PanelBlock, PanelSide, PanelStore, StoreSnapshot};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Token minted per persistence attempt, so hosts can correlate log lines
/// and tell a stuck request from a fast failure.
pub type OperationId = Uuid;

/// Errors surfaced to the host UI.
#[derive(Debug)]
pub enum ServiceError {
    /// Rejected before any mutation; nothing to roll back.
    Engine(EngineError),
    /// The remote batch failed after the optimistic apply; the store has
    /// already been rolled back to the pre-operation snapshot.
    Persistence {
        operation: OperationId,
        source: GatewayError,
    },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Engine(err) => write!(f, "{err}"),
            Self::Persistence { operation, source } => {
                write!(f, "could not complete the move (operation {operation}): {source}")
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Engine(err) => Some(err),
            Self::Persistence { source, .. } => Some(source),
        }
    }
}

impl From<EngineError> for ServiceError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

/// Confirmation of a persisted single-panel reorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderReceipt {
    pub operation: OperationId,
    pub item_uuid: ItemId,
}

/// Confirmation of a persisted cross-journal transfer; the success
/// notification names the item and its new page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub operation: OperationId,
    pub item_uuid: ItemId,
    pub title: String,
    pub page_number: i64,
    pub destination_journal: JournalId,
}

impl Display for TransferReceipt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "moved `{}` to page {}", self.title, self.page_number)
    }
}

/// What a completed drag gesture amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// The gesture ended outside every droppable target.
    Ignored,
    Reordered(ReorderReceipt),
    Transferred(TransferReceipt),
}

/// Host-facing facade over the dual-panel session.
///
/// All mutation of the [`PanelStore`] flows through here; the host reads the
/// trees back via [`RundownService::store`] after every call.
pub struct RundownService<G: PersistenceGateway> {
    store: PanelStore,
    gateway: G,
    in_flight: Option<OperationId>,
}

impl<G: PersistenceGateway> RundownService<G> {
    /// Creates the service for one dual-view session.
    pub fn new(store: PanelStore, gateway: G) -> Self {
        Self {
            store,
            gateway,
            in_flight: None,
        }
    }

    /// Read access to the authoritative panel state.
    pub fn store(&self) -> &PanelStore {
        &self.store
    }

    /// The persistence attempt currently awaiting its gateway result, if any.
    pub fn in_flight(&self) -> Option<OperationId> {
        self.in_flight
    }

    /// Routes a completed drag gesture to the right engine.
    pub fn handle_drag(&mut self, drag: &DragResult) -> Result<DragOutcome, ServiceError> {
        let Some(destination) = drag.destination else {
            return Ok(DragOutcome::Ignored);
        };

        match classify(&self.store, drag.source.block_uuid, destination.block_uuid)? {
            DragKind::WithinPanel(_) => Ok(self
                .reorder(drag)?
                .map(DragOutcome::Reordered)
                .unwrap_or(DragOutcome::Ignored)),
            DragKind::CrossPanel { .. } => Ok(self
                .transfer(drag)?
                .map(DragOutcome::Transferred)
                .unwrap_or(DragOutcome::Ignored)),
        }
    }

    /// Applies and persists a drag confined to one panel.
    ///
    /// Returns `Ok(None)` for a gesture with no destination.
    pub fn reorder(&mut self, drag: &DragResult) -> Result<Option<ReorderReceipt>, ServiceError> {
        let Some(destination) = drag.destination else {
            return Ok(None);
        };

        let side = match classify(&self.store, drag.source.block_uuid, destination.block_uuid)? {
            DragKind::WithinPanel(side) => side,
            DragKind::CrossPanel { .. } => return Err(EngineError::NotWithinOnePanel.into()),
        };

        let plan = plan_single_panel(self.store.panel(side), drag.source, destination)?;

        let snapshot = self.store.snapshot();
        self.store.replace_blocks(side, plan.blocks);

        let operation = self.persist_items(&plan.updates, snapshot)?;
        info!(
            "event=reorder_persisted module=service status=ok operation={} item={}",
            operation, plan.item_uuid
        );
        Ok(Some(ReorderReceipt {
            operation,
            item_uuid: plan.item_uuid,
        }))
    }

    /// Applies and persists a transfer between the two panels' journals.
    ///
    /// Returns `Ok(None)` for a gesture with no destination.
    pub fn transfer(&mut self, drag: &DragResult) -> Result<Option<TransferReceipt>, ServiceError> {
        let Some(destination) = drag.destination else {
            return Ok(None);
        };

        let (source_side, dest_side) =
            match classify(&self.store, drag.source.block_uuid, destination.block_uuid)? {
                DragKind::CrossPanel {
                    source,
                    destination,
                } => (source, destination),
                DragKind::WithinPanel(_) => return Err(EngineError::NotCrossPanel.into()),
            };

        let plan = plan_cross_panel(
            self.store.panel(source_side),
            self.store.panel(dest_side),
            drag.source,
            destination,
        )?;

        let snapshot = self.store.snapshot();
        self.store.replace_blocks(source_side, plan.source_blocks);
        self.store.replace_blocks(dest_side, plan.dest_blocks);

        let operation = self.persist_items(&plan.updates, snapshot)?;
        let receipt = TransferReceipt {
            operation,
            item_uuid: plan.moved.uuid,
            title: plan.moved.title.clone(),
            page_number: plan.moved.page_number,
            destination_journal: self.store.panel(dest_side).journal.uuid,
        };
        info!(
            "event=transfer_persisted module=service status=ok operation={} item={} page={}",
            operation, receipt.item_uuid, receipt.page_number
        );
        Ok(Some(receipt))
    }

    /// Applies and persists a block rank change within one panel.
    pub fn move_block(
        &mut self,
        side: PanelSide,
        source_index: usize,
        dest_index: usize,
    ) -> Result<OperationId, ServiceError> {
        let plan = plan_block_reorder(self.store.panel(side), source_index, dest_index)?;

        let snapshot = self.store.snapshot();
        self.store.replace_blocks(side, plan.blocks);

        let operation = Uuid::new_v4();
        self.in_flight = Some(operation);
        let outcome = self.gateway.batch_update_blocks(&plan.updates);
        self.in_flight = None;

        match outcome {
            Ok(()) => {
                info!(
                    "event=block_reorder_persisted module=service status=ok operation={operation}"
                );
                Ok(operation)
            }
            Err(source) => {
                self.store.restore(snapshot);
                warn!(
                    "event=block_reorder_rolled_back module=service status=error operation={operation} code={}",
                    source.code
                );
                Err(ServiceError::Persistence { operation, source })
            }
        }
    }

    /// Loads a panel's items block by block and installs the resulting tree.
    ///
    /// No optimistic state exists during hydration; a fetch failure leaves
    /// the store untouched.
    pub fn hydrate_panel(
        &mut self,
        side: PanelSide,
        journal: Journal,
        mut blocks: Vec<Block>,
    ) -> Result<(), ServiceError> {
        let operation = Uuid::new_v4();
        blocks.sort_by_key(|block| block.position);

        let mut tree = Vec::with_capacity(blocks.len());
        for block in blocks {
            let mut items = self
                .gateway
                .fetch_items_by_block(block.uuid)
                .map_err(|source| ServiceError::Persistence { operation, source })?;
            items.sort_by_key(|item| item.position);
            tree.push(PanelBlock::new(block, items));
        }

        info!(
            "event=panel_hydrated module=service status=ok operation={} journal={} blocks={}",
            operation,
            journal.uuid,
            tree.len()
        );
        self.store.apply_remote_snapshot(side, journal, tree);
        Ok(())
    }

    /// Installs a tree pushed by the external change feed, overwriting any
    /// optimistic local state for that panel.
    pub fn apply_remote_snapshot(
        &mut self,
        side: PanelSide,
        journal: Journal,
        blocks: Vec<PanelBlock>,
    ) {
        info!(
            "event=remote_snapshot_applied module=service status=ok journal={}",
            journal.uuid
        );
        self.store.apply_remote_snapshot(side, journal, blocks);
    }

    fn persist_items(
        &mut self,
        updates: &[ItemUpdate],
        snapshot: StoreSnapshot,
    ) -> Result<OperationId, ServiceError> {
        let operation = Uuid::new_v4();
        self.in_flight = Some(operation);
        let outcome = self.gateway.batch_update_items(updates);
        self.in_flight = None;

        match outcome {
            Ok(()) => Ok(operation),
            Err(source) => {
                self.store.restore(snapshot);
                warn!(
                    "event=items_rolled_back module=service status=error operation={operation} rows={} code={}",
                    updates.len(),
                    source.code
                );
                Err(ServiceError::Persistence { operation, source })
            }
        }
    }
}
