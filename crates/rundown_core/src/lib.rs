//! Ordering and cross-journal transfer core for dual-panel rundown editing.
//! This crate is the single source of truth for the ordering invariants:
//! contiguous positions, journal-unique monotonic page numbers, and the
//! optimistic-apply/rollback protocol against the remote store.

pub mod engine;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use engine::drag::{classify, validate_both_open, DragKind, DragResult, DropRef};
pub use engine::ordering::{
    item_positions_contiguous, next_page_number, page_numbers_unique, renumber_blocks,
    renumber_items,
};
pub use engine::reorder::{plan_block_reorder, plan_single_panel, BlockReorderPlan, ReorderPlan};
pub use engine::transfer::{plan_cross_panel, TransferPlan};
pub use engine::EngineError;
pub use gateway::{
    BlockUpdate, GatewayError, GatewayErrorKind, GatewayResult, ItemUpdate, PersistenceGateway,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::rundown::{Block, BlockId, Item, ItemId, Journal, JournalId};
pub use service::rundown_service::{
    DragOutcome, OperationId, ReorderReceipt, RundownService, ServiceError, TransferReceipt,
};
pub use store::panel::{PanelBlock, PanelSide, PanelState, PanelStore, StoreSnapshot};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
