//! Remote persistence boundary.
//!
//! # Responsibility
//! - Define the contract to the remote store of record: batched item/block
//!   updates and per-block item fetches.
//! - Shape gateway failures into a stable envelope the service can log and
//!   map to rollback.
//!
//! # Invariants
//! - Batch calls are atomic from the caller's perspective: any `Err` means
//!   nothing landed and the caller restores its pre-operation snapshot.
//! - Payloads carry engine-owned fields only; editorial payload is never
//!   rewritten through this boundary.

use crate::model::rundown::{BlockId, Item, ItemId};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Broad failure class, used to pick a user-facing message and to tell a
/// stuck request (deadline fired) from a fast remote rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// Could not reach the remote store.
    Transport,
    /// The remote store answered with an error.
    Remote,
    /// The gateway's own deadline elapsed with no answer.
    Timeout,
}

/// Stable error envelope crossing the persistence boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    /// Machine-readable short code, e.g. `connection_refused`.
    pub code: String,
    /// Human-readable detail for logs.
    pub message: String,
    /// Whether an identical retry could plausibly succeed.
    pub retryable: bool,
}

impl GatewayError {
    pub fn new(
        kind: GatewayErrorKind,
        code: impl Into<String>,
        message: impl Into<String>,
        retryable: bool,
    ) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            retryable,
        }
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            GatewayErrorKind::Transport => "transport",
            GatewayErrorKind::Remote => "remote",
            GatewayErrorKind::Timeout => "timeout",
        };
        write!(f, "persistence {kind} failure [{}]: {}", self.code, self.message)
    }
}

impl Error for GatewayError {}

/// One item row of a batched update: the engine-owned fields only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub uuid: ItemId,
    pub block_uuid: BlockId,
    pub position: i64,
    pub page_number: i64,
}

impl From<&Item> for ItemUpdate {
    fn from(item: &Item) -> Self {
        Self {
            uuid: item.uuid,
            block_uuid: item.block_uuid,
            position: item.position,
            page_number: item.page_number,
        }
    }
}

/// One block row of a batched update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockUpdate {
    pub uuid: BlockId,
    pub position: i64,
}

/// Contract to the remote store of record.
///
/// Implementations live in the host application (the remote store is reached
/// over the network there); the core only sees this trait. The in-flight
/// call is the single suspension point of every operation.
pub trait PersistenceGateway {
    /// Persists every changed item in one atomic batch.
    fn batch_update_items(&self, updates: &[ItemUpdate]) -> GatewayResult<()>;

    /// Persists every changed block rank in one atomic batch.
    fn batch_update_blocks(&self, updates: &[BlockUpdate]) -> GatewayResult<()>;

    /// Loads one block's items for panel hydration, in display order.
    fn fetch_items_by_block(&self, block_uuid: BlockId) -> GatewayResult<Vec<Item>>;
}
