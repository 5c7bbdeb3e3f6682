//! Domain model for the dual-rundown session.
//!
//! # Responsibility
//! - Define the canonical journal/block/item records moved by the engines.
//! - Keep engine-owned ordering fields separate from opaque editorial payload.
//!
//! # Invariants
//! - Every record is identified by a stable uuid that survives relocation.
//! - Only `block_uuid`, `position` and `page_number` are rewritten by core
//!   operations; all other item fields are carried verbatim.

pub mod rundown;
