//! Use-case coordination over the engines.
//!
//! # Responsibility
//! - Wire drag classification, plan computation, the panel store and the
//!   persistence gateway into host-facing operations.
//! - Own the optimistic-apply / persist / rollback protocol.

pub mod rundown_service;
