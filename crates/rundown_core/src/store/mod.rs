//! Per-panel in-memory state.
//!
//! # Responsibility
//! - Hold the two journal trees shown by the dual-panel session.
//! - Accept whole-tree replacement from the engines and the change feed.
//!
//! # Invariants
//! - Panel state is mutated only through [`panel::PanelStore`] methods; the
//!   engines return new trees instead of editing in place.

pub mod panel;
