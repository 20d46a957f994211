//! Shared identifier types.
//!
//! This mod.rs file contains only module declarations and re-exports.

pub mod ids;

pub use ids::ActorId;
