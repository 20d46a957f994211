//! Structural pattern matching over message values.
//!
//! Shapes drive selective receive: a receive call names one or more
//! [`Pattern`]s, and only a mailbox message conforming to one of them is
//! extracted. Non-matching messages stay queued, in order.
//!
//! This mod.rs file contains only module declarations and re-exports.

pub mod pattern;

pub use pattern::Pattern;
