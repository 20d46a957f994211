//! Per-actor message queue with selective extraction.
//!
//! Every actor owns exactly one [`Mailbox`]. Any task may push into it;
//! only the owning actor extracts, via pattern-filtered receive that skips
//! non-matching messages without reordering them.
//!
//! This mod.rs file contains only module declarations and re-exports.

pub mod queue;

pub use queue::Mailbox;
