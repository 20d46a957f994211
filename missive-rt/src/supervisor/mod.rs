//! Supervision links and ordered result collection.
//!
//! A link is a directed association from an actor to an address: when the
//! actor terminates, the linked address is cast a notification message.
//! Linked observers select between the exception and exit shapes with an
//! ordinary receive. [`Gather`] builds on links to run a batch of actors and
//! collect their terminations in spawn order.
//!
//! This mod.rs file contains only module declarations and re-exports.

pub mod gather;
pub mod link;

pub use gather::Gather;
pub use link::{exception_message, exception_pattern, exit_message, exit_pattern, LinkSet};
