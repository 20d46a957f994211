//! The actor core: behaviors, per-actor shared state, and the run loop.
//!
//! An actor is a tokio task executing a user [`Behavior`] against an
//! [`ActorContext`]. The context wraps the actor's [`ActorCell`], the
//! shared state (id, mailbox, links, exit signal, kill token) that outlives
//! the task and backs every [`Address`](crate::address::Address) pointing at
//! the actor.
//!
//! This mod.rs file contains only module declarations and re-exports.

pub mod cell;
pub mod context;
pub mod lifecycle;
pub mod traits;

pub use cell::ActorCell;
pub use context::ActorContext;
pub use lifecycle::{format_error, ExitStatus, Fault};
pub use traits::{behavior_fn, Behavior, BehaviorFuture, BoxError, FnBehavior};
