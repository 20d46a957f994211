//! The call protocol: correlated request/response between actors.
//!
//! A call casts a request carrying a fresh correlation id and selects the
//! matching reply out of the caller's mailbox. Servers answer each request
//! with exactly one of three reply shapes (success, handler exception, or
//! invalid method), which the caller surfaces as a return value or a typed
//! error.
//!
//! This mod.rs file contains only module declarations and re-exports.

pub mod protocol;
pub mod server;

pub use protocol::{call_pattern, respond, respond_exception, respond_invalid_method};
pub use server::{DispatchError, Server, ServerBehavior};
