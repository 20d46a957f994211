//! # missive-rt - Erlang-Style Actor Runtime over JSON Messages
//!
//! Concurrent programs as independent actors that share nothing and talk
//! only by asynchronous message passing. Each actor owns a private mailbox,
//! runs as a cooperative tokio task, and extracts messages by *selective
//! receive*: structural patterns pick matching messages out of the mailbox
//! without disturbing the order of the rest.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use missive_rt::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ActorError> {
//!     let system = ActorSystem::new(SystemConfig::default());
//!
//!     // An actor body is an async fn from context to exit value.
//!     let address = system.spawn_fn(|ctx| {
//!         Box::pin(async move {
//!             let (_, message) = ctx.receive(&[Pattern::map([
//!                 ("credit", Pattern::Number),
//!             ])]).await;
//!             Ok(message.get("credit").cloned().unwrap_or(Value::Null))
//!         })
//!     });
//!
//!     address.cast(Value::map([("credit", Value::from(250))])).await?;
//!     assert_eq!(address.wait().await?, Value::Int(250));
//!     Ok(())
//! }
//! ```
//!
//! # Core Concepts
//!
//! - **Messages are JSON-shaped values** ([`Value`]): null, booleans,
//!   numbers, strings, sequences, mappings, plus first-class actor
//!   addresses and binary blobs. Every send value-copies the message
//!   through the wire codec, so actors never share mutable state.
//! - **Selective receive** ([`Pattern`]): a receive names shapes; the first
//!   queued message conforming to one is delivered, skipped messages keep
//!   their order. Type-class tokens (`Integer`, `String`, `Any`, ...) mix
//!   freely with concrete values inside one shape.
//! - **Addresses** ([`Address`]): opaque handles, equal exactly when they
//!   denote the same actor. The remote variant tunnels the same cast, call
//!   and kill operations over a peer's HTTP bridge.
//! - **Calls** ([`Server`]): correlated request/response with three reply
//!   kinds (success, handler exception, invalid method) and timeouts.
//! - **Links** ([`supervisor`]): when a linked actor terminates, observers
//!   are cast an exception or exit notification message; supervision is
//!   ordinary message handling. [`ActorSystem::wait_all`] runs a batch and
//!   collects outcomes in spawn order.
//!
//! # Module Organization
//!
//! - [`message`] - The value tree and the JSON wire codec
//! - [`shape`] - Structural patterns and the matcher
//! - [`mailbox`] - The selective-receive message queue
//! - [`actor`] - Behaviors, actor state, lifecycle, context
//! - [`address`] - Local and remote addresses
//! - [`call`] - The request/response protocol and the server adapter
//! - [`supervisor`] - Links, termination notifications, gather
//! - [`system`] - The runtime handle, registry, configuration, errors
//! - [`util`] - Identifier types

pub mod actor;
pub mod address;
pub mod call;
pub mod mailbox;
pub mod message;
pub mod shape;
pub mod supervisor;
pub mod system;
pub mod util;

// Re-export commonly used types
pub use actor::{behavior_fn, ActorContext, Behavior, BoxError, ExitStatus, Fault};
pub use address::{Address, LocalAddress, RemoteAddress};
pub use call::{call_pattern, DispatchError, Server, ServerBehavior};
pub use mailbox::Mailbox;
pub use message::{CodecError, Value};
pub use shape::Pattern;
pub use supervisor::Gather;
pub use system::{ActorError, ActorSystem, Registry, SystemConfig};
pub use util::ActorId;

/// Convenience imports for the common case.
pub mod prelude {
    pub use crate::actor::{behavior_fn, ActorContext, Behavior, BoxError};
    pub use crate::address::Address;
    pub use crate::call::{DispatchError, Server, ServerBehavior};
    pub use crate::message::Value;
    pub use crate::shape::Pattern;
    pub use crate::system::{ActorError, ActorSystem, SystemConfig};
}
