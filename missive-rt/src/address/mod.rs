//! Actor addresses, local and remote.
//!
//! An [`Address`] is an opaque handle to an actor. The local and remote
//! variants share one contract (cast, call, link, wait, kill), with the
//! remote variant tunneling each operation over HTTP. Two addresses are
//! equal exactly when they denote the same actor (same local identity, or
//! same URL), which is what lets them key result maps.
//!
//! This mod.rs file contains only module declarations and re-exports.

pub mod handle;
pub mod local;
pub mod remote;

pub use handle::Address;
pub use local::LocalAddress;
pub use remote::RemoteAddress;
