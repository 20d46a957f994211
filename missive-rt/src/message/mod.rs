//! JSON-shaped message values and the wire codec.
//!
//! Messages exchanged between actors are dynamic trees of JSON-compatible
//! data, extended with two first-class leaves: actor [`Address`]es and opaque
//! binary blobs. The [`codec`] module serializes these trees to JSON bytes
//! and back, which is also how message payloads are value-copied between
//! actors: a sender and a receiver never share a mutable reference.
//!
//! This mod.rs file contains only module declarations and re-exports.
//!
//! [`Address`]: crate::address::Address

pub mod codec;
pub mod value;

pub use codec::{CodecError, ADDRESS_TAG, BINARY_TAG, REMOTE_CALL_TAG};
pub use value::Value;
