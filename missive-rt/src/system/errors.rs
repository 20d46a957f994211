//! The user-facing error taxonomy.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::message::{CodecError, Value};
use crate::util::ActorId;

/// Everything an actor operation can fail with.
///
/// Failures inside an actor do not surface here; they terminate the actor
/// and reach linked observers as ordinary messages. This taxonomy covers
/// the operations *on* actors: sending, calling, waiting, killing, naming.
#[derive(Debug, Clone, Error)]
pub enum ActorError {
    /// The target address refers to an actor that has terminated.
    #[error("actor is no longer running")]
    DeadActor,

    /// The actor was forcibly terminated.
    #[error("actor was killed")]
    Killed,

    /// A receive or call exceeded its timeout.
    #[error("timed out")]
    Timeout,

    /// A respond helper was handed a message that is not a call.
    #[error("message does not match the call pattern")]
    InvalidCallMessage,

    /// A call target's handler failed; the payload is the formatted failure.
    #[error("remote handler raised an exception: {0}")]
    RemoteException(Value),

    /// A call named a method the target does not provide.
    #[error("no remote method {0:?}")]
    RemoteAttributeError(String),

    /// An awaited actor failed; the payload is the formatted failure.
    #[error("actor raised an exception: {0}")]
    Exception(Value),

    /// Another live actor already holds the requested name.
    #[error("another actor is already registered as {0}")]
    NameInUse(ActorId),

    /// A message payload could not be encoded or decoded.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// An HTTP exchange with a peer failed outright.
    #[error("transport error: {0}")]
    Transport(String),

    /// The operation has no remote equivalent.
    #[error("{0} is not supported")]
    Unsupported(&'static str),
}

impl ActorError {
    /// True for outcomes that report a terminated target.
    pub fn is_dead(&self) -> bool {
        matches!(self, Self::DeadActor | Self::Killed)
    }

    /// True when the operation may succeed if simply retried later.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

impl From<CodecError> for ActorError {
    fn from(error: CodecError) -> Self {
        match error {
            // An address that no longer resolves means its actor is gone.
            CodecError::UnknownActor(_) => Self::DeadActor,
            other => Self::Protocol(other.to_string()),
        }
    }
}
