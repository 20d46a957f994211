//! The unified address type.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::local::LocalAddress;
use super::remote::RemoteAddress;
use crate::actor::ActorContext;
use crate::call::protocol;
use crate::message::Value;
use crate::system::ActorError;
use crate::util::ActorId;

/// An opaque reference to an actor, local or remote.
///
/// Addresses are what messages carry, what spawn returns, and what links
/// point at. They are cheap to clone and compare by target identity, so a
/// map keyed by `Address` (as in gather) groups messages per actor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    /// An actor in this process.
    Local(LocalAddress),
    /// An actor behind a peer's HTTP bridge.
    Remote(RemoteAddress),
}

impl Address {
    /// The target's id: its registry id locally, its URL remotely.
    pub fn id(&self) -> ActorId {
        match self {
            Self::Local(local) => local.id(),
            Self::Remote(remote) => remote.id(),
        }
    }

    /// True for the local variant.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// Borrow the local variant, if this is one.
    pub fn as_local(&self) -> Option<&LocalAddress> {
        match self {
            Self::Local(local) => Some(local),
            Self::Remote(_) => None,
        }
    }

    /// Fire-and-forget send.
    ///
    /// Local targets get the message pushed straight into their mailbox
    /// (value-copied through the codec); remote targets get an HTTP POST.
    /// Fails with [`ActorError::DeadActor`] when the target has terminated.
    pub async fn cast(&self, message: Value) -> Result<(), ActorError> {
        match self {
            Self::Local(local) => local.cast(message).await,
            Self::Remote(remote) => remote.cast(&message).await,
        }
    }

    /// Correlated request/response with an optional timeout.
    ///
    /// Sends a call message carrying a fresh correlation id and suspends the
    /// calling actor until the matching reply arrives. The three reply kinds
    /// surface as `Ok`, [`ActorError::RemoteException`], and
    /// [`ActorError::RemoteAttributeError`]; an elapsed timeout is
    /// [`ActorError::Timeout`]. With no explicit timeout the system default
    /// applies, when configured.
    pub async fn call(
        &self,
        ctx: &mut ActorContext,
        method: &str,
        message: Value,
        timeout: Option<Duration>,
    ) -> Result<Value, ActorError> {
        let timeout = timeout.or(ctx.system().config().call_timeout);
        match self {
            Self::Local(_) => protocol::call(ctx, self, method, message, timeout).await,
            Self::Remote(remote) => {
                let system = ctx.system().clone();
                remote.call(&system, method, message, timeout).await
            }
        }
    }

    /// Link the calling actor to this target: the caller is cast a
    /// notification when the target terminates. Remote targets do not
    /// support links.
    pub fn link(&self, ctx: &ActorContext, trap_exit: bool) -> Result<(), ActorError> {
        match self {
            Self::Local(local) => local.link(ctx.address(), trap_exit),
            Self::Remote(_) => Err(ActorError::Unsupported("link on a remote address")),
        }
    }

    /// Wait for the target to terminate and return its outcome; the same
    /// outcome on every invocation. Not available remotely.
    pub async fn wait(&self) -> Result<Value, ActorError> {
        match self {
            Self::Local(local) => local.wait().await,
            Self::Remote(_) => Err(ActorError::Unsupported("wait on a remote address")),
        }
    }

    /// Terminate the target. Locally the kill lands at the target's next
    /// suspension point; remotely it is an HTTP DELETE.
    pub async fn kill(&self) -> Result<(), ActorError> {
        match self {
            Self::Local(local) => local.kill(),
            Self::Remote(remote) => remote.kill().await,
        }
    }
}
