//! The handle a behavior uses to act as its actor.

// Layer 1: Standard library imports
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::cell::ActorCell;
use super::traits::Behavior;
use crate::address::{Address, LocalAddress};
use crate::call::protocol;
use crate::message::Value;
use crate::shape::Pattern;
use crate::system::{ActorError, ActorSystem};

/// The running actor's view of itself.
///
/// A context is handed to the behavior's `main` and is the only way to
/// receive: ownership guarantees a single extractor per mailbox. Everything
/// else on it (spawning, renaming, responding) is a convenience over the
/// actor's cell and system handle.
pub struct ActorContext {
    cell: Arc<ActorCell>,
}

impl ActorContext {
    pub(crate) fn new(cell: Arc<ActorCell>) -> Self {
        Self { cell }
    }

    /// The surrounding actor system.
    pub fn system(&self) -> &ActorSystem {
        self.cell.system()
    }

    /// This actor's address.
    pub fn address(&self) -> Address {
        Address::Local(LocalAddress::new(Arc::clone(&self.cell)))
    }

    /// This actor's current id.
    pub fn id(&self) -> crate::util::ActorId {
        self.cell.id()
    }

    /// Select the next message matching one of `patterns`, suspending until
    /// one arrives. An empty slice selects the next message unconditionally.
    /// Returns the index of the matched pattern and the message.
    pub async fn receive(&mut self, patterns: &[Pattern]) -> (usize, Value) {
        self.cell.mailbox().pop_matching(patterns).await
    }

    /// Like [`receive`](Self::receive) with a deadline. Returns `None` when
    /// the timeout elapses first; the mailbox is unmodified in that case.
    /// A zero timeout probes without suspending.
    pub async fn receive_timeout(
        &mut self,
        patterns: &[Pattern],
        timeout: Duration,
    ) -> Option<(usize, Value)> {
        self.cell.mailbox().pop_matching_timeout(patterns, timeout).await
    }

    /// Take the next message, whatever its shape.
    pub async fn receive_any(&mut self) -> Value {
        self.receive(&[]).await.1
    }

    /// Take this actor's public name. Fails with
    /// [`ActorError::NameInUse`] when another live actor already holds it.
    pub fn rename(&self, name: impl Into<crate::util::ActorId>) -> Result<(), ActorError> {
        self.system().registry().rename(&self.cell, name.into())
    }

    /// Link `address` to this actor: it will be notified when this actor
    /// terminates. With `trap_exit` it receives normal exits too, not just
    /// exceptions.
    pub fn add_link(&self, address: Address, trap_exit: bool) {
        self.cell.add_link(address, trap_exit);
    }

    /// Suspend for `duration`.
    pub async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// Yield to other actors without waiting.
    pub async fn cooperate(&self) {
        tokio::task::yield_now().await;
    }

    /// Spawn an unrelated actor.
    pub fn spawn<B: Behavior>(&self, behavior: B) -> Address {
        self.system().spawn(behavior)
    }

    /// Spawn an actor linked back to this one with trap-exit, so this actor
    /// receives its termination notification. The link is in place before
    /// the child runs.
    pub fn spawn_link<B: Behavior>(&self, behavior: B) -> Address {
        self.system().spawn_with_link(behavior, Some(self.address()))
    }

    /// Reply to a call message with a successful payload.
    ///
    /// `origin` must be a message matching the call pattern, as delivered to
    /// a server's receive; anything else is
    /// [`ActorError::InvalidCallMessage`].
    pub async fn respond(&self, origin: &Value, payload: Value) -> Result<(), ActorError> {
        protocol::respond(origin, payload).await
    }

    /// Reply to a call message naming a method this actor does not provide.
    pub async fn respond_invalid_method(
        &self,
        origin: &Value,
        method: &str,
    ) -> Result<(), ActorError> {
        protocol::respond_invalid_method(origin, method).await
    }

    /// Reply to a call message with a handler failure.
    pub async fn respond_exception(&self, origin: &Value, detail: Value) -> Result<(), ActorError> {
        protocol::respond_exception(origin, detail).await
    }
}
