//! Addresses of actors in this process.

// Layer 1: Standard library imports
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::actor::ActorCell;
use crate::message::{codec, Value};
use crate::system::ActorError;

/// A handle to an actor running (or once running) in this process.
///
/// The handle shares the actor's cell; it does not keep the actor running.
/// Operations that need a live target (cast, call, link, kill) fail with
/// [`ActorError::DeadActor`] once the behavior has ended. `wait` keeps
/// working after death and returns the recorded outcome, the same one on
/// every invocation.
///
/// Equality and hashing follow actor identity: two handles are equal iff
/// they share a cell, so a renamed actor's old and new handles stay equal.
#[derive(Clone)]
pub struct LocalAddress {
    cell: Arc<ActorCell>,
}

impl LocalAddress {
    pub(crate) fn new(cell: Arc<ActorCell>) -> Self {
        Self { cell }
    }

    /// The target actor's current id.
    pub fn id(&self) -> crate::util::ActorId {
        self.cell.id()
    }

    /// True until the target's behavior has ended.
    pub fn is_running(&self) -> bool {
        self.cell.is_running()
    }

    /// When the target was spawned.
    pub fn started_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.cell.started_at()
    }

    /// Messages queued in the target's mailbox.
    pub fn mailbox_len(&self) -> usize {
        self.cell.mailbox_len()
    }

    /// Addresses linked to the target.
    pub fn link_count(&self) -> usize {
        self.cell.link_count()
    }

    /// Fire-and-forget send.
    ///
    /// The message is value-copied through the wire codec before delivery,
    /// so sender and receiver never share mutable state. Fails with
    /// [`ActorError::DeadActor`] when the target has terminated, and with a
    /// protocol error when the message embeds an address that no longer
    /// resolves.
    pub async fn cast(&self, message: Value) -> Result<(), ActorError> {
        if !self.cell.is_running() {
            return Err(ActorError::DeadActor);
        }
        let bytes = codec::encode(&message, None)?;
        let copy = codec::decode(&bytes, self.cell.system())?;
        self.cell.push(copy);
        Ok(())
    }

    /// Link `observer` to the target: the observer is cast a notification
    /// when the target terminates. With `trap_exit` it also receives normal
    /// exit notifications.
    pub fn link(&self, observer: crate::address::Address, trap_exit: bool) -> Result<(), ActorError> {
        if !self.cell.is_running() {
            return Err(ActorError::DeadActor);
        }
        self.cell.add_link(observer, trap_exit);
        Ok(())
    }

    /// Wait for the target to terminate; return its value or re-raise its
    /// failure ([`ActorError::Killed`] or [`ActorError::Exception`]).
    pub async fn wait(&self) -> Result<Value, ActorError> {
        self.cell.wait().await
    }

    /// Terminate the target at its next suspension point. Waiters and
    /// linked actors observe a kill.
    pub fn kill(&self) -> Result<(), ActorError> {
        if !self.cell.is_running() {
            return Err(ActorError::DeadActor);
        }
        self.cell.kill();
        Ok(())
    }

    pub(crate) fn cell(&self) -> &Arc<ActorCell> {
        &self.cell
    }
}

impl PartialEq for LocalAddress {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl Eq for LocalAddress {}

impl Hash for LocalAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.cell) as usize).hash(state);
    }
}

impl fmt::Debug for LocalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalAddress").field(&self.id()).finish()
    }
}
