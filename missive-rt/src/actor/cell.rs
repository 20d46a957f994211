//! Shared per-actor state.

// Layer 1: Standard library imports
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

// Layer 3: Internal module imports
use super::lifecycle::{ExitStatus, Fault};
use crate::address::Address;
use crate::mailbox::Mailbox;
use crate::message::Value;
use crate::supervisor::LinkSet;
use crate::system::{ActorError, ActorSystem};
use crate::util::ActorId;

/// The state of one actor that outlives its task.
///
/// The cell is what local addresses point at: it carries the actor's
/// current id, its mailbox, its link sets, the kill token, and the exit
/// signal. The behavior task holds one `Arc` while running; the registry
/// holds another until termination; any number of addresses may hold more.
/// Holding an address does not keep an actor *running*; liveness is the
/// `running` flag, cleared when the behavior ends.
pub struct ActorCell {
    id: RwLock<ActorId>,
    mailbox: Mailbox,
    links: Mutex<LinkSet>,
    running: AtomicBool,
    started_at: DateTime<Utc>,
    exit: watch::Sender<Option<ExitStatus>>,
    kill: CancellationToken,
    system: ActorSystem,
}

impl ActorCell {
    pub(crate) fn new(system: ActorSystem) -> Arc<Self> {
        // The sender alone is kept; waiters subscribe on demand and
        // settle() uses send_replace, which needs no live receiver.
        let (exit, _initial_rx) = watch::channel(None);
        Arc::new(Self {
            id: RwLock::new(ActorId::new()),
            mailbox: Mailbox::new(),
            links: Mutex::new(LinkSet::new()),
            running: AtomicBool::new(true),
            started_at: Utc::now(),
            exit,
            kill: CancellationToken::new(),
            system,
        })
    }

    /// The actor's current id (changes on rename).
    pub fn id(&self) -> ActorId {
        self.id.read().clone()
    }

    pub(crate) fn set_id(&self, id: ActorId) {
        *self.id.write() = id;
    }

    /// True until the behavior has returned, failed, or been killed.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// When the actor was spawned.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Number of queued, undelivered messages.
    pub fn mailbox_len(&self) -> usize {
        self.mailbox.len()
    }

    /// Number of linked addresses.
    pub fn link_count(&self) -> usize {
        self.links.lock().len()
    }

    pub(crate) fn system(&self) -> &ActorSystem {
        &self.system
    }

    pub(crate) fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    pub(crate) fn push(&self, message: Value) {
        self.mailbox.push(message);
    }

    pub(crate) fn add_link(&self, address: Address, trap_exit: bool) {
        self.links.lock().add(address, trap_exit);
    }

    pub(crate) fn links_snapshot(&self) -> (Vec<Address>, Vec<Address>) {
        let links = self.links.lock();
        (links.links().to_vec(), links.exit_links().to_vec())
    }

    pub(crate) fn kill_token(&self) -> CancellationToken {
        self.kill.clone()
    }

    /// Request termination. The running behavior observes the token at its
    /// next suspension point.
    pub(crate) fn kill(&self) {
        self.kill.cancel();
    }

    /// Record the terminal outcome and clear the running flag. Waiters wake
    /// here; link notifications are dispatched afterwards by the run loop.
    pub(crate) fn settle(&self, status: ExitStatus) {
        self.running.store(false, Ordering::Release);
        self.exit.send_replace(Some(status));
    }

    /// The terminal outcome, if the actor has one yet.
    pub fn exit_status(&self) -> Option<ExitStatus> {
        self.exit.borrow().clone()
    }

    /// Block until the actor terminates; every waiter sees the same outcome,
    /// however often it asks.
    pub async fn wait(&self) -> Result<Value, ActorError> {
        let mut outcomes = self.exit.subscribe();
        let status = match outcomes.wait_for(|status| status.is_some()).await {
            Ok(settled) => settled.clone(),
            // The sender lives in this cell, so the channel cannot close
            // while we are borrowing it.
            Err(_) => None,
        };
        match status {
            Some(ExitStatus::Normal(value)) => Ok(value),
            Some(ExitStatus::Failed(Fault::Killed)) => Err(ActorError::Killed),
            Some(ExitStatus::Failed(Fault::Error(detail))) => Err(ActorError::Exception(detail)),
            None => Err(ActorError::DeadActor),
        }
    }
}

impl fmt::Debug for ActorCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorCell")
            .field("id", &self.id())
            .field("running", &self.is_running())
            .field("mailbox_len", &self.mailbox_len())
            .finish_non_exhaustive()
    }
}
