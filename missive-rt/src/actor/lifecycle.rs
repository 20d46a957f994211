//! The actor run loop: exit outcomes, failure formatting, and termination
//! broadcasting.

// Layer 1: Standard library imports
use std::error::Error;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use tracing::debug;

// Layer 3: Internal module imports
use super::cell::ActorCell;
use super::context::ActorContext;
use super::traits::Behavior;
use crate::address::{Address, LocalAddress};
use crate::message::Value;
use crate::supervisor::{exception_message, exit_message};
use crate::system::ActorError;

/// How an actor ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ExitStatus {
    /// The behavior returned this value.
    Normal(Value),
    /// The behavior failed or was killed.
    Failed(Fault),
}

/// The failure half of [`ExitStatus`].
#[derive(Debug, Clone, PartialEq)]
pub enum Fault {
    /// Terminated from outside via kill.
    Killed,
    /// The behavior returned an error, formatted into a message tree.
    Error(Value),
}

impl Fault {
    /// The failure as a message payload, suitable for an exception
    /// notification.
    pub fn detail(&self) -> Value {
        match self {
            Self::Killed => Value::map([("message", Value::from(ActorError::Killed.to_string()))]),
            Self::Error(detail) => detail.clone(),
        }
    }
}

/// Format an error into the JSON-compatible tree carried by exception
/// notifications and call replies: `{"message": ..., "causes": [...]}`,
/// with `causes` listing the source chain and omitted when empty.
pub fn format_error(error: &dyn Error) -> Value {
    let mut causes = Vec::new();
    let mut source = error.source();
    while let Some(cause) = source {
        causes.push(Value::from(cause.to_string()));
        source = cause.source();
    }

    let mut entries = vec![("message", Value::from(error.to_string()))];
    if !causes.is_empty() {
        entries.push(("causes", Value::Seq(causes)));
    }
    Value::map(entries)
}

/// Drive one actor from spawn to termination.
///
/// The behavior future races against the cell's kill token, so a kill takes
/// effect at the behavior's next suspension point. Afterwards the behavior's
/// `post_stop` hook runs, the exit signal settles, link notifications go
/// out, and the registry entry is removed, strictly in that order, so a
/// link-notification receiver can immediately `wait` on the sender.
pub(crate) async fn run_actor<B: Behavior>(cell: Arc<ActorCell>, mut behavior: B) {
    let mut ctx = ActorContext::new(Arc::clone(&cell));
    let kill = cell.kill_token();

    let status = {
        let main = behavior.main(&mut ctx);
        tokio::pin!(main);
        tokio::select! {
            outcome = &mut main => match outcome {
                Ok(value) => ExitStatus::Normal(value),
                Err(error) => ExitStatus::Failed(Fault::Error(format_error(error.as_ref()))),
            },
            () = kill.cancelled() => ExitStatus::Failed(Fault::Killed),
        }
    };

    behavior.post_stop(&mut ctx).await;
    finalize(&cell, status).await;
}

async fn finalize(cell: &Arc<ActorCell>, status: ExitStatus) {
    cell.settle(status.clone());

    let id = cell.id();
    let self_address = Address::Local(LocalAddress::new(Arc::clone(cell)));
    let (links, exit_links) = cell.links_snapshot();

    if let ExitStatus::Failed(fault) = &status {
        let detail = fault.detail();
        for link in &links {
            let notification = exception_message(self_address.clone(), detail.clone());
            if let Err(error) = link.cast(notification).await {
                debug!(actor = %id, %error, "exception notification dropped");
            }
        }
    }

    let exit_value = match &status {
        ExitStatus::Normal(value) => value.clone(),
        ExitStatus::Failed(_) => Value::Null,
    };
    for link in &exit_links {
        let notification = exit_message(self_address.clone(), exit_value.clone());
        if let Err(error) = link.cast(notification).await {
            debug!(actor = %id, %error, "exit notification dropped");
        }
    }

    // Registry entry goes last: notification receivers may still resolve us
    // while decoding the address embedded in the notification.
    cell.system().registry().unregister(&id);
    debug!(actor = %id, "actor terminated");
}
