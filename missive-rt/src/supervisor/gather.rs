//! Ordered collection of child terminations.

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::link::{exception_pattern, exit_pattern};
use crate::actor::{ActorContext, Behavior, BoxError};
use crate::address::Address;
use crate::message::Value;

/// Run a batch of behaviors and collect their termination messages in spawn
/// order, regardless of completion order.
///
/// Each child is spawn-linked with trap-exit, so a finished child produces
/// an exit notification and a failed child an exception notification (the
/// trailing exit notification a failed child also sends is ignored, so each
/// child contributes one entry). Arrivals are recorded in a map keyed by child address
/// and flushed into the result list as the spawn-order cursor catches up.
///
/// The return value is a sequence of the recorded notifications, one per
/// child, in spawn order. This is what
/// [`wait_all`](crate::system::ActorSystem::wait_all) spawns under the hood.
pub struct Gather {
    children: Vec<Box<dyn Behavior>>,
}

impl Gather {
    /// Collect the terminations of `children`.
    pub fn new(children: Vec<Box<dyn Behavior>>) -> Self {
        Self { children }
    }
}

#[async_trait]
impl Behavior for Gather {
    async fn main(&mut self, ctx: &mut ActorContext) -> Result<Value, BoxError> {
        let addresses: Vec<Address> = self
            .children
            .drain(..)
            .map(|child| ctx.spawn_link(child))
            .collect();

        let patterns = [exit_pattern(), exception_pattern()];
        let mut arrived: HashMap<Address, Value> = HashMap::with_capacity(addresses.len());
        let mut results = Vec::with_capacity(addresses.len());
        let mut cursor = 0;

        while results.len() < addresses.len() {
            let (_, message) = ctx.receive(&patterns).await;
            let Some(child) = message.get("address").and_then(Value::as_address).cloned() else {
                continue;
            };
            // First notification per child wins; a failed child also sends
            // a follow-up exit which must not count twice.
            arrived.entry(child).or_insert(message);

            while cursor < addresses.len() {
                match arrived.get(&addresses[cursor]) {
                    Some(outcome) => {
                        results.push(outcome.clone());
                        cursor += 1;
                    }
                    None => break,
                }
            }
        }

        Ok(Value::Seq(results))
    }
}
