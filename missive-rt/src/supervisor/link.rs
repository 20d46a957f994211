//! Link sets and termination notification shapes.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::address::Address;
use crate::message::Value;
use crate::shape::Pattern;

/// The addresses an actor notifies when it terminates.
///
/// Every linked address receives an exception notification if the actor
/// fails. Addresses linked with trap-exit additionally receive an exit
/// notification carrying the return value (or null after a failure). Links
/// are append-only; there is no unlink.
#[derive(Debug, Default)]
pub struct LinkSet {
    links: Vec<Address>,
    exit_links: Vec<Address>,
}

impl LinkSet {
    /// Create an empty link set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an address; with `trap_exit` it also joins the exit set.
    pub fn add(&mut self, address: Address, trap_exit: bool) {
        if trap_exit {
            self.exit_links.push(address.clone());
        }
        self.links.push(address);
    }

    /// Addresses notified about failures.
    pub fn links(&self) -> &[Address] {
        &self.links
    }

    /// Addresses additionally notified about normal exits.
    pub fn exit_links(&self) -> &[Address] {
        &self.exit_links
    }

    /// Total number of linked addresses.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True when nothing is linked.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Build the notification cast to exit links when an actor terminates:
/// `{"address": <who>, "exit": <value-or-null>}`.
pub fn exit_message(address: Address, value: Value) -> Value {
    Value::map([("address", Value::Address(address)), ("exit", value)])
}

/// Build the notification cast to links when an actor fails:
/// `{"address": <who>, "exception": <formatted-failure>}`.
pub fn exception_message(address: Address, detail: Value) -> Value {
    Value::map([("address", Value::Address(address)), ("exception", detail)])
}

/// Shape of an exit notification, for use in receive.
pub fn exit_pattern() -> Pattern {
    Pattern::map([("exit", Pattern::Any), ("address", Pattern::Any)])
}

/// Shape of an exception notification, for use in receive.
pub fn exception_pattern() -> Pattern {
    Pattern::map([("exception", Pattern::Any), ("address", Pattern::Any)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{ActorSystem, SystemConfig};

    #[tokio::test]
    async fn test_link_set_membership() {
        let system = ActorSystem::new(SystemConfig::default());
        let first = system.spawn_fn(|_ctx| Box::pin(async { Ok(Value::Null) }));
        let second = system.spawn_fn(|_ctx| Box::pin(async { Ok(Value::Null) }));

        let mut links = LinkSet::new();
        assert!(links.is_empty());

        links.add(first.clone(), false);
        links.add(second.clone(), true);

        assert_eq!(links.len(), 2);
        assert_eq!(links.links(), &[first, second.clone()]);
        // Only the trap-exit link joins the exit set.
        assert_eq!(links.exit_links(), &[second]);
    }

    #[test]
    fn test_notification_shapes_match_their_patterns() {
        // The message builders and patterns must agree on field names; use
        // plain values in place of addresses to check the shapes.
        let exit = Value::map([("address", Value::Null), ("exit", Value::from(4))]);
        let exception = Value::map([
            ("address", Value::Null),
            ("exception", Value::from("boom")),
        ]);

        assert!(exit_pattern().matches(&exit));
        assert!(!exit_pattern().matches(&exception));
        assert!(exception_pattern().matches(&exception));
        assert!(!exception_pattern().matches(&exit));
    }
}
