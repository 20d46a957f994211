//! Named behaviors available for remote spawn.

// Layer 1: Standard library imports
use std::fmt;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use dashmap::DashMap;

// Layer 3: Internal module imports
use missive_rt::actor::Behavior;

type Factory = Arc<dyn Fn() -> Box<dyn Behavior> + Send + Sync>;

/// The whitelist of behaviors a peer may spawn over HTTP.
///
/// A remote PUT carries a behavior *name*; the bridge looks the name up
/// here and spawns a fresh instance from its factory. Anything not
/// registered cannot be started remotely; the bridge deliberately has no
/// way to run code it receives.
///
/// # Example
/// ```rust,ignore
/// use missive_web::BehaviorRegistry;
///
/// let behaviors = BehaviorRegistry::new();
/// behaviors.register("echo", || Box::new(EchoBehavior));
/// assert!(behaviors.contains("echo"));
/// ```
#[derive(Default)]
pub struct BehaviorRegistry {
    factories: DashMap<String, Factory>,
}

impl BehaviorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `factory`'s behavior spawnable under `name`. A later
    /// registration under the same name replaces the earlier one.
    pub fn register<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Behavior> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Build a fresh instance of the named behavior.
    pub fn create(&self, name: &str) -> Option<Box<dyn Behavior>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// True when `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Number of registered behaviors.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorRegistry")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use missive_rt::actor::behavior_fn;
    use missive_rt::message::Value;

    fn noop() -> Box<dyn Behavior> {
        Box::new(behavior_fn(|_ctx| Box::pin(async { Ok(Value::Null) })))
    }

    #[test]
    fn test_register_and_create() {
        let behaviors = BehaviorRegistry::new();
        assert!(behaviors.is_empty());

        behaviors.register("noop", noop);
        assert!(behaviors.contains("noop"));
        assert_eq!(behaviors.len(), 1);
        assert!(behaviors.create("noop").is_some());
    }

    #[test]
    fn test_unknown_name() {
        let behaviors = BehaviorRegistry::new();
        assert!(!behaviors.contains("ghost"));
        assert!(behaviors.create("ghost").is_none());
    }

    #[test]
    fn test_each_create_is_a_fresh_instance() {
        let behaviors = BehaviorRegistry::new();
        behaviors.register("noop", noop);

        let first = behaviors.create("noop");
        let second = behaviors.create("noop");
        assert!(first.is_some());
        assert!(second.is_some());
    }
}
