//! The process-wide actor registry.

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::RwLock;

// Layer 3: Internal module imports
use super::errors::ActorError;
use crate::actor::ActorCell;
use crate::util::ActorId;

/// Mutex-guarded mapping from actor id to live actor.
///
/// The registry holds the runtime's reference to each live actor's cell;
/// entries are inserted at spawn and removed when the actor terminates, so
/// a lookup answering `Some` names an actor that was alive a moment ago.
/// Rename is atomic: the old key disappears, the new key appears, and the
/// cell's own id changes under the same write lock.
#[derive(Debug, Default)]
pub struct Registry {
    actors: RwLock<HashMap<ActorId, Arc<ActorCell>>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly spawned actor under its generated id.
    pub(crate) fn insert(&self, cell: Arc<ActorCell>) {
        self.actors.write().insert(cell.id(), cell);
    }

    /// Insert a freshly spawned actor under a caller-chosen name.
    pub(crate) fn insert_named(&self, name: ActorId, cell: Arc<ActorCell>) -> Result<(), ActorError> {
        let mut actors = self.actors.write();
        if actors.contains_key(&name) {
            return Err(ActorError::NameInUse(name));
        }
        cell.set_id(name.clone());
        actors.insert(name, cell);
        Ok(())
    }

    /// Atomically move an actor from its current id to `name`.
    pub(crate) fn rename(&self, cell: &Arc<ActorCell>, name: ActorId) -> Result<(), ActorError> {
        let mut actors = self.actors.write();
        let current = cell.id();
        if name == current {
            return Ok(());
        }
        if actors.contains_key(&name) {
            return Err(ActorError::NameInUse(name));
        }
        actors.remove(&current);
        cell.set_id(name.clone());
        actors.insert(name, Arc::clone(cell));
        Ok(())
    }

    /// Find a live actor by id.
    pub fn lookup(&self, id: &ActorId) -> Option<Arc<ActorCell>> {
        self.actors.read().get(id).cloned()
    }

    /// Drop an actor's entry at termination.
    pub(crate) fn unregister(&self, id: &ActorId) {
        self.actors.write().remove(id);
    }

    /// Number of live actors.
    pub fn len(&self) -> usize {
        self.actors.read().len()
    }

    /// True when no actor is registered.
    pub fn is_empty(&self) -> bool {
        self.actors.read().is_empty()
    }
}
