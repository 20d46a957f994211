//! The system handle: spawning, addressing, and remote peers.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

// Layer 3: Internal module imports
use super::config::SystemConfig;
use super::errors::ActorError;
use super::registry::Registry;
use crate::actor::lifecycle::run_actor;
use crate::actor::{behavior_fn, ActorCell, Behavior, BehaviorFuture};
use crate::address::{Address, LocalAddress, RemoteAddress};
use crate::message::Value;
use crate::supervisor::Gather;
use crate::util::ActorId;

/// The explicit runtime context every actor lives in.
///
/// The system owns the registry and the configuration, hands out addresses,
/// and schedules each spawned behavior as a tokio task. Handles are cheap
/// clones of one shared state; spawn from wherever one is in reach.
///
/// # Example
/// ```rust,ignore
/// use missive_rt::{ActorSystem, SystemConfig};
///
/// #[tokio::main]
/// async fn main() {
///     let system = ActorSystem::new(SystemConfig::default());
///     let address = system.spawn_fn(|_ctx| Box::pin(async { Ok(2.into()) }));
///     assert_eq!(address.wait().await.unwrap(), 2.into());
/// }
/// ```
#[derive(Clone)]
pub struct ActorSystem {
    inner: Arc<SystemInner>,
}

struct SystemInner {
    registry: Registry,
    config: SystemConfig,
    client: reqwest::Client,
}

impl ActorSystem {
    /// Create a fresh system with its own registry.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            inner: Arc::new(SystemInner {
                registry: Registry::new(),
                config,
                client: reqwest::Client::new(),
            }),
        }
    }

    /// The actor registry.
    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// The system configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.inner.config
    }

    /// Start a new actor running `behavior`; returns its address
    /// immediately.
    pub fn spawn<B: Behavior>(&self, behavior: B) -> Address {
        self.spawn_with_link(behavior, None)
    }

    /// Start a new actor linked to `link_to` (with trap-exit) before it gets
    /// a chance to run.
    pub(crate) fn spawn_with_link<B: Behavior>(
        &self,
        behavior: B,
        link_to: Option<Address>,
    ) -> Address {
        let cell = ActorCell::new(self.clone());
        self.inner.registry.insert(Arc::clone(&cell));
        if let Some(observer) = link_to {
            cell.add_link(observer, true);
        }
        let address = Address::Local(LocalAddress::new(Arc::clone(&cell)));
        debug!(actor = %cell.id(), "spawned actor");
        tokio::spawn(run_actor(cell, behavior));
        address
    }

    /// Start a new actor directly under a public name instead of a
    /// generated id. Fails with [`ActorError::NameInUse`] without running
    /// the behavior when the name is taken.
    pub fn spawn_named<B: Behavior>(
        &self,
        name: impl Into<ActorId>,
        behavior: B,
    ) -> Result<Address, ActorError> {
        let cell = ActorCell::new(self.clone());
        self.inner.registry.insert_named(name.into(), Arc::clone(&cell))?;
        let address = Address::Local(LocalAddress::new(Arc::clone(&cell)));
        debug!(actor = %cell.id(), "spawned named actor");
        tokio::spawn(run_actor(cell, behavior));
        Ok(address)
    }

    /// Start a new actor from an async closure (see
    /// [`behavior_fn`](crate::actor::behavior_fn)).
    pub fn spawn_fn<F>(&self, body: F) -> Address
    where
        F: for<'a> FnOnce(&'a mut crate::actor::ActorContext) -> BehaviorFuture<'a>
            + Send
            + 'static,
    {
        self.spawn(behavior_fn(body))
    }

    /// Resolve a live actor's id to an address.
    pub fn lookup(&self, id: &ActorId) -> Option<Address> {
        self.inner
            .registry
            .lookup(id)
            .map(|cell| Address::Local(LocalAddress::new(cell)))
    }

    /// Run every behavior to termination and return their notification
    /// messages in spawn order, however the completions interleave.
    pub async fn wait_all(
        &self,
        behaviors: Vec<Box<dyn Behavior>>,
    ) -> Result<Vec<Value>, ActorError> {
        match self.spawn(Gather::new(behaviors)).wait().await? {
            Value::Seq(results) => Ok(results),
            other => Err(ActorError::Protocol(format!(
                "gather returned a non-sequence: {other}"
            ))),
        }
    }

    /// An address for an actor served at `url` by a peer's bridge.
    pub fn remote_address(&self, url: Url) -> Address {
        Address::Remote(RemoteAddress::new(
            url,
            self.inner.client.clone(),
            self.inner.config.base_url.clone(),
        ))
    }

    /// Ask the peer serving `url` to start one of its registered behaviors
    /// there, under the id in the URL's path.
    pub async fn spawn_remote(&self, url: Url, behavior: &str) -> Result<Address, ActorError> {
        let response = self
            .inner
            .client
            .put(url.clone())
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(behavior.to_owned())
            .send()
            .await
            .map_err(|error| ActorError::Transport(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(self.remote_address(url))
        } else if status == StatusCode::METHOD_NOT_ALLOWED {
            Err(ActorError::Protocol(
                "peer refused spawn without an actor id".to_owned(),
            ))
        } else if status == StatusCode::NOT_FOUND {
            Err(ActorError::Protocol(format!(
                "peer does not provide behavior {behavior:?}"
            )))
        } else {
            Err(ActorError::Transport(format!(
                "unexpected status {status} from {url}"
            )))
        }
    }

    /// If `url` points under this system's own base URL, extract the local
    /// actor id it names.
    pub(crate) fn strip_local_prefix(&self, url: &Url) -> Option<ActorId> {
        let base = self.inner.config.base_url.as_ref()?;
        let same_authority = url.scheme() == base.scheme()
            && url.host_str() == base.host_str()
            && url.port_or_known_default() == base.port_or_known_default();
        if !same_authority {
            return None;
        }
        let path = url.path().trim_start_matches('/');
        if path.is_empty() {
            return None;
        }
        Some(ActorId::from(path))
    }
}
