//! The serving side of the call protocol.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use tracing::debug;

// Layer 3: Internal module imports
use super::protocol::call_pattern;
use crate::actor::{format_error, ActorContext, Behavior, BoxError};
use crate::message::Value;
use crate::system::ActorError;

/// Why a dispatch produced no successful reply.
#[derive(Debug)]
pub enum DispatchError {
    /// The server has no such method; the caller gets an invalid-method
    /// reply.
    UnknownMethod,
    /// The handler failed; the caller gets an exception reply carrying the
    /// formatted error.
    Handler(BoxError),
}

impl DispatchError {
    /// Wrap a handler error.
    pub fn handler(error: impl Into<BoxError>) -> Self {
        Self::Handler(error.into())
    }
}

/// An actor that answers calls by dispatching on the method name.
///
/// Implementors route each method to a handler and return its payload;
/// unknown methods return [`DispatchError::UnknownMethod`]. The
/// [`ServerBehavior`] adapter supplies the receive loop and the reply
/// bookkeeping, so a server never touches correlation ids.
///
/// # Example
/// ```rust,ignore
/// use async_trait::async_trait;
/// use missive_rt::{ActorContext, DispatchError, Server, Value};
///
/// struct Counter {
///     count: i64,
/// }
///
/// #[async_trait]
/// impl Server for Counter {
///     async fn dispatch(
///         &mut self,
///         method: &str,
///         message: Value,
///         _ctx: &mut ActorContext,
///     ) -> Result<Value, DispatchError> {
///         match method {
///             "add" => {
///                 self.count += message.as_i64().unwrap_or(0);
///                 Ok(Value::from(self.count))
///             }
///             "read" => Ok(Value::from(self.count)),
///             _ => Err(DispatchError::UnknownMethod),
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Server: Send + 'static {
    /// Hook run once before the first call is served.
    async fn pre_start(&mut self, _ctx: &mut ActorContext) -> Result<(), BoxError> {
        Ok(())
    }

    /// Hook run when the server stops, including after a kill.
    async fn post_stop(&mut self, _ctx: &mut ActorContext) {}

    /// Handle one call.
    async fn dispatch(
        &mut self,
        method: &str,
        message: Value,
        ctx: &mut ActorContext,
    ) -> Result<Value, DispatchError>;
}

/// Adapter running a [`Server`] as a [`Behavior`].
///
/// The loop consumes only call-shaped messages and answers every one with
/// exactly one reply. It runs until the actor is killed.
pub struct ServerBehavior<S: Server> {
    server: S,
}

impl<S: Server> ServerBehavior<S> {
    /// Wrap a server for spawning.
    pub fn new(server: S) -> Self {
        Self { server }
    }
}

#[async_trait]
impl<S: Server> Behavior for ServerBehavior<S> {
    async fn main(&mut self, ctx: &mut ActorContext) -> Result<Value, BoxError> {
        self.server.pre_start(ctx).await?;
        let patterns = [call_pattern()];
        loop {
            let (_, request) = ctx.receive(&patterns).await;
            let method = request
                .get("method")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned();
            let payload = request.get("message").cloned().unwrap_or(Value::Null);

            let reply = match self.server.dispatch(&method, payload, ctx).await {
                Ok(result) => ctx.respond(&request, result).await,
                Err(DispatchError::UnknownMethod) => {
                    ctx.respond_invalid_method(&request, &method).await
                }
                Err(DispatchError::Handler(error)) => {
                    ctx.respond_exception(&request, format_error(error.as_ref()))
                        .await
                }
            };
            // A caller that died before its reply is not our failure.
            if let Err(ActorError::DeadActor) = reply {
                debug!(server = %ctx.id(), method, "reply dropped, caller is gone");
            } else {
                reply?;
            }
        }
    }

    async fn post_stop(&mut self, ctx: &mut ActorContext) {
        self.server.post_stop(ctx).await;
    }
}
