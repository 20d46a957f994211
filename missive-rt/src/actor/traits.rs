//! The behavior trait implemented by every actor body.

// Layer 1: Standard library imports
use std::future::Future;
use std::pin::Pin;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::context::ActorContext;
use crate::message::Value;

/// Boxed error type behaviors fail with.
///
/// An actor that returns `Err` terminates with an exception; the error is
/// formatted into a JSON-compatible tree and mirrored to linked observers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Future type produced by closure behaviors (see [`behavior_fn`]).
pub type BehaviorFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, BoxError>> + Send + 'a>>;

/// An actor body.
///
/// `main` runs once, from spawn to termination, suspending only at awaits
/// (receive, sleep, call, and so on). Returning a value ends the actor
/// normally; returning an error ends it with an exception. Both outcomes are
/// recorded in the actor's exit signal and broadcast to linked addresses.
///
/// # Example
/// ```rust,ignore
/// use async_trait::async_trait;
/// use missive_rt::{ActorContext, Behavior, BoxError, Value};
///
/// struct Doubler;
///
/// #[async_trait]
/// impl Behavior for Doubler {
///     async fn main(&mut self, ctx: &mut ActorContext) -> Result<Value, BoxError> {
///         let message = ctx.receive_any().await;
///         let n = message.as_i64().unwrap_or(0);
///         Ok(Value::from(n * 2))
///     }
/// }
/// ```
#[async_trait]
pub trait Behavior: Send + 'static {
    /// The actor body. Runs exactly once.
    async fn main(&mut self, ctx: &mut ActorContext) -> Result<Value, BoxError>;

    /// Best-effort cleanup hook.
    ///
    /// Runs after `main` returns, and also after a kill: the runtime drops
    /// the `main` future when the actor is killed, so cleanup placed at the
    /// end of `main` would be skipped. Keep it short: it delays termination
    /// and cannot itself be killed.
    async fn post_stop(&mut self, _ctx: &mut ActorContext) {}
}

#[async_trait]
impl Behavior for Box<dyn Behavior> {
    async fn main(&mut self, ctx: &mut ActorContext) -> Result<Value, BoxError> {
        (**self).main(ctx).await
    }

    async fn post_stop(&mut self, ctx: &mut ActorContext) {
        (**self).post_stop(ctx).await;
    }
}

/// Adapter turning a closure into a [`Behavior`].
///
/// Built with [`behavior_fn`]; the closure is consumed on first (and only)
/// run.
pub struct FnBehavior<F> {
    body: Option<F>,
}

/// Wrap an async closure as a one-shot behavior.
///
/// The closure receives the actor's context and must box its future:
///
/// ```rust,ignore
/// let address = system.spawn(behavior_fn(|ctx| {
///     Box::pin(async move {
///         let message = ctx.receive_any().await;
///         Ok(message)
///     })
/// }));
/// ```
pub fn behavior_fn<F>(body: F) -> FnBehavior<F>
where
    F: for<'a> FnOnce(&'a mut ActorContext) -> BehaviorFuture<'a> + Send + 'static,
{
    FnBehavior { body: Some(body) }
}

#[async_trait]
impl<F> Behavior for FnBehavior<F>
where
    F: for<'a> FnOnce(&'a mut ActorContext) -> BehaviorFuture<'a> + Send + 'static,
{
    async fn main(&mut self, ctx: &mut ActorContext) -> Result<Value, BoxError> {
        match self.body.take() {
            Some(body) => body(ctx).await,
            None => Err("behavior already ran".into()),
        }
    }
}
