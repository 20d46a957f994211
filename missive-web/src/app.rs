//! The bridge router and its verb handlers.

// Layer 1: Standard library imports
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tracing::debug;

// Layer 3: Internal module imports
use super::behaviors::BehaviorRegistry;
use missive_rt::address::Address;
use missive_rt::message::{codec, Value, REMOTE_CALL_TAG};
use missive_rt::system::{ActorError, ActorSystem};
use missive_rt::util::ActorId;

/// Everything the handlers need: the actor system and the spawnable
/// behaviors.
pub struct BridgeState {
    system: ActorSystem,
    behaviors: BehaviorRegistry,
}

impl BridgeState {
    /// Bundle a system with its remote-spawnable behaviors.
    pub fn new(system: ActorSystem, behaviors: BehaviorRegistry) -> Self {
        Self { system, behaviors }
    }

    /// The served actor system.
    pub fn system(&self) -> &ActorSystem {
        &self.system
    }
}

/// Build the bridge router over `state`.
///
/// GET routes also answer HEAD with the body stripped, which gives the
/// liveness probe for free.
pub fn router(state: Arc<BridgeState>) -> Router {
    Router::new()
        .route("/", get(index).put(put_root))
        .route(
            "/{id}",
            get(get_actor)
                .put(put_actor)
                .post(post_actor)
                .delete(delete_actor),
        )
        .with_state(state)
}

/// Serve the bridge on an already-bound listener until the task is
/// dropped.
pub async fn serve(
    listener: tokio::net::TcpListener,
    state: Arc<BridgeState>,
) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}

async fn index() -> Response {
    (StatusCode::OK, "index\n").into_response()
}

async fn put_root() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed\n").into_response()
}

async fn put_actor(
    State(state): State<Arc<BridgeState>>,
    Path(id): Path<String>,
    body: String,
) -> Response {
    let name = body.trim();
    let Some(behavior) = state.behaviors.create(name) else {
        debug!(actor = %id, behavior = name, "remote spawn of unregistered behavior");
        return (StatusCode::NOT_FOUND, "Not Found\n").into_response();
    };
    match state.system.spawn_named(id.as_str(), behavior) {
        Ok(_) => (StatusCode::ACCEPTED, "Accepted\n").into_response(),
        Err(ActorError::NameInUse(_)) => (StatusCode::CONFLICT, "Conflict\n").into_response(),
        Err(error) => {
            debug!(actor = %id, %error, "remote spawn failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error\n").into_response()
        }
    }
}

async fn post_actor(
    State(state): State<Arc<BridgeState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let Some(address) = state.system.lookup(&ActorId::from(id.as_str())) else {
        return (StatusCode::NOT_FOUND, "Not Found\n").into_response();
    };
    let json: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(json) => json,
        Err(_) => return (StatusCode::NOT_ACCEPTABLE, "Not Acceptable\n").into_response(),
    };

    if is_remote_call(&json) {
        return remote_call(&state, address, json).await;
    }

    let message = match codec::from_json(json, &state.system) {
        Ok(message) => message,
        Err(_) => return (StatusCode::NOT_ACCEPTABLE, "Not Acceptable\n").into_response(),
    };
    match address.cast(message).await {
        Ok(()) => (StatusCode::ACCEPTED, "Accepted\n").into_response(),
        Err(ActorError::DeadActor) => (StatusCode::NOT_FOUND, "Not Found\n").into_response(),
        Err(error) => {
            debug!(actor = %id, %error, "cast rejected");
            (StatusCode::NOT_ACCEPTABLE, "Not Acceptable\n").into_response()
        }
    }
}

async fn delete_actor(State(state): State<Arc<BridgeState>>, Path(id): Path<String>) -> Response {
    let Some(address) = state.system.lookup(&ActorId::from(id.as_str())) else {
        return (StatusCode::NOT_FOUND, "Not Found\n").into_response();
    };
    match address.kill().await {
        Ok(()) => (StatusCode::OK, "\n").into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not Found\n").into_response(),
    }
}

async fn get_actor(State(state): State<Arc<BridgeState>>, Path(id): Path<String>) -> Response {
    let Some(address) = state.system.lookup(&ActorId::from(id.as_str())) else {
        return (StatusCode::NOT_FOUND, "Not Found\n").into_response();
    };
    let Some(local) = address.as_local() else {
        return (StatusCode::NOT_FOUND, "Not Found\n").into_response();
    };
    let dump = serde_json::json!({
        "id": local.id().as_str(),
        "running": local.is_running(),
        "mailbox": local.mailbox_len(),
        "links": local.link_count(),
        "started_at": local.started_at().to_rfc3339(),
    });
    (StatusCode::OK, Json(dump)).into_response()
}

fn is_remote_call(json: &serde_json::Value) -> bool {
    json.get(REMOTE_CALL_TAG)
        .is_some_and(serde_json::Value::is_string)
        && json.get("method").is_some_and(serde_json::Value::is_string)
}

/// Perform a correlated call on behalf of the HTTP peer.
///
/// Calls need a calling actor to receive the reply, so the bridge spawns a
/// short-lived proxy actor per request. The proxy folds the typed outcome
/// into a message value the handler maps onto the status table: 202
/// success, 404 invalid method, 406 handler exception, 408 timeout.
async fn remote_call(
    state: &Arc<BridgeState>,
    target: Address,
    json: serde_json::Value,
) -> Response {
    let system = state.system.clone();
    let method = json
        .get("method")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_owned();
    let timeout = json
        .get("timeout")
        .and_then(serde_json::Value::as_f64)
        .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
        .map(Duration::from_secs_f64);
    let payload = json
        .get("message")
        .cloned()
        .unwrap_or(serde_json::Value::Null);
    let message = match codec::from_json(payload, &system) {
        Ok(message) => message,
        Err(_) => return (StatusCode::NOT_ACCEPTABLE, "Not Acceptable\n").into_response(),
    };

    let proxy = system.spawn_fn(move |ctx| {
        Box::pin(async move {
            let outcome = match target.call(ctx, &method, message, timeout).await {
                Ok(reply) => Value::map([("message", reply)]),
                Err(ActorError::RemoteAttributeError(name)) => {
                    Value::map([("invalid_method", Value::from(name))])
                }
                Err(ActorError::Timeout) => Value::map([("timeout", Value::Null)]),
                Err(ActorError::RemoteException(detail)) => {
                    Value::map([("exception", detail)])
                }
                Err(other) => Value::map([(
                    "exception",
                    Value::map([("message", Value::from(other.to_string()))]),
                )]),
            };
            Ok(outcome)
        })
    });

    let outcome = match proxy.wait().await {
        Ok(outcome) => outcome,
        Err(error) => {
            debug!(%error, "remote call proxy failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error\n").into_response();
        }
    };

    let status = if outcome.get("message").is_some() {
        StatusCode::ACCEPTED
    } else if outcome.get("invalid_method").is_some() {
        StatusCode::NOT_FOUND
    } else if outcome.get("timeout").is_some() {
        StatusCode::REQUEST_TIMEOUT
    } else {
        StatusCode::NOT_ACCEPTABLE
    };
    let egress = state.system.config().base_url.clone();
    (status, Json(codec::to_json(&outcome, egress.as_ref()))).into_response()
}
