//! Request/response wire shapes and the calling side.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use uuid::Uuid;

// Layer 3: Internal module imports
use crate::actor::ActorContext;
use crate::address::Address;
use crate::message::Value;
use crate::shape::Pattern;
use crate::system::ActorError;

/// Shape of a call request:
/// `{"call": <id>, "method": <name>, "address": <reply-to>, "message": <payload>}`.
///
/// Servers receive with this pattern and must answer every match.
pub fn call_pattern() -> Pattern {
    Pattern::map([
        ("call", Pattern::String),
        ("method", Pattern::String),
        ("address", Pattern::Address),
        ("message", Pattern::Any),
    ])
}

/// Shape of a successful reply to the call with id `call_id`.
pub fn response_pattern(call_id: &str) -> Pattern {
    Pattern::map([("response", Pattern::eq(call_id)), ("message", Pattern::Any)])
}

/// Shape of a handler-failure reply to the call with id `call_id`.
pub fn exception_pattern(call_id: &str) -> Pattern {
    Pattern::map([
        ("response", Pattern::eq(call_id)),
        ("exception", Pattern::Any),
    ])
}

/// Shape of an unknown-method reply to the call with id `call_id`.
pub fn invalid_method_pattern(call_id: &str) -> Pattern {
    Pattern::map([
        ("response", Pattern::eq(call_id)),
        ("invalid_method", Pattern::String),
    ])
}

/// Perform a call from the actor behind `ctx` to a local `target`.
///
/// A reply that arrives after the timeout has fired is not consumed here; it
/// stays in the caller's mailbox, matching no pending pattern.
pub(crate) async fn call(
    ctx: &mut ActorContext,
    target: &Address,
    method: &str,
    message: Value,
    timeout: Option<Duration>,
) -> Result<Value, ActorError> {
    let call_id = Uuid::new_v4().to_string();
    let request = Value::map([
        ("call", Value::from(call_id.as_str())),
        ("method", Value::from(method)),
        ("address", Value::Address(ctx.address())),
        ("message", message),
    ]);
    target.cast(request).await?;

    let patterns = [
        response_pattern(&call_id),
        exception_pattern(&call_id),
        invalid_method_pattern(&call_id),
    ];
    let (index, reply) = match timeout {
        Some(limit) => ctx
            .receive_timeout(&patterns, limit)
            .await
            .ok_or(ActorError::Timeout)?,
        None => ctx.receive(&patterns).await,
    };

    match index {
        0 => Ok(reply.get("message").cloned().unwrap_or(Value::Null)),
        1 => Err(ActorError::RemoteException(
            reply.get("exception").cloned().unwrap_or(Value::Null),
        )),
        _ => Err(ActorError::RemoteAttributeError(
            reply
                .get("invalid_method")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
        )),
    }
}

/// Reply to `origin` with a successful payload.
pub async fn respond(origin: &Value, payload: Value) -> Result<(), ActorError> {
    let (reply_to, call_id) = parse_call(origin)?;
    reply_to
        .cast(Value::map([
            ("response", Value::from(call_id)),
            ("message", payload),
        ]))
        .await
}

/// Reply to `origin` naming a method the server does not provide.
pub async fn respond_invalid_method(origin: &Value, method: &str) -> Result<(), ActorError> {
    let (reply_to, call_id) = parse_call(origin)?;
    reply_to
        .cast(Value::map([
            ("response", Value::from(call_id)),
            ("invalid_method", Value::from(method)),
        ]))
        .await
}

/// Reply to `origin` with a handler failure, formatted as a message tree.
pub async fn respond_exception(origin: &Value, detail: Value) -> Result<(), ActorError> {
    let (reply_to, call_id) = parse_call(origin)?;
    reply_to
        .cast(Value::map([
            ("response", Value::from(call_id)),
            ("exception", detail),
        ]))
        .await
}

fn parse_call(origin: &Value) -> Result<(Address, String), ActorError> {
    if !call_pattern().matches(origin) {
        return Err(ActorError::InvalidCallMessage);
    }
    // Shape-checked above; both fields are present and well-typed.
    let reply_to = origin
        .get("address")
        .and_then(Value::as_address)
        .cloned()
        .ok_or(ActorError::InvalidCallMessage)?;
    let call_id = origin
        .get("call")
        .and_then(Value::as_str)
        .ok_or(ActorError::InvalidCallMessage)?
        .to_owned();
    Ok((reply_to, call_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_pattern_requires_all_fields() {
        let almost = Value::map([
            ("call", Value::from("id-1")),
            ("method", Value::from("foo")),
            ("message", Value::Null),
        ]);
        assert!(!call_pattern().matches(&almost));
    }

    #[test]
    fn test_reply_patterns_are_disjoint_per_id() {
        let reply = Value::map([
            ("response", Value::from("id-1")),
            ("message", Value::from("payload")),
        ]);
        assert!(response_pattern("id-1").matches(&reply));
        assert!(!response_pattern("id-2").matches(&reply));
        assert!(!exception_pattern("id-1").matches(&reply));
        assert!(!invalid_method_pattern("id-1").matches(&reply));
    }

    #[test]
    fn test_invalid_method_reply_shape() {
        let reply = Value::map([
            ("response", Value::from("id-1")),
            ("invalid_method", Value::from("frobnicate")),
        ]);
        assert!(invalid_method_pattern("id-1").matches(&reply));
        assert!(!response_pattern("id-1").matches(&reply));
    }

    #[tokio::test]
    async fn test_respond_rejects_non_call_messages() {
        let not_a_call = Value::map([("hello", Value::from("there"))]);
        let outcome = respond(&not_a_call, Value::Null).await;
        assert!(matches!(outcome, Err(ActorError::InvalidCallMessage)));
    }
}
