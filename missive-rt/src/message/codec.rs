//! Wire codec for message values.
//!
//! Messages travel as JSON bytes, both on the HTTP wire and between local
//! actors: a cast encodes the value and decodes it again on delivery, so the
//! recipient always owns a private copy. Two reserved single-key objects
//! carry the non-JSON leaves:
//!
//! - `{"_pyact_address": <id-or-url>}`: an actor address. Decoding resolves
//!   a bare id through the registry and turns an `http(s)` URL into a remote
//!   address; when the URL points at this system's own base URL the prefix
//!   is stripped and the id resolved locally.
//! - `{"_pyact_binary": <base64>}`: an opaque byte blob.
//!
//! Any other object, including a single-key object with an unrecognized
//! reserved-looking tag, decodes as an ordinary mapping.

// Layer 1: Standard library imports
use std::collections::BTreeMap;

// Layer 2: Third-party crate imports
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;
use url::Url;

// Layer 3: Internal module imports
use super::value::Value;
use crate::address::{Address, LocalAddress};
use crate::system::ActorSystem;
use crate::util::ActorId;

/// Reserved object key marking an encoded actor address.
pub const ADDRESS_TAG: &str = "_pyact_address";

/// Reserved object key marking an encoded binary blob.
pub const BINARY_TAG: &str = "_pyact_binary";

/// Key of the request-id field in a remote call body, as POSTed to and
/// served by an HTTP bridge.
pub const REMOTE_CALL_TAG: &str = "remotecall";

/// Errors arising while encoding or decoding message payloads.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The payload is not valid JSON.
    #[error("invalid message payload: {0}")]
    Json(#[from] serde_json::Error),

    /// An encoded address names an actor this system does not know.
    #[error("message refers to unknown actor {0}")]
    UnknownActor(ActorId),

    /// An encoded binary blob is not valid base64.
    #[error("invalid binary payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Serialize a value to JSON bytes.
///
/// With `egress` set, local addresses are rewritten to absolute URLs under
/// that base, so a peer on the other end of the wire can route back to them.
/// Without it they encode as bare ids, which is what local delivery uses.
pub fn encode(value: &Value, egress: Option<&Url>) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(&to_json(value, egress))?)
}

/// Deserialize JSON bytes back into a value, resolving addresses through
/// `system`.
pub fn decode(bytes: &[u8], system: &ActorSystem) -> Result<Value, CodecError> {
    from_json(serde_json::from_slice(bytes)?, system)
}

/// Lower a value into a plain JSON tree.
pub fn to_json(value: &Value, egress: Option<&Url>) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(flag) => serde_json::Value::Bool(*flag),
        Value::Int(n) => serde_json::Value::from(*n),
        Value::Float(x) => serde_json::Number::from_f64(*x)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Str(s) => serde_json::Value::String(s.clone()),
        Value::Seq(items) => {
            serde_json::Value::Array(items.iter().map(|item| to_json(item, egress)).collect())
        }
        Value::Map(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), to_json(item, egress)))
                .collect(),
        ),
        Value::Address(address) => {
            let mut object = serde_json::Map::with_capacity(1);
            object.insert(
                ADDRESS_TAG.to_owned(),
                serde_json::Value::String(address_text(address, egress)),
            );
            serde_json::Value::Object(object)
        }
        Value::Binary(blob) => {
            let mut object = serde_json::Map::with_capacity(1);
            object.insert(
                BINARY_TAG.to_owned(),
                serde_json::Value::String(BASE64.encode(blob)),
            );
            serde_json::Value::Object(object)
        }
    }
}

/// Raise a plain JSON tree into a value, reconstructing tagged leaves.
pub fn from_json(json: serde_json::Value, system: &ActorSystem) -> Result<Value, CodecError> {
    match json {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(flag) => Ok(Value::Bool(flag)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else {
                Ok(Value::Float(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        serde_json::Value::String(s) => Ok(Value::Str(s)),
        serde_json::Value::Array(items) => Ok(Value::Seq(
            items
                .into_iter()
                .map(|item| from_json(item, system))
                .collect::<Result<_, _>>()?,
        )),
        serde_json::Value::Object(object) => {
            if object.len() == 1 {
                // Reserved single-key encodings. A tagged object whose
                // payload is not a string stays an ordinary mapping.
                if let Some(serde_json::Value::String(raw)) = object.get(ADDRESS_TAG) {
                    return Ok(Value::Address(resolve_address(raw, system)?));
                }
                if let Some(serde_json::Value::String(raw)) = object.get(BINARY_TAG) {
                    return Ok(Value::Binary(Bytes::from(BASE64.decode(raw)?)));
                }
            }
            let mut entries = BTreeMap::new();
            for (key, item) in object {
                entries.insert(key, from_json(item, system)?);
            }
            Ok(Value::Map(entries))
        }
    }
}

fn address_text(address: &Address, egress: Option<&Url>) -> String {
    match address {
        Address::Local(local) => {
            let id = local.id();
            match egress.and_then(|base| base.join(id.as_str()).ok()) {
                Some(absolute) => absolute.to_string(),
                None => id.to_string(),
            }
        }
        Address::Remote(remote) => remote.url().to_string(),
    }
}

fn resolve_address(raw: &str, system: &ActorSystem) -> Result<Address, CodecError> {
    if let Ok(url) = Url::parse(raw) {
        if matches!(url.scheme(), "http" | "https") {
            match system.strip_local_prefix(&url) {
                Some(id) => return lookup_local(id, system),
                None => return Ok(system.remote_address(url)),
            }
        }
    }
    lookup_local(ActorId::from(raw), system)
}

fn lookup_local(id: ActorId, system: &ActorSystem) -> Result<Address, CodecError> {
    system
        .registry()
        .lookup(&id)
        .map(|cell| Address::Local(LocalAddress::new(cell)))
        .ok_or(CodecError::UnknownActor(id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::system::SystemConfig;

    fn quiet_system() -> ActorSystem {
        ActorSystem::new(SystemConfig::default())
    }

    #[tokio::test]
    async fn test_plain_tree_round_trip() {
        let system = quiet_system();
        let value = Value::map([
            ("n", Value::from(3)),
            ("x", Value::from(1.5)),
            ("flag", Value::from(true)),
            ("items", Value::seq([Value::Null, Value::from("s")])),
        ]);

        let bytes = encode(&value, None).unwrap();
        let back = decode(&bytes, &system).unwrap();
        assert_eq!(back, value);
    }

    #[tokio::test]
    async fn test_binary_round_trip() {
        let system = quiet_system();
        let value = Value::Binary(Bytes::from_static(b"\x00\x01binary\xff"));

        let bytes = encode(&value, None).unwrap();
        assert!(String::from_utf8(bytes.clone()).unwrap().contains(BINARY_TAG));

        let back = decode(&bytes, &system).unwrap();
        assert_eq!(back, value);
    }

    #[tokio::test]
    async fn test_unknown_reserved_tag_stays_a_mapping() {
        let system = quiet_system();
        let bytes = br#"{"_pyact_future": "f-1"}"#;

        let back = decode(bytes, &system).unwrap();
        assert_eq!(
            back,
            Value::map([("_pyact_future", Value::from("f-1"))])
        );
    }

    #[tokio::test]
    async fn test_tagged_object_with_non_string_payload_stays_a_mapping() {
        let system = quiet_system();
        let bytes = br#"{"_pyact_binary": 42}"#;

        let back = decode(bytes, &system).unwrap();
        assert_eq!(back, Value::map([(BINARY_TAG, Value::from(42))]));
    }

    #[tokio::test]
    async fn test_two_key_object_with_tag_stays_a_mapping() {
        let system = quiet_system();
        let bytes = br#"{"_pyact_address": "a", "extra": null}"#;

        let back = decode(bytes, &system).unwrap();
        assert_eq!(
            back,
            Value::map([(ADDRESS_TAG, Value::from("a")), ("extra", Value::Null)])
        );
    }

    #[tokio::test]
    async fn test_invalid_json_is_an_error() {
        let system = quiet_system();
        assert!(matches!(
            decode(b"{not json", &system),
            Err(CodecError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_actor_id_is_an_error() {
        let system = quiet_system();
        let bytes = br#"{"_pyact_address": "nobody-home"}"#;

        match decode(bytes, &system) {
            Err(CodecError::UnknownActor(id)) => assert_eq!(id.as_str(), "nobody-home"),
            other => panic!("expected UnknownActor, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_remote_url_decodes_without_registry_lookup() {
        let system = quiet_system();
        let bytes = br#"{"_pyact_address": "http://peer.example:9000/worker-1"}"#;

        let back = decode(bytes, &system).unwrap();
        match back {
            Value::Address(Address::Remote(remote)) => {
                assert_eq!(remote.url().as_str(), "http://peer.example:9000/worker-1");
            }
            other => panic!("expected a remote address, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_local_address_round_trip() {
        let system = quiet_system();
        // Park an actor so its registry entry stays live for the lookup.
        let address = system.spawn_fn(|ctx| {
            Box::pin(async move {
                ctx.receive(&[crate::shape::Pattern::eq("never-sent")]).await;
                Ok(Value::Null)
            })
        });

        let bytes = encode(&Value::Address(address.clone()), None).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains(ADDRESS_TAG));
        assert!(text.contains(address.id().as_str()));

        // Same process, same actor: the decoded address is equal to the
        // original.
        let back = decode(&bytes, &system).unwrap();
        assert_eq!(back, Value::Address(address.clone()));

        address.kill().await.unwrap();
    }

    #[tokio::test]
    async fn test_float_without_exact_representation() {
        let system = quiet_system();
        let bytes = encode(&Value::from(0.1), None).unwrap();
        assert_eq!(decode(&bytes, &system).unwrap(), Value::Float(0.1));
    }
}
