//! Addresses of actors behind an HTTP bridge.

// Layer 1: Standard library imports
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

// Layer 2: Third-party crate imports
use reqwest::StatusCode;
use url::Url;
use uuid::Uuid;

// Layer 3: Internal module imports
use crate::message::codec::{self, REMOTE_CALL_TAG};
use crate::message::Value;
use crate::system::{ActorError, ActorSystem};

/// A handle to an actor served by a peer's HTTP bridge.
///
/// Each operation maps to one HTTP request against the actor's URL: cast is
/// a POST of the encoded message, call is a POST of a `remotecall` body
/// answered through the HTTP status, kill is a DELETE. `wait` and `link`
/// are not available remotely.
///
/// Equality and hashing follow the URL; the embedded HTTP client and egress
/// base are plumbing.
#[derive(Clone)]
pub struct RemoteAddress {
    url: Url,
    client: reqwest::Client,
    egress: Option<Url>,
}

impl RemoteAddress {
    pub(crate) fn new(url: Url, client: reqwest::Client, egress: Option<Url>) -> Self {
        Self {
            url,
            client,
            egress,
        }
    }

    /// The actor's URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The actor's id: remotely, the URL itself.
    pub fn id(&self) -> crate::util::ActorId {
        crate::util::ActorId::from(self.url.as_str())
    }

    /// Fire-and-forget send over HTTP POST. A 2xx status means the peer
    /// accepted the message; 404 means the actor is gone.
    pub async fn cast(&self, message: &Value) -> Result<(), ActorError> {
        let body = codec::encode(message, self.egress.as_ref())?;
        let response = self
            .client
            .post(self.url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|error| ActorError::Transport(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status == StatusCode::NOT_FOUND {
            Err(ActorError::DeadActor)
        } else if status == StatusCode::NOT_ACCEPTABLE {
            Err(ActorError::Protocol("peer rejected message".to_owned()))
        } else {
            Err(ActorError::Transport(format!(
                "unexpected status {status} from {url}",
                url = self.url
            )))
        }
    }

    /// Correlated request/response over HTTP.
    ///
    /// The request carries a fresh id, the method name, the encoded payload
    /// and the timeout; the reply kind is the HTTP status: 202 success,
    /// 404 invalid method, 406 handler exception, 408 timeout. The timeout
    /// is enforced on both ends.
    pub async fn call(
        &self,
        system: &ActorSystem,
        method: &str,
        message: Value,
        timeout: Option<Duration>,
    ) -> Result<Value, ActorError> {
        let request = self.call_request(method, &message, timeout)?;
        let exchange = self.exchange(request, system);
        match timeout {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .map_err(|_| ActorError::Timeout)?,
            None => exchange.await,
        }
    }

    fn call_request(
        &self,
        method: &str,
        message: &Value,
        timeout: Option<Duration>,
    ) -> Result<Vec<u8>, ActorError> {
        let deadline = timeout
            .and_then(|limit| serde_json::Number::from_f64(limit.as_secs_f64()))
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null);

        let mut body = serde_json::Map::new();
        body.insert(
            REMOTE_CALL_TAG.to_owned(),
            serde_json::Value::String(Uuid::new_v4().to_string()),
        );
        body.insert(
            "method".to_owned(),
            serde_json::Value::String(method.to_owned()),
        );
        body.insert(
            "message".to_owned(),
            codec::to_json(message, self.egress.as_ref()),
        );
        body.insert("timeout".to_owned(), deadline);

        serde_json::to_vec(&serde_json::Value::Object(body))
            .map_err(|error| ActorError::Protocol(error.to_string()))
    }

    async fn exchange(&self, request: Vec<u8>, system: &ActorSystem) -> Result<Value, ActorError> {
        let response = self
            .client
            .post(self.url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(request)
            .send()
            .await
            .map_err(|error| ActorError::Transport(error.to_string()))?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|error| ActorError::Transport(error.to_string()))?;

        if status == StatusCode::ACCEPTED {
            let payload = body
                .get("message")
                .cloned()
                .unwrap_or(serde_json::Value::Null);
            Ok(codec::from_json(payload, system)?)
        } else if status == StatusCode::NOT_FOUND {
            let method = body
                .get("invalid_method")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default();
            Err(ActorError::RemoteAttributeError(method.to_owned()))
        } else if status == StatusCode::NOT_ACCEPTABLE {
            let detail = body
                .get("exception")
                .cloned()
                .unwrap_or(serde_json::Value::Null);
            Err(ActorError::RemoteException(codec::from_json(detail, system)?))
        } else if status == StatusCode::REQUEST_TIMEOUT {
            Err(ActorError::Timeout)
        } else {
            Err(ActorError::Transport(format!(
                "unexpected status {status} from {url}",
                url = self.url
            )))
        }
    }

    /// Terminate the remote actor via HTTP DELETE.
    pub async fn kill(&self) -> Result<(), ActorError> {
        let response = self
            .client
            .delete(self.url.clone())
            .send()
            .await
            .map_err(|error| ActorError::Transport(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status == StatusCode::NOT_FOUND {
            Err(ActorError::DeadActor)
        } else {
            Err(ActorError::Transport(format!(
                "unexpected status {status} from {url}",
                url = self.url
            )))
        }
    }
}

impl PartialEq for RemoteAddress {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for RemoteAddress {}

impl Hash for RemoteAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

impl fmt::Debug for RemoteAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RemoteAddress").field(&self.url.as_str()).finish()
    }
}
