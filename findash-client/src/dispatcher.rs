//! Request dispatcher
//!
//! The single component mediating every request/response exchange with the
//! backend. Each dispatch builds one request from a [`RequestDescriptor`],
//! injects the bearer credential from the session store, sends it, and
//! reduces the response to exactly one [`Outcome`].
//!
//! There are no retries, timeouts, or cancellation in this layer: once a
//! dispatch starts, exactly one outcome occurs exactly once. Independent
//! dispatches race freely; nothing serializes them.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::debug;

use findash_core::{Operation, Outcome};

use crate::config::ClientConfig;
use crate::notice::{LogNotice, Notice};
use crate::session::{FileSessionStore, MemorySessionStore, SessionStore};
use crate::trace;

/// Description of a single exchange. Immutable once constructed; one
/// descriptor corresponds to one request/response pair.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub operation: Operation,
    /// Relative path, appended to the configured base address
    pub path: String,
    /// Parameters; placement (query vs body) follows the operation table
    pub params: Value,
    /// Whether to emit wire traces for this exchange
    pub debug: bool,
}

/// The shared request dispatcher
pub struct Dispatcher {
    http: Client,
    base_url: String,
    debug: bool,
    session: Arc<dyn SessionStore>,
    notice: Arc<dyn Notice>,
}

impl Dispatcher {
    pub fn new(
        config: &ClientConfig,
        session: Arc<dyn SessionStore>,
        notice: Arc<dyn Notice>,
    ) -> Self {
        // No timeout: a hung request blocks its caller indefinitely, matching
        // the layer's no-timeout contract.
        let http = Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.base_url.clone(),
            debug: config.debug,
            session,
            notice,
        }
    }

    /// Build a dispatcher with the default store and notice sink: the file
    /// store when a session file is configured (rehydrating any credential
    /// persisted by a prior run), the in-memory store otherwise.
    pub fn from_config(config: &ClientConfig) -> Self {
        let session: Arc<dyn SessionStore> = match &config.session_file {
            Some(path) => Arc::new(FileSessionStore::new(path)),
            None => Arc::new(MemorySessionStore::new()),
        };
        Self::new(config, session, Arc::new(LogNotice))
    }

    /// The session store this dispatcher reads on every send
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Base address requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Dispatch one exchange with the configured debug setting
    pub async fn dispatch(&self, operation: Operation, path: &str, params: &Value) -> Outcome {
        self.send(&RequestDescriptor {
            operation,
            path: path.to_string(),
            params: params.clone(),
            debug: self.debug,
        })
        .await
    }

    /// Dispatch one exchange described by `descriptor`
    pub async fn send(&self, descriptor: &RequestDescriptor) -> Outcome {
        let op = descriptor.operation;
        let mut url = format!("{}{}", self.base_url, descriptor.path);

        // Read operations carry all parameters in the query string
        if op.query_encoded() {
            let query = encode_pairs(&descriptor.params);
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }
        }

        let mut builder = self.http.request(method_of(op), url.as_str());

        // Non-read operations carry the parameters as the body
        if !op.query_encoded() {
            let body = match op {
                Operation::Login => {
                    serde_urlencoded::to_string(pairs_of(&descriptor.params)).unwrap_or_default()
                }
                _ => descriptor.params.to_string(),
            };
            builder = builder.header(CONTENT_TYPE, op.content_type()).body(body);
        }

        // Attach the bearer credential whenever one is held. This includes
        // the login call itself: a stale token from a prior session rides
        // along, preserving the source contract literally.
        if let Some(session) = self.session.get() {
            builder = builder.bearer_auth(&session.access_token);
        }

        let request = match builder.build() {
            Ok(request) => request,
            Err(e) => return self.transport_failure(e.to_string()),
        };

        if descriptor.debug {
            trace::request(&request);
        }

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(e) => return self.transport_failure(e.to_string()),
        };

        let status = response.status();
        let headers = response.headers().clone();

        // A body that fails to parse yields an absent payload, never an
        // error; the exchange still resolves on status alone.
        let body = response.text().await.unwrap_or_default();
        let payload = serde_json::from_str::<Value>(&body).ok();

        if descriptor.debug {
            trace::response(status, &headers, payload.as_ref());
        }

        if status.as_u16() == 204 {
            return Outcome::Success(None);
        }

        if status.is_success() {
            return Outcome::Success(payload);
        }

        if status.as_u16() == 401 && op != Operation::Login {
            debug!("401 on {} {}, invalidating session", op.method(), url);
            self.session.clear();
            self.notice.alert("Login required. Please sign in again.");
            return Outcome::Unauthorized;
        }

        Outcome::ApplicationError(payload)
    }

    /// Transport failures bypass the application-error path entirely: the
    /// user is notified directly and the caller sees only the detail.
    fn transport_failure(&self, detail: String) -> Outcome {
        self.notice.alert(&format!("Network Error: {}", detail));
        Outcome::TransportError(detail)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .finish()
    }
}

fn method_of(op: Operation) -> Method {
    match op {
        Operation::Read => Method::GET,
        Operation::Create | Operation::Login => Method::POST,
        Operation::Update => Method::PUT,
        Operation::Delete => Method::DELETE,
    }
}

/// Flatten a JSON object into string pairs for form/query encoding
fn pairs_of(params: &Value) -> Vec<(String, String)> {
    match params {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| {
                let rendered = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), rendered)
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn encode_pairs(params: &Value) -> String {
    serde_urlencoded::to_string(pairs_of(params)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_encoding_renders_scalars_bare() {
        let query = encode_pairs(&json!({"itm_no": "005930", "limit": 10}));
        assert_eq!(query, "itm_no=005930&limit=10");
    }

    #[test]
    fn query_encoding_escapes_reserved_characters() {
        let query = encode_pairs(&json!({"q": "a b&c"}));
        assert_eq!(query, "q=a+b%26c");
    }

    #[test]
    fn non_object_params_produce_no_pairs() {
        assert!(encode_pairs(&json!(null)).is_empty());
        assert!(encode_pairs(&json!([1, 2])).is_empty());
    }

    #[test]
    fn operation_verb_table() {
        assert_eq!(method_of(Operation::Read), Method::GET);
        assert_eq!(method_of(Operation::Create), Method::POST);
        assert_eq!(method_of(Operation::Update), Method::PUT);
        assert_eq!(method_of(Operation::Delete), Method::DELETE);
        // login is forced to POST regardless of anything requested
        assert_eq!(method_of(Operation::Login), Method::POST);
    }
}
