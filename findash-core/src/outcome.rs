//! Request vocabulary and dispatch outcomes
//!
//! Every exchange with the backend is described by an [`Operation`] plus a
//! relative path and parameters, and resolves to exactly one [`Outcome`].

use serde_json::Value;

/// The fixed vocabulary of request kinds understood by the dispatcher.
///
/// Each kind maps to an HTTP verb and a parameter-encoding rule:
///
/// | kind   | verb   | parameters           | body            |
/// |--------|--------|----------------------|-----------------|
/// | Read   | GET    | query string         | none            |
/// | Create | POST   | body                 | JSON            |
/// | Update | PUT    | body                 | JSON            |
/// | Delete | DELETE | body                 | JSON            |
/// | Login  | POST   | body                 | form-urlencoded |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
    /// Always POSTs with a form-urlencoded body, regardless of anything else.
    Login,
}

impl Operation {
    /// HTTP method for this operation
    pub fn method(&self) -> &'static str {
        match self {
            Operation::Read => "GET",
            Operation::Create | Operation::Login => "POST",
            Operation::Update => "PUT",
            Operation::Delete => "DELETE",
        }
    }

    /// Content-Type header value for operations that carry a body
    pub fn content_type(&self) -> &'static str {
        match self {
            Operation::Login => "application/x-www-form-urlencoded",
            _ => "application/json",
        }
    }

    /// Whether parameters go into the query string instead of the body
    pub fn query_encoded(&self) -> bool {
        matches!(self, Operation::Read)
    }
}

/// The single result every dispatch reduces to.
///
/// Exactly one `Outcome` is produced per dispatch. Callers match on it the
/// way the screens branched on their success/failure callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 2xx response; payload is the parsed JSON body, `None` for 204 or an
    /// unparseable body.
    Success(Option<Value>),
    /// 401 on a non-login exchange. The session has already been cleared and
    /// the user notified by the time this is returned.
    Unauthorized,
    /// Any other non-success status, with the parsed error body if there was
    /// one.
    ApplicationError(Option<Value>),
    /// The exchange never completed. Already surfaced to the user via the
    /// notice sink; never folded into the application-error path.
    TransportError(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Parsed payload, if the exchange completed with one
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Outcome::Success(p) | Outcome::ApplicationError(p) => p.as_ref(),
            _ => None,
        }
    }
}
