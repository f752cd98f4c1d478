//! Outcome-to-result conversion shared by the endpoint wrappers

use serde::de::DeserializeOwned;
use serde_json::Value;

use findash_core::{FindashError, FindashResult, Outcome};

/// Reduce an outcome to the typed payload the endpoint promises
pub(crate) fn expect_json<T: DeserializeOwned>(outcome: Outcome) -> FindashResult<T> {
    match outcome {
        Outcome::Success(Some(payload)) => serde_json::from_value(payload)
            .map_err(|e| FindashError::parse(format!("Unexpected response shape: {}", e))),
        Outcome::Success(None) => Err(FindashError::parse("Empty response body")),
        other => Err(failure_of(other)),
    }
}

/// Reduce an outcome for endpoints with no meaningful payload (e.g. 204)
pub(crate) fn expect_ok(outcome: Outcome) -> FindashResult<()> {
    match outcome {
        Outcome::Success(_) => Ok(()),
        other => Err(failure_of(other)),
    }
}

fn failure_of(outcome: Outcome) -> FindashError {
    match outcome {
        Outcome::Unauthorized => FindashError::auth("Unauthorized"),
        Outcome::ApplicationError(payload) => FindashError::api(detail_of(payload)),
        Outcome::TransportError(detail) => FindashError::network(detail),
        Outcome::Success(_) => FindashError::api("not a failure"),
    }
}

/// Error message the backend put in the body: the `detail` field when there
/// is one, the raw payload otherwise.
fn detail_of(payload: Option<Value>) -> String {
    match payload {
        Some(value) => value
            .get("detail")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        None => "Unknown error".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use findash_core::Token;
    use serde_json::json;

    #[test]
    fn success_payload_decodes_into_the_typed_model() {
        let outcome = Outcome::Success(Some(json!({
            "access_token": "tok",
            "token_type": "bearer",
            "username": "alice",
        })));
        let token: Token = expect_json(outcome).unwrap();
        assert_eq!(token.access_token, "tok");
        assert_eq!(token.username, "alice");
    }

    #[test]
    fn empty_success_is_a_parse_error_for_typed_endpoints() {
        let err = expect_json::<Token>(Outcome::Success(None)).unwrap_err();
        assert!(matches!(err, FindashError::Parse(_)));
    }

    #[test]
    fn empty_success_is_fine_for_unit_endpoints() {
        assert!(expect_ok(Outcome::Success(None)).is_ok());
    }

    #[test]
    fn unauthorized_maps_to_an_auth_error() {
        let err = expect_ok(Outcome::Unauthorized).unwrap_err();
        assert!(matches!(err, FindashError::Auth(_)));
    }

    #[test]
    fn application_error_extracts_the_detail_field() {
        let outcome = Outcome::ApplicationError(Some(json!({ "detail": "no such account" })));
        let err = expect_ok(outcome).unwrap_err();
        assert_eq!(err.to_string(), "API error: no such account");
    }

    #[test]
    fn application_error_without_detail_keeps_the_raw_payload() {
        let outcome = Outcome::ApplicationError(Some(json!({ "code": 7 })));
        let err = expect_ok(outcome).unwrap_err();
        assert_eq!(err.to_string(), r#"API error: {"code":7}"#);
    }

    #[test]
    fn transport_error_maps_to_a_network_error() {
        let err = expect_ok(Outcome::TransportError("refused".into())).unwrap_err();
        assert!(matches!(err, FindashError::Network(_)));
    }
}
