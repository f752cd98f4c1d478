//! User endpoints (`/api/user`)

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use findash_client::Dispatcher;
use findash_core::{FindashError, FindashResult, LoginCheck, Operation, Session, Token, UserRegister};

use crate::convert::{expect_json, expect_ok};

/// Signup, login, and session management
#[derive(Debug, Clone)]
pub struct UserApi {
    dispatcher: Arc<Dispatcher>,
}

impl UserApi {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Create a new user (`POST /api/user/create`, responds 204)
    pub async fn signup(&self, registration: &UserRegister) -> FindashResult<()> {
        let params = serde_json::to_value(registration)
            .map_err(|e| FindashError::parse(e.to_string()))?;
        expect_ok(
            self.dispatcher
                .dispatch(Operation::Create, "/api/user/create", &params)
                .await,
        )
    }

    /// Log in and store the returned session for subsequent dispatches
    pub async fn login(&self, username: &str, password: &str) -> FindashResult<Token> {
        let params = json!({ "username": username, "password": password });
        let token: Token = expect_json(
            self.dispatcher
                .dispatch(Operation::Login, "/api/user/login", &params)
                .await,
        )?;

        self.dispatcher
            .session()
            .set(Session::new(&token.access_token, &token.username));
        info!("Logged in as {}", token.username);
        Ok(token)
    }

    /// Ask the backend who the current token belongs to
    pub async fn check_login(&self) -> FindashResult<LoginCheck> {
        expect_json(
            self.dispatcher
                .dispatch(Operation::Read, "/api/user/check_login", &json!({}))
                .await,
        )
    }

    /// Drop the stored session. Client-side only; the token simply stops
    /// being attached.
    pub fn logout(&self) {
        self.dispatcher.session().clear();
        info!("Logged out");
    }
}
