//! User and session types

use serde::{Deserialize, Serialize};

/// The authenticated session: an opaque bearer credential plus the display
/// name it was issued for. Presence of a session means the client considers
/// the user authenticated; absence means anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub username: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            username: username.into(),
        }
    }
}

/// Login response from `/api/user/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub username: String,
}

/// Response from `/api/user/check_login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCheck {
    pub username: String,
}

/// Signup request body for `/api/user/create`
///
/// The backend re-validates everything (password complexity, matching
/// password pair, email shape); the client sends the fields as entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegister {
    pub username: String,
    pub password1: String,
    pub password2: String,
    pub email: String,
}
