//! Authentication models

use serde::{Deserialize, Serialize};

/// Role name that grants elevated access
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// The currently authenticated user as seen by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Username, taken from the token subject
    pub username: String,
    /// Role names, taken from the token's role authorities
    pub roles: Vec<String>,
}

impl Session {
    pub fn new(username: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            username: username.into(),
            roles,
        }
    }

    /// Check if the session carries the given role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check if the session has admin rights
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}

/// Check if the given session, if any, has admin rights
pub fn is_admin(session: Option<&Session>) -> bool {
    session.is_some_and(Session::is_admin)
}

/// Login credentials sent to the authentication endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Body returned by the authentication endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed token, absent when the endpoint did not authenticate us
    #[serde(default)]
    pub jwt: Option<String>,
}
