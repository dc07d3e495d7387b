//! Session management

use crate::auth::client::AuthApi;
use crate::auth::models::{Credentials, Session};
use crate::auth::token::decode_unverified_claims;
use crate::error::{Error, Result};
use crate::store::CookieStore;

/// Cookie holding the raw token
pub const JWT_COOKIE: &str = "jwt";
/// Cookie holding the username
pub const USERNAME_COOKIE: &str = "current_username";
/// Cookie holding the comma-joined role names
pub const ROLES_COOKIE: &str = "current_user_roles";

const ROLE_DELIMITER: char = ',';

/// Logs users in and out, keeping the session in a cookie jar.
///
/// The manager holds no session state of its own: a user is authenticated
/// exactly when the identity cookies are present in the store.
pub struct SessionManager<S, A> {
    store: S,
    api: A,
}

impl<S: CookieStore, A: AuthApi> SessionManager<S, A> {
    /// Create a new session manager
    pub fn new(store: S, api: A) -> Self {
        Self { store, api }
    }

    /// Exchange credentials for a token and store the resulting session.
    ///
    /// Nothing is written until the token has decoded into a valid session.
    /// Store failures part-way through are not rolled back.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        let credentials = Credentials::new(username, password);

        let response = self.api.request_token(&credentials).await.map_err(|e| {
            tracing::warn!("Authentication request for '{}' failed: {}", username, e);
            Error::Network(e.to_string())
        })?;

        let Some(jwt) = response.jwt else {
            tracing::warn!("Authentication response for '{}' had no token", username);
            return Err(Error::AuthenticationRejected);
        };

        let session = decode_unverified_claims(&jwt)?.to_user()?;
        let roles = join_roles(&session.roles)?;

        self.store.set(JWT_COOKIE, &jwt)?;
        self.store.set(USERNAME_COOKIE, &session.username)?;
        self.store.set(ROLES_COOKIE, &roles)?;

        tracing::info!(
            "Authenticated '{}' with roles [{}]",
            session.username,
            roles
        );
        Ok(session)
    }

    /// Get the currently authenticated session, if any
    pub fn current_session(&self) -> Result<Option<Session>> {
        let username = self.store.get(USERNAME_COOKIE)?;
        let roles = self.store.get(ROLES_COOKIE)?;

        match (username, roles) {
            (Some(username), Some(roles)) if !username.is_empty() && !roles.is_empty() => {
                Ok(Some(Session::new(username, split_roles(&roles))))
            }
            _ => Ok(None),
        }
    }

    /// Raw token of the current login, if any
    pub fn current_token(&self) -> Result<Option<String>> {
        self.store.get(JWT_COOKIE)
    }

    /// Delete every cookie belonging to the session
    pub fn clear_session(&self) -> Result<()> {
        self.store.delete(JWT_COOKIE)?;
        self.store.delete(USERNAME_COOKIE)?;
        self.store.delete(ROLES_COOKIE)?;
        tracing::info!("Session cleared");
        Ok(())
    }
}

/// Join role names for storage, rejecting names that would not split back
pub fn join_roles(roles: &[String]) -> Result<String> {
    if let Some(bad) = roles.iter().find(|r| r.contains(ROLE_DELIMITER)) {
        return Err(Error::InvalidRole(bad.clone()));
    }
    Ok(roles.join(","))
}

/// Split a stored role list back into names
pub fn split_roles(roles: &str) -> Vec<String> {
    if roles.is_empty() {
        return Vec::new();
    }
    roles.split(ROLE_DELIMITER).map(str::to_string).collect()
}
