//! Token decoding, authorization and session manager tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use authjar::auth::{
    decode_unverified_claims, is_admin, AuthApi, Credentials, Session, SessionManager,
    TokenResponse, JWT_COOKIE, ROLES_COOKIE, USERNAME_COOKIE,
};
use authjar::error::{Error, Result};
use authjar::{CookieStore, MemoryCookieStore};

const ALICE_ADMIN: &str =
    "h.eyJzdWIiOiJhbGljZSIsInJvbGVzIjpbeyJhdXRob3JpdHkiOiJST0xFX0FETUlOIn1dfQ.s";
const BOB_USER: &str =
    "h.eyJzdWIiOiJib2IiLCJyb2xlcyI6W3siYXV0aG9yaXR5IjoiUk9MRV9VU0VSIn1dfQ.s";
const FRANK_COMMA_ROLE: &str =
    "h.eyJzdWIiOiJmcmFuayIsInJvbGVzIjpbeyJhdXRob3JpdHkiOiJST0xFX0EsQiJ9XX0.s";

/// Answers every request the same way and counts calls
struct ScriptedApi {
    outcome: std::result::Result<Option<String>, String>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedApi {
    fn token(jwt: &str) -> Self {
        Self {
            outcome: Ok(Some(jwt.to_string())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn empty() -> Self {
        Self {
            outcome: Ok(None),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl AuthApi for ScriptedApi {
    async fn request_token(&self, _credentials: &Credentials) -> Result<TokenResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(jwt) => Ok(TokenResponse { jwt: jwt.clone() }),
            Err(message) => Err(Error::Network(message.clone())),
        }
    }
}

#[test]
fn test_decode_admin_token() {
    let user = decode_unverified_claims(ALICE_ADMIN)
        .expect("Failed to decode token")
        .to_user()
        .expect("Failed to extract user");

    assert_eq!(user, Session::new("alice", vec!["ROLE_ADMIN".to_string()]));
    assert!(is_admin(Some(&user)));
}

#[test]
fn test_decode_single_segment_is_malformed() {
    assert!(matches!(
        decode_unverified_claims("abc"),
        Err(Error::MalformedToken(_))
    ));
}

#[test]
fn test_decode_payload_that_is_not_json() {
    // payload decodes to {"sub":"alice","roles":[{authority":"ROLE_ADMIN"}]}, a quote short
    let token = "h.eyJzdWIiOiJhbGljZSIsInJvbGVzIjpbe2F1dGhvcml0eSI6IlJPTEVfQURNSU4ifV19.s";
    assert!(matches!(
        decode_unverified_claims(token),
        Err(Error::MalformedToken(_))
    ));
}

#[test]
fn test_decode_accepts_padded_payload() {
    let token = "h.eyJzdWIiOiJkYXZlIn0=.s";
    let claims = decode_unverified_claims(token).expect("Failed to decode token");
    assert_eq!(claims.sub.as_deref(), Some("dave"));
}

#[test]
fn test_is_admin_cases() {
    assert!(!is_admin(None));
    assert!(!is_admin(Some(&Session::new("x", vec![]))));
    assert!(is_admin(Some(&Session::new(
        "x",
        vec!["ROLE_ADMIN".to_string(), "ROLE_USER".to_string()]
    ))));
    assert!(!is_admin(Some(&Session::new(
        "x",
        vec!["ROLE_USER".to_string()]
    ))));
}

#[tokio::test]
async fn test_login_then_logout() {
    let store = MemoryCookieStore::new();
    let manager = SessionManager::new(store.clone(), ScriptedApi::token(BOB_USER));

    let session = manager.authenticate("bob", "pw").await.expect("Login failed");
    assert_eq!(session, Session::new("bob", vec!["ROLE_USER".to_string()]));
    assert_eq!(store.len(), 3);
    assert_eq!(manager.current_token().unwrap().as_deref(), Some(BOB_USER));

    manager.clear_session().expect("Failed to clear session");
    assert!(store.is_empty());
    assert_eq!(manager.current_session().unwrap(), None);

    // Clearing twice is fine
    manager.clear_session().expect("Failed to clear session twice");
}

#[tokio::test]
async fn test_network_failure_surfaces_message() {
    let store = MemoryCookieStore::new();
    let api = ScriptedApi::failing("connection refused");
    let calls = Arc::clone(&api.calls);
    let manager = SessionManager::new(store.clone(), api);

    match manager.authenticate("bob", "pw").await {
        Err(Error::Network(message)) => assert_eq!(message, "connection refused"),
        other => panic!("expected network failure, got {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_response_without_token_is_rejected() {
    let store = MemoryCookieStore::new();
    let manager = SessionManager::new(store.clone(), ScriptedApi::empty());

    let result = manager.authenticate("bob", "pw").await;
    assert!(matches!(result, Err(Error::AuthenticationRejected)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_comma_in_role_is_rejected_before_writing() {
    let store = MemoryCookieStore::new();
    let manager = SessionManager::new(store.clone(), ScriptedApi::token(FRANK_COMMA_ROLE));

    match manager.authenticate("frank", "pw").await {
        Err(Error::InvalidRole(role)) => assert_eq!(role, "ROLE_A,B"),
        other => panic!("expected invalid role, got {:?}", other),
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_failed_login_keeps_previous_session() {
    let store = MemoryCookieStore::new();
    let first = SessionManager::new(store.clone(), ScriptedApi::token(ALICE_ADMIN));
    first.authenticate("alice", "pw").await.expect("Login failed");

    let second = SessionManager::new(store.clone(), ScriptedApi::token("abc"));
    assert!(second.authenticate("bob", "pw").await.is_err());

    let session = second.current_session().unwrap().expect("Session lost");
    assert_eq!(session.username, "alice");
}

#[tokio::test]
async fn test_last_login_wins() {
    let store = MemoryCookieStore::new();
    let alice = SessionManager::new(store.clone(), ScriptedApi::token(ALICE_ADMIN));
    let bob = SessionManager::new(store.clone(), ScriptedApi::token(BOB_USER));

    alice.authenticate("alice", "pw").await.expect("Login failed");
    bob.authenticate("bob", "pw").await.expect("Login failed");

    let session = alice.current_session().unwrap().expect("No session");
    assert_eq!(session.username, "bob");
    assert!(!session.is_admin());
}

#[test]
fn test_partial_cookies_are_no_session() {
    let store = MemoryCookieStore::new();
    store.set(USERNAME_COOKIE, "bob").unwrap();
    store.set(JWT_COOKIE, BOB_USER).unwrap();
    let manager = SessionManager::new(store.clone(), ScriptedApi::empty());
    assert_eq!(manager.current_session().unwrap(), None);

    store.delete(USERNAME_COOKIE).unwrap();
    store.set(ROLES_COOKIE, "ROLE_USER").unwrap();
    assert_eq!(manager.current_session().unwrap(), None);
}

#[test]
fn test_session_read_back_from_cookies() {
    let store = MemoryCookieStore::new();
    store.set(USERNAME_COOKIE, "carol").unwrap();
    store.set(ROLES_COOKIE, "ROLE_USER,ROLE_ADMIN").unwrap();
    let manager = SessionManager::new(store, ScriptedApi::empty());

    let session = manager.current_session().unwrap().expect("No session");
    assert_eq!(session.roles, vec!["ROLE_USER", "ROLE_ADMIN"]);
    assert!(is_admin(Some(&session)));
}
