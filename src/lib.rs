//! authjar - client-side token sessions kept in a cookie jar
//!
//! Logs a user in against a remote `/authenticate` endpoint, keeps the
//! returned token and identity in an injected cookie store, and answers
//! who is logged in and whether they are an admin.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod store;
pub mod stub;

pub use auth::{is_admin, Session, SessionManager};
pub use config::Config;
pub use error::Error;
pub use store::{CookieStore, FileCookieStore, MemoryCookieStore};
