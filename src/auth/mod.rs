//! Authentication and session management

pub mod client;
pub mod models;
pub mod session;
pub mod token;

pub use client::{AuthApi, HttpAuthApi};
pub use models::{is_admin, Credentials, Session, TokenResponse, ADMIN_ROLE};
pub use session::{SessionManager, JWT_COOKIE, ROLES_COOKIE, USERNAME_COOKIE};
pub use token::{decode_unverified_claims, Claims, RoleClaim};
