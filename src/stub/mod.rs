//! Development authentication endpoint
//!
//! Issues signed tokens in the shape the session manager expects, for
//! local development and tests. It is not meant to guard anything real.

pub mod issuer;
pub mod routes;
pub mod server;

pub use issuer::{issue_token, verify_token, IssuedClaims};
pub use server::*;
