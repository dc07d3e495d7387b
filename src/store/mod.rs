//! Cookie jar storage
//!
//! The session manager never touches a global jar. It is handed a
//! [`CookieStore`] at construction, so tests can use an in-memory jar
//! while the CLI keeps cookies in a file between invocations.

mod file;
mod memory;

pub use file::FileCookieStore;
pub use memory::MemoryCookieStore;

use crate::error::Result;

/// Named string values in a persistent key-value jar
pub trait CookieStore: Send + Sync {
    /// Read a cookie, `None` when it is not set
    fn get(&self, name: &str) -> Result<Option<String>>;

    /// Write a cookie, replacing any previous value
    fn set(&self, name: &str, value: &str) -> Result<()>;

    /// Remove a cookie. Removing an absent cookie is not an error.
    fn delete(&self, name: &str) -> Result<()>;
}
