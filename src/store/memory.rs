//! In-memory cookie jar

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::CookieStore;
use crate::error::{Error, Result};

/// Process-local cookie jar. Clones share the same cookies.
#[derive(Debug, Clone, Default)]
pub struct MemoryCookieStore {
    cookies: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryCookieStore {
    /// Create an empty jar
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cookies currently set
    pub fn len(&self) -> usize {
        self.cookies.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::Store("cookie jar lock poisoned".to_string())
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Result<Option<String>> {
        let cookies = self.cookies.read().map_err(poisoned)?;
        Ok(cookies.get(name).cloned())
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        let mut cookies = self.cookies.write().map_err(poisoned)?;
        cookies.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        let mut cookies = self.cookies.write().map_err(poisoned)?;
        cookies.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let store = MemoryCookieStore::new();
        store.set("jwt", "a.b.c").unwrap();
        assert_eq!(store.get("jwt").unwrap().as_deref(), Some("a.b.c"));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = MemoryCookieStore::new();
        store.set("jwt", "a.b.c").unwrap();
        store.delete("jwt").unwrap();
        store.delete("jwt").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_cookies() {
        let store = MemoryCookieStore::new();
        let other = store.clone();
        other.set("current_username", "alice").unwrap();
        assert_eq!(
            store.get("current_username").unwrap().as_deref(),
            Some("alice")
        );
    }
}
