//! Cookie jar persisted as a JSON file

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::CookieStore;
use crate::error::Result;

type Cookies = BTreeMap<String, String>;

/// Cookie jar kept on disk so a session outlives the process.
///
/// The file is a flat JSON object of name to value. It is read on every
/// `get` and replaced on every `set`/`delete` by writing a sibling temp file
/// and renaming it over the jar. A missing file is an empty jar. A file
/// that does not parse is logged and treated as empty, and the next write
/// replaces it.
#[derive(Debug, Clone)]
pub struct FileCookieStore {
    path: PathBuf,
}

/// Jar contents plus whether the file on disk could not be parsed
struct Loaded {
    cookies: Cookies,
    corrupt: bool,
}

impl FileCookieStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Loaded> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Loaded {
                cookies: Cookies::new(),
                corrupt: false,
            });
        }

        match serde_json::from_str(&content) {
            Ok(cookies) => Ok(Loaded {
                cookies,
                corrupt: false,
            }),
            Err(e) => {
                tracing::warn!(
                    "Cookie jar {} is unreadable ({}), treating it as empty",
                    self.path.display(),
                    e
                );
                Ok(Loaded {
                    cookies: Cookies::new(),
                    corrupt: true,
                })
            }
        }
    }

    fn save(&self, cookies: &Cookies) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "cookies".into());
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        let content = serde_json::to_string_pretty(cookies)?;
        fs::write(&tmp_path, content)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

impl CookieStore for FileCookieStore {
    fn get(&self, name: &str) -> Result<Option<String>> {
        Ok(self.load()?.cookies.remove(name))
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        let mut jar = self.load()?;
        jar.cookies.insert(name.to_string(), value.to_string());
        tracing::debug!("Writing cookie '{}' to {}", name, self.path.display());
        self.save(&jar.cookies)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let mut jar = self.load()?;
        if jar.cookies.remove(name).is_none() && !jar.corrupt {
            return Ok(());
        }
        tracing::debug!("Deleting cookie '{}' from {}", name, self.path.display());
        self.save(&jar.cookies)
    }
}
