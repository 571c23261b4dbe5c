//! Durable single-value stores.
//!
//! The credential and the clean-text override both live behind [`TextStore`]
//! and are handed to their call sites explicitly.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ScriptResult;

/// A slot holding at most one string.
pub trait TextStore {
    /// Reads the stored value, `None` when nothing is stored.
    fn get(&self) -> ScriptResult<Option<String>>;

    /// Replaces the stored value.
    fn set(&mut self, value: &str) -> ScriptResult<()>;

    /// Removes the stored value. Clearing an empty slot is not an error.
    fn clear(&mut self) -> ScriptResult<()>;
}

impl<S: TextStore + ?Sized> TextStore for &mut S {
    fn get(&self) -> ScriptResult<Option<String>> {
        (**self).get()
    }

    fn set(&mut self, value: &str) -> ScriptResult<()> {
        (**self).set(value)
    }

    fn clear(&mut self) -> ScriptResult<()> {
        (**self).clear()
    }
}

/// In-memory store, for tests and one-shot sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    value: Option<String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Start with a value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl TextStore for MemoryStore {
    fn get(&self) -> ScriptResult<Option<String>> {
        Ok(self.value.clone())
    }

    fn set(&mut self, value: &str) -> ScriptResult<()> {
        self.value = Some(value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> ScriptResult<()> {
        self.value = None;
        Ok(())
    }
}

/// Store backed by one file; a missing file means "nothing stored".
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store at `path`. Nothing is touched until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextStore for FileStore {
    fn get(&self) -> ScriptResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, value: &str) -> ScriptResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, value)?;
        Ok(())
    }

    fn clear(&mut self) -> ScriptResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Masks an API key for display: first 8 and last 4 characters.
pub fn mask_secret(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() <= 12 {
        return "********".to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
