//! Session persistence
//!
//! The last authenticated identity is kept in one durable record under a
//! fixed key. It is the only source of session rehydration on restart.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use shared::Identity;

use crate::error::ClientResult;

/// Key of the persisted identity record
pub const SESSION_KEY: &str = "user";

/// Persistence port for the authenticated identity
pub trait SessionStorage: Send + Sync + fmt::Debug {
    /// Stored identity; `Ok(None)` when nothing is stored
    fn load(&self) -> ClientResult<Option<Identity>>;
    fn save(&self, identity: &Identity) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

// ============================================================================
// File backend
// ============================================================================

/// JSON file storage
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        let path = base_path.into().join(filename);
        Self { path }
    }

    /// `<dir>/user.json`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, &format!("{SESSION_KEY}.json"))
    }

    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> ClientResult<Option<Identity>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&self, identity: &Identity) -> ClientResult<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(identity)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

// ============================================================================
// In-memory backend
// ============================================================================

/// Process-local storage; holds the serialized record like the file backend
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with a raw record, valid or not
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().clone()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> ClientResult<Option<Identity>> {
        match self.slot.lock().as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, identity: &Identity) -> ClientResult<()> {
        let raw = serde_json::to_string(identity)?;
        *self.slot.lock() = Some(raw);
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.slot.lock() = None;
        Ok(())
    }
}
