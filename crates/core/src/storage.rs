//! Token store over the durable and session-scoped storage areas
//!
//! The storefront keeps its session in two key/value areas: a durable one that
//! survives restarts ("remember me") and a session-scoped one that is dropped
//! with the process. [`TokenStore`] is the only place that decides which area a
//! field lives in and how the two are read together.

use crate::error::{CoreError, CoreResult};
use crate::session::{Session, SessionSnapshot, StorageKey};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{debug, warn};

/// A string key/value persistence area
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> CoreResult<()>;
    fn remove(&self, key: &str) -> CoreResult<()>;
    fn clear(&self) -> CoreResult<()>;
}

/// Process-lifetime storage, used as the session-scoped area
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }

    fn clear(&self) -> CoreResult<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }
}

/// JSON file backed storage, used as the durable area
///
/// The whole map is rewritten on every mutation; the session holds a handful of
/// short strings.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, loading existing entries if the file exists
    pub fn open(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), entries = entries.len(), "Opened durable store");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content).map_err(|e| {
            warn!(path = %self.path.display(), "Failed to write durable store: {e}");
            CoreError::from(e)
        })
    }

    fn mutate(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> CoreResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut updated = entries.clone();
        f(&mut updated);
        // Memory only changes once the file does
        self.persist(&updated)?;
        *entries = updated;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }

    fn clear(&self) -> CoreResult<()> {
        self.mutate(BTreeMap::clear)
    }
}

/// Which of the two areas holds a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageArea {
    Durable,
    Session,
}

impl StorageArea {
    pub fn is_durable(self) -> bool {
        self == StorageArea::Durable
    }
}

struct Inner {
    durable: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

/// Shared handle to the two session storage areas
#[derive(Clone)]
pub struct TokenStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("authenticated", &self.snapshot().is_authenticated())
            .finish()
    }
}

impl TokenStore {
    pub fn new(durable: impl KeyValueStore + 'static, session: impl KeyValueStore + 'static) -> Self {
        let (snapshot_tx, _) = watch::channel(SessionSnapshot::default());
        let store = Self {
            inner: Arc::new(Inner {
                durable: Box::new(durable),
                session: Box::new(session),
                snapshot_tx,
            }),
        };
        store.publish();
        store
    }

    /// Store with both areas held in memory
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), MemoryStore::new())
    }

    fn area(&self, area: StorageArea) -> &dyn KeyValueStore {
        match area {
            StorageArea::Durable => self.inner.durable.as_ref(),
            StorageArea::Session => self.inner.session.as_ref(),
        }
    }

    /// Read a key from a single area, ignoring the other one
    pub fn read_area(&self, area: StorageArea, key: StorageKey) -> Option<String> {
        self.area(area)
            .get(key.as_str())
            .filter(|value| !value.is_empty())
    }

    /// Area that currently provides `key`, durable first
    pub fn area_of(&self, key: StorageKey) -> Option<StorageArea> {
        [StorageArea::Durable, StorageArea::Session]
            .into_iter()
            .find(|area| self.read_area(*area, key).is_some())
    }

    /// Durable value if present, else session-scoped value
    pub fn read(&self, key: StorageKey) -> Option<String> {
        self.area_of(key)
            .and_then(|area| self.read_area(area, key))
    }

    /// Write `key` to exactly one area
    pub fn write(&self, key: StorageKey, value: &str, durable: bool) -> CoreResult<()> {
        let area = if durable {
            StorageArea::Durable
        } else {
            StorageArea::Session
        };
        self.area(area).set(key.as_str(), value)?;
        self.publish();
        Ok(())
    }

    /// Remove `key` from both areas
    pub fn remove(&self, key: StorageKey) -> CoreResult<()> {
        let durable = self.inner.durable.remove(key.as_str());
        let session = self.inner.session.remove(key.as_str());
        self.publish();
        durable.and(session)
    }

    /// Empty both areas entirely
    pub fn clear(&self) -> CoreResult<()> {
        let durable = self.inner.durable.clear();
        let session = self.inner.session.clear();
        self.publish();
        debug!("Cleared session storage");
        durable.and(session)
    }

    pub fn access_token(&self) -> Option<String> {
        self.read(StorageKey::AccessToken)
    }

    /// Persist a freshly authenticated session
    ///
    /// Both areas are cleared first so only one authoritative copy exists.
    pub fn save_session(&self, session: &Session) -> CoreResult<()> {
        self.clear()?;
        let durable = session.remember_me;
        let area = if durable {
            StorageArea::Durable
        } else {
            StorageArea::Session
        };
        let store = self.area(area);
        store.set(StorageKey::AccessToken.as_str(), &session.access_token)?;
        store.set(StorageKey::UserRole.as_str(), session.role.as_str())?;
        store.set(StorageKey::UserEmail.as_str(), &session.email)?;
        store.set(StorageKey::UserName.as_str(), &session.name)?;
        self.publish();
        Ok(())
    }

    /// Current view of the stored session
    pub fn snapshot(&self) -> SessionSnapshot {
        let role = self.read(StorageKey::UserRole).and_then(|raw| match raw.parse() {
            Ok(role) => Some(role),
            Err(e) => {
                debug!("Ignoring stored role: {e}");
                None
            }
        });

        SessionSnapshot {
            access_token: self.read(StorageKey::AccessToken),
            role,
            email: self.read(StorageKey::UserEmail),
            name: self.read(StorageKey::UserName),
        }
    }

    /// Receive a new snapshot every time the stored session changes
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        self.inner.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}
