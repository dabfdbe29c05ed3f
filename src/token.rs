//! Persisted authentication token.
//!
//! [`TokenStore`] holds the current [`Token`] as an observable value and
//! mirrors every change into a [`TokenStorage`] backend, so a session
//! survives process restarts. A derived "logged in" flag is published
//! alongside it.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use tokio::sync::watch;

use crate::client::types::Token;

/// Key the token is persisted under.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Durable key-value storage for the session token.
pub trait TokenStorage: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn store(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Stores entries as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read token file {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents)
            .with_context(|| format!("Token file {} is not valid JSON", self.path.display()))
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create token directory {}", parent.display())
                })?;
            }
        }
        let contents = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write token file {}", self.path.display()))
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        // A corrupt file is replaced rather than blocking the write.
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.read_entries().unwrap_or_default();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}

/// In-process storage. Clones share the same entries, so a second
/// [`TokenStore`] loaded from a clone sees what the first one persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Observable session token backed by durable storage.
///
/// Cloning yields another handle onto the same store.
#[derive(Clone)]
pub struct TokenStore {
    inner: Arc<TokenStoreInner>,
}

struct TokenStoreInner {
    storage: Box<dyn TokenStorage>,
    token: watch::Sender<Option<Token>>,
    logged_in: watch::Sender<bool>,
}

impl TokenStore {
    /// Creates a store whose initial value is whatever `storage` holds.
    ///
    /// Unreadable storage is logged and treated as "no token".
    pub fn load(storage: impl TokenStorage + 'static) -> Self {
        let initial = match storage.load(TOKEN_STORAGE_KEY) {
            Ok(value) => value.map(Token::new),
            Err(e) => {
                tracing::warn!("Could not load persisted token: {:#}", e);
                None
            }
        };
        if let Some(token) = &initial {
            tracing::debug!("Loaded persisted token: {}", token.preview());
        }

        let logged_in = initial.is_some();
        let (token, _) = watch::channel(initial);
        let (logged_in, _) = watch::channel(logged_in);

        Self {
            inner: Arc::new(TokenStoreInner {
                storage: Box::new(storage),
                token,
                logged_in,
            }),
        }
    }

    pub fn get(&self) -> Option<Token> {
        self.inner.token.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        *self.inner.logged_in.borrow()
    }

    /// Replaces the token, mirroring the change into storage before
    /// subscribers are notified.
    pub fn set(&self, token: Option<Token>) {
        let persisted = match &token {
            Some(token) => self.inner.storage.store(TOKEN_STORAGE_KEY, token.as_str()),
            None => self.inner.storage.remove(TOKEN_STORAGE_KEY),
        };
        if let Err(e) = persisted {
            tracing::warn!("Could not persist token change: {:#}", e);
        }

        let logged_in = token.is_some();
        self.inner.token.send_replace(token);
        self.inner.logged_in.send_replace(logged_in);
    }

    pub fn login(&self, token: Token) {
        tracing::info!("Storing session token {}", token.preview());
        self.set(Some(token));
    }

    pub fn logout(&self) {
        tracing::info!("Clearing session token");
        self.set(None);
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Token>> {
        self.inner.token.subscribe()
    }

    pub fn subscribe_logged_in(&self) -> watch::Receiver<bool> {
        self.inner.logged_in.subscribe()
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("logged_in", &self.is_logged_in())
            .finish_non_exhaustive()
    }
}
