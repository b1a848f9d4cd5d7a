//! Response caches keyed by [`cache_key`](crate::core::signer::cache_key).
//!
//! Values are the exact response bodies received from the server. Entries never expire;
//! they live until the backend is dropped (or, for [`FileCache`], the file is removed).

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::core::FmError;

/// A key -> response-body store.
///
/// `contains` must agree with `get`. Implementations are shared behind an `Arc` by the
/// network, so they guard their own state; concurrent callers see a consistent map but
/// no cross-call atomicity is promised.
pub trait CacheBackend: Send + Sync + std::fmt::Debug {
    /// Whether a body is stored under `key`.
    fn contains(&self, key: &str) -> bool;

    /// The body stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `body` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if a persistent backend fails to write.
    fn put(&self, key: &str, body: &str) -> Result<(), FmError>;

    /// All stored keys, in no particular order.
    fn keys(&self) -> Vec<String>;
}

/// The ephemeral backend used when caching is enabled without a location.
#[derive(Debug, Default)]
pub struct MemoryCache {
    map: RwLock<HashMap<String, String>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheBackend for MemoryCache {
    fn contains(&self, key: &str) -> bool {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, body: &str) -> Result<(), FmError> {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), body.to_string());
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

/// A named on-disk store: one JSON object mapping keys to bodies.
///
/// The file is loaded when opened and rewritten on every `put`.
#[derive(Debug)]
pub struct FileCache {
    path: PathBuf,
    map: RwLock<HashMap<String, String>>,
}

impl FileCache {
    /// Opens the store at `path`, creating it lazily on the first `put`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a JSON object of strings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FmError> {
        let path = path.as_ref().to_path_buf();
        let map = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => HashMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            map: RwLock::new(map),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CacheBackend for FileCache {
    fn contains(&self, key: &str) -> bool {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Rewrites the store through a sibling temp file renamed over the original, so an
    /// interrupted write leaves the previous contents intact.
    fn put(&self, key: &str, body: &str) -> Result<(), FmError> {
        let mut guard = self.map.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(key.to_string(), body.to_string());
        let text = serde_json::to_vec(&*guard)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(&text)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}
