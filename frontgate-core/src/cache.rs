//! In-memory file content cache.
//!
//! Maps a resolved file path to the bytes read on first access. The cache is
//! bounded by entry count and evicts the entry that was *inserted* longest
//! ago; hits never reorder entries, so this is FIFO rather than LRU. Entries
//! are never invalidated when the file changes on disk.
//!
//! Files are read outside the lock. Two concurrent misses for the same path
//! may both read the file; the first insertion wins and the second caller
//! receives the stored bytes.

use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{FrontGateError, Result};

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<PathBuf, Bytes>,
    insertion_order: VecDeque<PathBuf>,
}

/// Bounded path-to-bytes cache with insertion-order eviction.
///
/// Cloning is cheap and clones share state.
#[derive(Clone, Debug)]
pub struct ContentCache {
    capacity: usize,
    state: Arc<Mutex<CacheState>>,
}

impl ContentCache {
    /// Creates a cache holding at most `capacity` files.
    ///
    /// A capacity of zero disables caching: every call reads from disk.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// Maximum number of resident entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the content of `path`, reading it from disk on a miss.
    ///
    /// # Errors
    ///
    /// [`FrontGateError::FileNotFound`] if the file is missing or unreadable.
    /// Failures are not cached.
    pub async fn get_or_load(&self, path: &Path) -> Result<Bytes> {
        if let Some(content) = self.get(path).await {
            return Ok(content);
        }

        let content = match tokio::fs::read(path).await {
            Ok(content) => Bytes::from(content),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "Cache load failed");
                return Err(FrontGateError::FileNotFound(path.display().to_string()));
            }
        };

        Ok(self.insert(path.to_path_buf(), content).await)
    }

    /// Returns cached content without touching the filesystem.
    pub async fn get(&self, path: &Path) -> Option<Bytes> {
        self.state.lock().await.entries.get(path).cloned()
    }

    async fn insert(&self, path: PathBuf, content: Bytes) -> Bytes {
        if self.capacity == 0 {
            return content;
        }

        let mut state = self.state.lock().await;

        // Lost a race with another miss for the same path
        if let Some(existing) = state.entries.get(&path) {
            return existing.clone();
        }

        if state.entries.len() >= self.capacity
            && let Some(oldest) = state.insertion_order.pop_front()
        {
            state.entries.remove(&oldest);
            debug!(path = %oldest.display(), "Evicted cache entry");
        }

        state.insertion_order.push_back(path.clone());
        state.entries.insert(path, content.clone());
        content
    }

    /// Returns true if `path` is resident.
    pub async fn contains(&self, path: &Path) -> bool {
        self.state.lock().await.entries.contains_key(path)
    }

    /// Number of resident entries.
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    /// Returns true if nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
