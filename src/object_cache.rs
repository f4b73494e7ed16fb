//! Persistent cache for raw content store responses
//!
//! Every entry is one JSON file in the cache directory, named after its key.
//! Entries are never refreshed: once a key is on disk, the source is not
//! asked again. Delete the file (or the directory) to force a refetch.

use crate::error::{DeckError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::path::{Path, PathBuf};

/// What to do when persisting a freshly computed value fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteFailurePolicy {
    /// Log a warning and hand the value back anyway
    #[default]
    Log,
    /// Return the write error to the caller
    Propagate,
}

/// What to do with a computed value that serializes to JSON `null`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AbsentPolicy {
    /// Return it without touching the disk
    #[default]
    Skip,
    /// Write the literal `null`, so the absence is remembered across runs
    Persist,
}

/// Cache behaviour knobs
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheOptions {
    pub on_write_failure: WriteFailurePolicy,
    pub absent: AbsentPolicy,
}

/// File-backed memoization of async reads, keyed by string
pub struct ObjectCache {
    cache_dir: PathBuf,
    options: CacheOptions,
}

impl ObjectCache {
    /// Create a cache rooted at `cache_dir`, creating the directory if needed
    pub fn new(cache_dir: impl Into<PathBuf>, options: CacheOptions) -> Self {
        let cache_dir = cache_dir.into();

        if let Err(e) = std::fs::create_dir_all(&cache_dir) {
            log::warn!("Failed to create cache directory {:?}: {}", cache_dir, e);
        } else {
            log::debug!("Object cache directory: {:?}", cache_dir);
        }

        Self { cache_dir, options }
    }

    /// Directory holding the cache files
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get the full path for a cache key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Check if a key has a persisted entry
    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    /// Return the cached value for `key`, or run `compute` and persist its result.
    ///
    /// Unreadable or unparseable entries count as misses. Errors from
    /// `compute` are returned untouched and nothing is written.
    pub async fn get_or_compute<T, F, Fut>(&self, key: &str, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(value) = self.read(key).await {
            log::debug!("Cache hit for {}", key);
            return Ok(value);
        }

        log::info!("Cache miss for {}, fetching from source", key);
        let value = compute().await?;
        self.write(key, &value).await?;
        Ok(value)
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let body = tokio::fs::read(&path).await.ok()?;
        match serde_json::from_slice(&body) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring unreadable cache entry {:?}: {}", path, e);
                None
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.path_for(key);
        let outcome = match serde_json::to_vec(value) {
            Ok(json) if json == b"null" && self.options.absent == AbsentPolicy::Skip => {
                log::debug!("Not caching absent value for {}", key);
                return Ok(());
            }
            Ok(json) => tokio::fs::write(&path, json)
                .await
                .map_err(|e| DeckError::io(&path, e)),
            Err(e) => Err(DeckError::from(e)),
        };

        match outcome {
            Ok(()) => {
                log::debug!("Cached {}", key);
                Ok(())
            }
            Err(e) => match self.options.on_write_failure {
                WriteFailurePolicy::Log => {
                    log::warn!("Failed to cache {}: {}", key, e);
                    Ok(())
                }
                WriteFailurePolicy::Propagate => Err(e),
            },
        }
    }
}
