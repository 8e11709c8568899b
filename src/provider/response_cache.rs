//! Gzip-compressed on-disk cache of successful response bodies, keyed by URL.

use crate::provider::client_config::CacheExpiry;
use crate::provider::error::ProviderError;
use async_compression::tokio::bufread::GzipDecoder;
use async_compression::tokio::write::GzipEncoder;
use log::{debug, info};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::{fs, task};

const CACHE_FILE_PREFIX: &str = "archive-";
const CACHE_FILE_SUFFIX: &str = ".json.gz";

pub struct ResponseCache {
    cache_dir: PathBuf,
    expiry: CacheExpiry,
}

impl ResponseCache {
    pub fn new(cache_dir: &Path, expiry: CacheExpiry) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
            expiry,
        }
    }

    /// File an entry for `url` is stored in.
    pub fn entry_path(&self, url: &str) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        url.hash(&mut hasher);
        self.cache_dir.join(format!(
            "{}{:016x}{}",
            CACHE_FILE_PREFIX,
            hasher.finish(),
            CACHE_FILE_SUFFIX
        ))
    }

    /// Returns the cached body for `url`, or `None` on a miss or an expired entry.
    pub async fn get(&self, url: &str) -> Result<Option<Vec<u8>>, ProviderError> {
        let path = self.entry_path(url);
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Cache miss for {}", url);
                return Ok(None);
            }
            Err(e) => return Err(ProviderError::CacheRead(path, e)),
        };

        if let CacheExpiry::After(max_age) = self.expiry {
            // An mtime in the future (clock skew) counts as fresh.
            let age = metadata
                .modified()
                .map_err(|e| ProviderError::CacheRead(path.clone(), e))?
                .elapsed()
                .unwrap_or_default();
            if age > max_age {
                info!("Cache entry for {} expired ({:?} old)", url, age);
                return Ok(None);
            }
        }

        let file = fs::File::open(&path)
            .await
            .map_err(|e| ProviderError::CacheRead(path.clone(), e))?;
        let mut decoder = GzipDecoder::new(BufReader::new(file));
        let mut body = Vec::new();
        decoder
            .read_to_end(&mut body)
            .await
            .map_err(|e| ProviderError::CacheRead(path.clone(), e))?;
        info!("Cache hit for {} at {:?}", url, path);
        Ok(Some(body))
    }

    /// Stores `body` as the entry for `url`, replacing any previous entry atomically.
    pub async fn put(&self, url: &str, body: &[u8]) -> Result<(), ProviderError> {
        let path = self.entry_path(url);
        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| ProviderError::CacheDirCreation(self.cache_dir.clone(), e))?;

        let mut encoder = GzipEncoder::new(Vec::new());
        encoder
            .write_all(body)
            .await
            .map_err(|e| ProviderError::CacheWrite(path.clone(), e))?;
        encoder
            .shutdown()
            .await
            .map_err(|e| ProviderError::CacheWrite(path.clone(), e))?;
        let compressed = encoder.into_inner();

        let cache_dir = self.cache_dir.clone();
        let target = path.clone();
        task::spawn_blocking(move || {
            let mut temp_file = NamedTempFile::new_in(&cache_dir)
                .map_err(|e| ProviderError::CacheWrite(target.clone(), e))?;
            temp_file
                .write_all(&compressed)
                .map_err(|e| ProviderError::CacheWrite(target.clone(), e))?;
            temp_file
                .persist(&target)
                .map_err(|e| ProviderError::CacheWrite(target.clone(), e.error))?;
            Ok::<(), ProviderError>(())
        })
        .await??;

        debug!("Cached response for {} to {:?}", url, path);
        Ok(())
    }
}
