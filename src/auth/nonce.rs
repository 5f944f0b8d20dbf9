//! Nonce management for Yobit trading API authentication.
//!
//! Yobit requires every signed request to carry a nonce strictly greater than
//! any nonce previously sent with the same key. The counter starts at 1 and is
//! only ever incremented, so it has to survive process restarts: by default the
//! last issued value is persisted in a small record per key.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::auth::credentials::key_prefix;
use crate::error::YobitError;

/// Trait for providing nonces for authenticated requests.
pub trait NonceProvider: Send + Sync {
    /// Issue the next nonce for `api_key`.
    ///
    /// The returned value must be greater than any value previously returned for
    /// the same key, and must already be durable when this returns.
    fn next_nonce(&self, api_key: &str) -> Result<u64, YobitError>;
}

/// Minimal key/value capability backing a [`StoredNonce`].
pub trait NonceStorage: Send + Sync {
    /// Read a record. A missing record is `Ok(None)`, not an error.
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    /// Durably replace a record.
    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()>;

    /// Lock shared by every storage over the same backing location.
    ///
    /// Backends returning `None` get a lock private to their [`StoredNonce`].
    fn shared_lock(&self) -> Option<Arc<Mutex<()>>> {
        None
    }
}

/// Name of the nonce record for an API key: `nonce.<first 8 key chars>.txt`.
pub fn record_name(api_key: &str) -> String {
    format!("nonce.{}.txt", key_prefix(api_key))
}

/// Stores each record as a file in a directory.
///
/// Writes go to a uniquely named temporary sibling first and are renamed into
/// place, so a crash never leaves a truncated record behind. Every storage on
/// the same directory in this process shares one lock.
#[derive(Debug, Clone)]
pub struct FileNonceStorage {
    dir: PathBuf,
}

impl FileNonceStorage {
    /// Store records in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the records.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl NonceStorage for FileNonceStorage {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

        let path = self.path(key);
        let tmp = self.path(&format!(
            "{key}.{}.{}.tmp",
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        let result = replace_file(&tmp, &path, bytes);
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    fn shared_lock(&self) -> Option<Arc<Mutex<()>>> {
        static DIR_LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();

        let dir = fs::canonicalize(&self.dir).unwrap_or_else(|_| self.dir.clone());
        let mut locks = DIR_LOCKS
            .get_or_init(Default::default)
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Some(locks.entry(dir).or_default().clone())
    }
}

fn replace_file(tmp: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(tmp)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp, path)
}

/// Keeps records in memory only.
#[derive(Debug, Default)]
pub struct MemoryNonceStorage {
    records: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryNonceStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NonceStorage for MemoryNonceStorage {
    fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// A counter per API key, kept in a [`NonceStorage`].
///
/// Each call reads the last value (0 when the record does not exist), adds one,
/// writes the new value back and only then returns it. The whole
/// read-increment-write runs under a lock, so concurrent callers never see the
/// same value.
pub struct StoredNonce<S> {
    storage: S,
    lock: Arc<Mutex<()>>,
}

impl StoredNonce<FileNonceStorage> {
    /// Persist nonces as files in `dir`.
    ///
    /// Separate stores pointing at the same directory still increment
    /// linearizably within the process.
    pub fn persistent(dir: impl Into<PathBuf>) -> Self {
        Self::new(FileNonceStorage::new(dir))
    }
}

impl StoredNonce<MemoryNonceStorage> {
    /// Keep nonces in memory only; every instance starts from zero.
    pub fn ephemeral() -> Self {
        Self::new(MemoryNonceStorage::new())
    }
}

impl<S: NonceStorage> StoredNonce<S> {
    /// Wrap a storage backend, adopting its shared lock if it has one.
    pub fn new(storage: S) -> Self {
        let lock = storage.shared_lock().unwrap_or_default();
        Self { storage, lock }
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn last_value(&self, record: &str) -> Result<u64, YobitError> {
        let bytes = match self.storage.read(record) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Ok(0),
            Err(e) => return Err(YobitError::storage(record, e)),
        };

        std::str::from_utf8(&bytes)
            .ok()
            .and_then(|text| text.trim().parse::<u64>().ok())
            .ok_or_else(|| {
                YobitError::storage(
                    record,
                    io::Error::new(io::ErrorKind::InvalidData, "nonce record is not a decimal integer"),
                )
            })
    }
}

impl<S: NonceStorage> NonceProvider for StoredNonce<S> {
    fn next_nonce(&self, api_key: &str) -> Result<u64, YobitError> {
        let record = record_name(api_key);
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let next = self.last_value(&record)?.checked_add(1).ok_or_else(|| {
            YobitError::storage(
                &record,
                io::Error::new(io::ErrorKind::InvalidData, "nonce counter exhausted"),
            )
        })?;

        if let Err(e) = self.storage.write(&record, next.to_string().as_bytes()) {
            tracing::warn!(record = %record, error = %e, "Failed to persist nonce");
            return Err(YobitError::storage(record, e));
        }

        tracing::debug!(record = %record, nonce = next, "Issued nonce");
        Ok(next)
    }
}

impl<S> std::fmt::Debug for StoredNonce<S>
where
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredNonce")
            .field("storage", &self.storage)
            .finish()
    }
}

/// How a client obtains nonces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonceMode {
    /// Persist the counter as a file in `dir`.
    Persistent {
        /// Directory holding the nonce records.
        dir: PathBuf,
    },
    /// Keep the counter in memory. Useful for tests, or for parallel instances
    /// that must not share a file.
    Ephemeral,
}

impl Default for NonceMode {
    fn default() -> Self {
        NonceMode::Persistent {
            dir: PathBuf::from("."),
        }
    }
}

impl NonceMode {
    /// Build the matching provider.
    pub fn into_provider(self) -> Arc<dyn NonceProvider> {
        match self {
            NonceMode::Persistent { dir } => Arc::new(StoredNonce::persistent(dir)),
            NonceMode::Ephemeral => Arc::new(StoredNonce::ephemeral()),
        }
    }
}
