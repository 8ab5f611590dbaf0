//! Expiring key/value store backing the API clients
//!
//! Maps request URLs to raw response bodies. Every entry carries its
//! insertion time; a background task sweeps the map once per TTL period and
//! removes entries whose age exceeds the TTL. All map access goes through a
//! single shared lock, which is never held across a sleep.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, trace};

/// A single cached response body and its insertion time
#[derive(Debug, Clone)]
struct Entry {
    /// Raw response body as received from the network
    body: Vec<u8>,
    /// When the entry was inserted; refreshed only by a full overwrite
    created_at: Instant,
}

/// Lifecycle handle for the reclamation task, shared by all cache clones
#[derive(Debug)]
struct Reaper {
    /// Signals the reclamation loop to exit
    shutdown: watch::Sender<bool>,
    /// Handle to the running loop, taken by `shutdown`
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Reaper {
    fn drop(&mut self) {
        // The loop holds its own reference to the entries map, so it must
        // be stopped here or it would outlive the last cache handle.
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.get_mut().take() {
            handle.abort();
        }
    }
}

/// Thread-safe cache mapping request URLs to raw response bodies.
///
/// Cloning is cheap and clones share the same storage, so a single cache
/// can be handed to every API client that needs it. The cache never evicts
/// on size; entries leave the map only by overwrite or by the background
/// sweep once their age exceeds the TTL fixed at construction.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    /// URL-keyed storage, shared with the reclamation task
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    /// Maximum entry age before the reclamation task removes it
    ttl: Duration,
    /// Reclamation task lifecycle, shared across clones
    reaper: Arc<Reaper>,
}

impl ResponseCache {
    /// Creates an empty cache and starts its reclamation task.
    ///
    /// Must be called from within a Tokio runtime, since the reclamation
    /// task is spawned immediately.
    ///
    /// # Panics
    /// Panics if `ttl` is zero. A zero TTL would make every entry eligible
    /// for removal the moment it is inserted.
    pub fn new(ttl: Duration) -> Self {
        assert!(!ttl.is_zero(), "cache TTL must be a positive duration");

        let entries = Arc::new(RwLock::new(HashMap::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_reaper(Arc::clone(&entries), ttl, shutdown_rx);

        Self {
            entries,
            ttl,
            reaper: Arc::new(Reaper {
                shutdown: shutdown_tx,
                handle: Mutex::new(Some(handle)),
            }),
        }
    }

    /// Stores `body` under `key`, replacing any existing entry.
    ///
    /// An overwrite refreshes the insertion timestamp along with the body,
    /// so the replacement gets a full TTL of its own. The new entry is
    /// visible to every subsequent `get` as soon as this call returns.
    pub async fn put(&self, key: impl Into<String>, body: Vec<u8>) {
        let entry = Entry {
            body,
            created_at: Instant::now(),
        };
        self.entries.write().await.insert(key.into(), entry);
    }

    /// Returns the cached body for `key`, or `None` if no entry exists.
    ///
    /// Age is not checked on the read path: an entry whose TTL has lapsed
    /// is still returned until the reclamation task sweeps it. Callers see
    /// either the bytes as last stored or a miss, never a distinct
    /// "expired" result.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries
            .read()
            .await
            .get(key)
            .map(|entry| entry.body.clone())
    }

    /// Returns the number of entries currently held, including any whose
    /// TTL has lapsed but which have not been swept yet.
    #[allow(dead_code)]
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if the cache holds no entries.
    #[allow(dead_code)]
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// The TTL this cache was constructed with.
    #[allow(dead_code)]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stops the reclamation task and waits for it to exit.
    ///
    /// Entries already stored remain readable afterwards; they are simply
    /// no longer swept. Calling this more than once is a no-op. Dropping
    /// the last cache clone without calling this also stops the task.
    pub async fn shutdown(&self) {
        let _ = self.reaper.shutdown.send(true);
        if let Some(handle) = self.reaper.handle.lock().await.take() {
            let _ = handle.await;
        }
    }
}

/// Spawns the loop that periodically removes entries older than `ttl`.
///
/// Each cycle sleeps for a full TTL period with the lock released, then
/// takes the write lock for the duration of one sweep. Removal requires an
/// age strictly greater than `ttl`; an entry aged exactly `ttl` survives.
fn spawn_reaper(
    entries: Arc<RwLock<HashMap<String, Entry>>>,
    ttl: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(interval_ms = ttl.as_millis() as u64, "reclamation task started");
        loop {
            tokio::select! {
                _ = time::sleep(ttl) => {
                    let removed = {
                        let mut map = entries.write().await;
                        let before = map.len();
                        let now = Instant::now();
                        map.retain(|_, entry| now.duration_since(entry.created_at) <= ttl);
                        before - map.len()
                    };
                    if removed > 0 {
                        debug!(removed, "swept expired cache entries");
                    } else {
                        trace!("sweep found no expired entries");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        debug!("reclamation task stopped");
    })
}
