//! Per-key async mutual exclusion
//!
//! Every load-modify-store sequence on an entity runs while holding the lock
//! for that entity's key, so two requests touching the same pull request are
//! serialized while unrelated ones proceed in parallel. Only protects a
//! single process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockTable = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

/// Table of async mutexes keyed by entity id
#[derive(Debug, Clone, Default)]
pub struct KeyedLocks {
    table: LockTable,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`
    pub async fn lock(&self, key: impl Into<String>) -> KeyGuard {
        let key = key.into();
        let entry = {
            let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
            prune(&mut table);
            table.entry(key.clone()).or_default().clone()
        };
        let guard = entry.lock_owned().await;
        KeyGuard {
            guard: Some(guard),
            key,
            table: self.table.clone(),
        }
    }

    /// Number of keys currently locked or waited on
    pub fn len(&self) -> usize {
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        prune(&mut table);
        table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drop entries nobody holds or waits on
///
/// A waiter cancelled after the holder released never reaches
/// `KeyGuard::drop`, so its entry is only reclaimed here.
fn prune(table: &mut HashMap<String, Arc<AsyncMutex<()>>>) {
    table.retain(|_, entry| Arc::strong_count(entry) > 1);
}

/// Held while a key is locked; releases the key on drop
#[derive(Debug)]
pub struct KeyGuard {
    guard: Option<OwnedMutexGuard<()>>,
    key: String,
    table: LockTable,
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        // only the table itself still references an uncontended entry
        if table
            .get(&self.key)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            table.remove(&self.key);
        }
    }
}
