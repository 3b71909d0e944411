use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use shared::models::VoteOption;

use crate::store::{StoreError, VoteLedgerStore, VoteQueueStore};

const OFFLINE: &str = "in-memory store switched offline";

/// Process-local queue store with a reachability switch.
#[derive(Debug)]
pub struct InMemoryQueue {
    entries: Mutex<Vec<Vec<u8>>>,
    online: AtomicBool,
}

impl Default for InMemoryQueue {
    fn default() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            online: AtomicBool::new(true),
        }
    }
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Vec<u8>>,
    {
        Self {
            entries: Mutex::new(entries.into_iter().map(Into::into).collect()),
            online: AtomicBool::new(true),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unreachable(OFFLINE.into()))
        }
    }
}

#[rocket::async_trait]
impl VoteQueueStore for InMemoryQueue {
    async fn append(&self, payload: &[u8]) -> Result<(), StoreError> {
        self.check_online()?;
        self.entries
            .lock()
            .map_err(|e| StoreError::Command(e.to_string()))?
            .push(payload.to_vec());
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Vec<u8>>, StoreError> {
        self.check_online()?;
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .map_err(|e| StoreError::Command(e.to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}

/// Process-local ledger holding grouped counts directly.
#[derive(Debug)]
pub struct InMemoryLedger {
    counts: Mutex<HashMap<VoteOption, i64>>,
    online: AtomicBool,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self {
            counts: Mutex::new(HashMap::new()),
            online: AtomicBool::new(true),
        }
    }
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counts(counts: impl IntoIterator<Item = (VoteOption, i64)>) -> Self {
        Self {
            counts: Mutex::new(counts.into_iter().collect()),
            online: AtomicBool::new(true),
        }
    }

    pub fn offline() -> Self {
        let ledger = Self::default();
        ledger.set_online(false);
        ledger
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unreachable(OFFLINE.into()))
        }
    }
}

#[rocket::async_trait]
impl VoteLedgerStore for InMemoryLedger {
    async fn count_by_option(&self) -> Result<HashMap<VoteOption, i64>, StoreError> {
        self.check_online()?;
        self.counts
            .lock()
            .map(|counts| counts.clone())
            .map_err(|e| StoreError::Command(e.to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}
