use std::sync::Mutex;

use time::OffsetDateTime;

pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// UTC wall clock that never steps backwards within the process.
#[derive(Debug)]
pub struct SystemClock {
    last: Mutex<OffsetDateTime>,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            last: Mutex::new(OffsetDateTime::UNIX_EPOCH),
        }
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        match self.last.lock() {
            Ok(mut last) => {
                if now > *last {
                    *last = now;
                }
                *last
            }
            // poisoned: plain wall clock
            Err(_) => now,
        }
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
