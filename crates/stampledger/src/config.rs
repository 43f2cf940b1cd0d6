//! Ledger configuration and time source.

use std::sync::atomic::{AtomicI64, Ordering};

/// Configuration for the [`Ledger`](crate::Ledger).
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Upper bound on records returned by a spec history walk.
    pub max_history_depth: usize,
    /// Scheme of the locator URI returned when a document is stored.
    pub locator_scheme: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_history_depth: 10_000,
            locator_scheme: "ipfs".to_string(),
        }
    }
}

impl LedgerConfig {
    /// `scheme://content_id` for a stored document.
    pub fn locator(&self, content_id: &str) -> String {
        format!("{}://{}", self.locator_scheme, content_id)
    }
}

/// Source of record timestamps, in Unix seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct FixedClock {
    at: AtomicI64,
}

impl FixedClock {
    pub fn new(at: i64) -> Self {
        Self {
            at: AtomicI64::new(at),
        }
    }

    pub fn set(&self, at: i64) {
        self.at.store(at, Ordering::SeqCst);
    }

    pub fn advance(&self, by: i64) {
        self.at.fetch_add(by, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.at.load(Ordering::SeqCst)
    }
}
