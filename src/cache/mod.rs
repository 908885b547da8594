//! Time-bounded cache of parsed match records.
//!
//! Readers share an immutable [`Snapshot`] behind an `Arc`. When the snapshot
//! is missing or older than the TTL, one caller reloads it from the
//! [`MatchSource`] while the others wait on the refresh gate and then reuse
//! the outcome of that load, success or failure.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::models::MatchRecord;
use crate::source::{MatchSource, SourceError};

/// Default time-to-live of a loaded snapshot.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Cache errors.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to refresh match data: {0}")]
    Refresh(#[source] Arc<SourceError>),
}

impl From<SourceError> for CacheError {
    fn from(err: SourceError) -> Self {
        CacheError::Refresh(Arc::new(err))
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// One published load of the data file.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub matches: Vec<MatchRecord>,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn fetched_at_epoch_millis(&self) -> i64 {
        self.fetched_at.timestamp_millis()
    }

    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match (now - self.fetched_at).to_std() {
            Ok(age) => age < ttl,
            // Clock went backwards; treat the snapshot as just loaded
            Err(_) => true,
        }
    }
}

/// Outcome of the most recent load, guarded by the refresh gate.
#[derive(Debug, Default)]
struct LastAttempt {
    failure: Option<Arc<SourceError>>,
}

/// Match cache with single-flight refresh.
pub struct MatchCache {
    source: Arc<dyn MatchSource>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    current: RwLock<Option<Arc<Snapshot>>>,
    refresh: Mutex<LastAttempt>,
    /// Number of finished loads, bumped while holding `refresh`
    attempts: AtomicU64,
}

impl MatchCache {
    pub fn new(source: Arc<dyn MatchSource>, ttl: Duration) -> Self {
        Self::with_clock(source, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(source: Arc<dyn MatchSource>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            ttl,
            current: RwLock::new(None),
            refresh: Mutex::new(LastAttempt::default()),
            attempts: AtomicU64::new(0),
        }
    }

    /// Current snapshot, reloading first if it is missing or expired.
    ///
    /// A failed reload returns the error and keeps the previous snapshot.
    /// Callers that queued behind a failed load get the same error without
    /// loading again; the next caller to arrive afterwards retries.
    pub async fn get_matches(&self) -> Result<Arc<Snapshot>, CacheError> {
        if let Some(snapshot) = self.fresh_snapshot().await {
            return Ok(snapshot);
        }

        let seen = self.attempts.load(Ordering::SeqCst);
        let mut last = self.refresh.lock().await;

        // Another caller may have reloaded while we waited
        if let Some(snapshot) = self.fresh_snapshot().await {
            debug!("Match cache refreshed by another caller");
            return Ok(snapshot);
        }
        if self.attempts.load(Ordering::SeqCst) != seen {
            if let Some(failure) = &last.failure {
                debug!("Reusing failed refresh from another caller");
                return Err(CacheError::Refresh(Arc::clone(failure)));
            }
        }

        let loaded = self.source.load().await;
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let matches = match loaded {
            Ok(matches) => {
                last.failure = None;
                matches
            }
            Err(e) => {
                warn!("Match cache refresh failed: {}", e);
                let failure = Arc::new(e);
                last.failure = Some(Arc::clone(&failure));
                return Err(CacheError::Refresh(failure));
            }
        };

        let snapshot = Arc::new(Snapshot {
            matches,
            fetched_at: self.clock.now(),
        });
        *self.current.write().await = Some(Arc::clone(&snapshot));
        info!(
            matches = snapshot.matches.len(),
            fetched_at = %snapshot.fetched_at,
            "Match cache refreshed"
        );

        Ok(snapshot)
    }

    /// Last published snapshot, fresh or not, without reloading.
    pub async fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current.read().await.clone()
    }

    /// Drop the published snapshot so the next read reloads.
    pub async fn invalidate(&self) {
        *self.current.write().await = None;
    }

    async fn fresh_snapshot(&self) -> Option<Arc<Snapshot>> {
        let current = self.current.read().await;
        let now = self.clock.now();
        current
            .as_ref()
            .filter(|s| s.is_fresh(now, self.ttl))
            .cloned()
    }
}

impl std::fmt::Debug for MatchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchCache").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}
