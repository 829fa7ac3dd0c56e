//! The refresh lifecycle: fire an initial fetch, then re-fetch on a fixed
//! timer, publishing every outcome through a watch channel.
//!
//! Ticks are never coalesced with in-flight fetches. A slow response does
//! not delay the next tick, so two fetches can be outstanding at once; a
//! monotonically increasing sequence number guarantees that only the newest
//! completion is ever applied, whatever order responses arrive in.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::feed::{FetchError, SnapshotSource};
use crate::model::{PollState, RadarSnapshot};

/// How often the feed is re-fetched unless configured otherwise.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// The single user-visible failure message; the underlying error class is
/// only logged.
const GENERIC_FAILURE_MESSAGE: &str = "radar feed update failed";

#[derive(Default)]
struct Inner {
    stopped: bool,
    next_seq: u64,
    /// Highest sequence number whose completion has been applied.
    applied_seq: u64,
    /// Last successfully parsed snapshot, so `Failed` can keep displaying it.
    last_good: Option<RadarSnapshot>,
}

struct Shared {
    state: watch::Sender<PollState>,
    inner: Mutex<Inner>,
}

impl Shared {
    /// Reserve a sequence number for a new fetch and flag the UI as loading.
    /// Returns `None` once the poller has been stopped.
    fn begin_fetch(&self) -> Option<u64> {
        let mut inner = self.inner.lock().expect("poller state lock poisoned");
        if inner.stopped {
            return None;
        }
        inner.next_seq += 1;
        self.state.send_replace(PollState::Loading);
        Some(inner.next_seq)
    }

    /// Apply one fetch outcome. No-ops after teardown and for completions
    /// older than the newest one already applied.
    fn complete_fetch(&self, seq: u64, outcome: Result<RadarSnapshot, FetchError>) {
        let mut inner = self.inner.lock().expect("poller state lock poisoned");
        if inner.stopped {
            log::debug!("ignoring poll completion after teardown (seq {seq})");
            return;
        }
        if seq <= inner.applied_seq {
            log::debug!(
                "discarding stale poll completion (seq {seq}, newest applied {})",
                inner.applied_seq
            );
            return;
        }
        inner.applied_seq = seq;

        match outcome {
            Ok(snapshot) => {
                log::debug!("poll {seq} succeeded with {} samples", snapshot.len());
                inner.last_good = Some(snapshot.clone());
                self.state.send_replace(PollState::Ready {
                    snapshot,
                    last_update: Utc::now(),
                });
            }
            Err(err) => {
                // The taxonomy is diagnostic only; users see one message.
                log::warn!("poll {seq} failed ({}): {err}", err.kind());
                self.state.send_replace(PollState::Failed {
                    message: GENERIC_FAILURE_MESSAGE.to_string(),
                    previous: inner.last_good.clone(),
                });
            }
        }
    }

    fn mark_stopped(&self) {
        let mut inner = self.inner.lock().expect("poller state lock poisoned");
        inner.stopped = true;
    }
}

/// Owns the refresh lifecycle and the live [`PollState`].
///
/// `start` fires an immediate fetch and then one per interval. Dropping the
/// poller (or calling [`Poller::stop`]) cancels the timer; fetches already in
/// flight are not aborted, their completions simply no-op.
pub struct Poller {
    shared: Arc<Shared>,
    driver: JoinHandle<()>,
}

impl Poller {
    /// Begin polling `source` every `interval`. Must be called from within a
    /// tokio runtime.
    pub fn start(source: Arc<dyn SnapshotSource>, interval: Duration) -> Self {
        let (state, _) = watch::channel(PollState::Idle);
        let shared = Arc::new(Shared {
            state,
            inner: Mutex::new(Inner::default()),
        });

        let driver = tokio::spawn(Self::run(Arc::clone(&shared), source, interval));
        Self { shared, driver }
    }

    async fn run(shared: Arc<Shared>, source: Arc<dyn SnapshotSource>, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            // First tick completes immediately; that is the initial fetch.
            ticker.tick().await;

            let Some(seq) = shared.begin_fetch() else {
                return;
            };

            // Spawned so a response slower than the interval never delays
            // the next tick.
            let shared = Arc::clone(&shared);
            let source = Arc::clone(&source);
            tokio::spawn(async move {
                let outcome = source.fetch().await;
                shared.complete_fetch(seq, outcome);
            });
        }
    }

    /// Watch the live state. The receiver sees every transition, including
    /// the `Loading` flips between outcomes.
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.shared.state.subscribe()
    }

    /// Clone of the current state.
    pub fn state(&self) -> PollState {
        self.shared.state.borrow().clone()
    }

    /// Cancel the recurring timer. Idempotent; after this no further state
    /// transitions are observable.
    pub fn stop(&self) {
        self.shared.mark_stopped();
        self.driver.abort();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
