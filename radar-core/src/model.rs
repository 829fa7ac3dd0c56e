use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One radar return as delivered by the feed.
///
/// Samples carry no stable identity, so every poll replaces the previous
/// set wholesale instead of merging by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSample {
    pub lat: f64,
    pub lon: f64,
    /// Radar-return intensity in dBZ.
    pub reflectivity: f64,
    /// Human-readable precipitation category, e.g. "moderate".
    pub precipitation_label: String,
    /// Hex color chosen by the feed; passed through to rendering unmodified.
    pub color: String,
}

/// One complete, timestamped collection of samples from a single poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSnapshot {
    pub samples: Vec<RadarSample>,
    /// Feed-supplied timestamp, kept verbatim.
    pub timestamp: String,
    /// Declared point count from feed metadata. A mismatch with
    /// `samples.len()` is tolerated rather than rejected.
    pub total_count: u64,
}

impl RadarSnapshot {
    /// An empty snapshot is valid and renders zero markers; it is distinct
    /// from "no snapshot yet".
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

/// User-visible connection status derived from the current [`PollState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Loading,
    Error,
    Connected,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Loading => "Loading",
            Status::Error => "Error",
            Status::Connected => "Connected",
        };
        f.write_str(s)
    }
}

/// The single live state of the refresh lifecycle. Owned exclusively by the
/// poller, which replaces it wholesale on every poll outcome; readers only
/// observe it.
#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    /// No poll has been attempted yet.
    Idle,
    /// A fetch is outstanding. Advisory for display only; it never blocks
    /// or coalesces overlapping fetches.
    Loading,
    Ready {
        snapshot: RadarSnapshot,
        last_update: DateTime<Utc>,
    },
    Failed {
        message: String,
        /// Last good snapshot, retained for continued display.
        previous: Option<RadarSnapshot>,
    },
}

impl PollState {
    /// The snapshot a display surface should keep showing, if any.
    pub fn snapshot(&self) -> Option<&RadarSnapshot> {
        match self {
            PollState::Ready { snapshot, .. } => Some(snapshot),
            PollState::Failed { previous, .. } => previous.as_ref(),
            PollState::Idle | PollState::Loading => None,
        }
    }

    /// Collapse to the three-valued status indicator. `Idle` reads as
    /// `Loading` since the first poll is already scheduled.
    pub fn status(&self) -> Status {
        match self {
            PollState::Idle | PollState::Loading => Status::Loading,
            PollState::Ready { .. } => Status::Connected,
            PollState::Failed { .. } => Status::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(n: usize) -> RadarSnapshot {
        let samples = (0..n)
            .map(|i| RadarSample {
                lat: 40.0 + i as f64,
                lon: -100.0,
                reflectivity: 25.0,
                precipitation_label: "moderate".into(),
                color: "#ffff00".into(),
            })
            .collect();
        RadarSnapshot {
            samples,
            timestamp: "2026-08-27T12:00:00Z".into(),
            total_count: n as u64,
        }
    }

    #[test]
    fn empty_snapshot_is_valid_and_distinct_from_idle() {
        let snap = snapshot(0);
        assert!(snap.is_empty());
        assert_eq!(snap.total_count, 0);

        let ready = PollState::Ready {
            snapshot: snap,
            last_update: Utc::now(),
        };
        assert!(ready.snapshot().is_some(), "an empty snapshot is still a snapshot");
        assert!(PollState::Idle.snapshot().is_none());
    }

    #[test]
    fn failed_state_keeps_previous_snapshot_visible() {
        let failed = PollState::Failed {
            message: "radar feed update failed".into(),
            previous: Some(snapshot(2)),
        };
        assert_eq!(failed.status(), Status::Error);
        assert_eq!(failed.snapshot().map(RadarSnapshot::len), Some(2));
    }

    #[test]
    fn status_indicator_covers_all_states() {
        assert_eq!(PollState::Idle.status(), Status::Loading);
        assert_eq!(PollState::Loading.status(), Status::Loading);
        let ready = PollState::Ready {
            snapshot: snapshot(1),
            last_update: Utc::now(),
        };
        assert_eq!(ready.status(), Status::Connected);
    }

    #[test]
    fn count_mismatch_is_tolerated() {
        let mut snap = snapshot(3);
        snap.total_count = 7;
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.total_count, 7);
    }
}
