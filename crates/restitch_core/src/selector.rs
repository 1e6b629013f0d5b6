//! Revision selection: which historical revision, if any, should be used
//! to restore one original file.

use chrono::{Duration, NaiveDateTime};

/// One historical revision found in the backup store for an original file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionCandidate {
    pub file_name: String,
    pub timestamp: NaiveDateTime,
}

/// The latest timestamp a revision may carry and still be eligible for
/// automatic recovery. Revisions written after this instant may themselves
/// hold corrupted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutoff(NaiveDateTime);

impl Cutoff {
    #[must_use]
    pub fn new(reference_time: NaiveDateTime, time_limit: Duration) -> Self {
        Self(reference_time + time_limit)
    }

    /// Inclusive: a revision stamped exactly at the cutoff still qualifies.
    #[must_use]
    pub fn permits(&self, timestamp: NaiveDateTime) -> bool {
        timestamp <= self.0
    }

    #[must_use]
    pub fn instant(&self) -> NaiveDateTime {
        self.0
    }
}

/// Result of evaluating every candidate revision for one original file.
#[derive(Debug, Clone, Default)]
pub struct SelectionOutcome {
    pub candidate_count: usize,

    /// Candidate with the maximum timestamp over all candidates.
    pub latest: Option<RevisionCandidate>,

    /// True if `latest` is stamped strictly after the cutoff.
    pub latest_exceeds_cutoff: bool,

    /// Candidate with the maximum timestamp among those the cutoff permits.
    pub chosen: Option<RevisionCandidate>,
}

/// Single pass over the candidates tracking two running maxima. Pure and
/// order-independent: ties on timestamp resolve to the lexicographically
/// smaller filename, so the outcome never depends on listing order.
#[must_use]
pub fn select(candidates: &[RevisionCandidate], cutoff: Cutoff) -> SelectionOutcome {
    let mut outcome = SelectionOutcome {
        candidate_count: candidates.len(),
        ..Default::default()
    };

    for candidate in candidates {
        if replaces(outcome.latest.as_ref(), candidate) {
            outcome.latest = Some(candidate.clone());
        }
        if cutoff.permits(candidate.timestamp) && replaces(outcome.chosen.as_ref(), candidate) {
            outcome.chosen = Some(candidate.clone());
        }
    }

    outcome.latest_exceeds_cutoff = outcome
        .latest
        .as_ref()
        .is_some_and(|latest| !cutoff.permits(latest.timestamp));

    outcome
}

fn replaces(current: Option<&RevisionCandidate>, candidate: &RevisionCandidate) -> bool {
    match current {
        None => true,
        Some(cur) => {
            candidate.timestamp > cur.timestamp
                || (candidate.timestamp == cur.timestamp && candidate.file_name < cur.file_name)
        }
    }
}
