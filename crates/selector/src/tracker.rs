use context_protocol::ContextItem;
use serde::Serialize;

use crate::policy::{decide, Decision, Keyed, Rejection};

/// Result of [`ContextTracker::track_with_outcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// Accepted, nothing else changed
    Added,
    /// Accepted and superseded this many used items
    Replaced(usize),
    /// Rejected: an identical item is already used
    Duplicate,
    /// Rejected: already covered by a used item
    Redundant,
}

impl TrackOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Added | Self::Replaced(_))
    }
}

/// Snapshot of a tracker's bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackedItems {
    pub used: Vec<ContextItem>,
    /// Rejected items plus used items that a wider item superseded
    pub duplicate: Vec<ContextItem>,
}

/// Session-wide record of which items were used and which were turned
/// away, under the same rules as [`crate::ContextSet`] minus history.
#[derive(Debug, Clone, Default)]
pub struct ContextTracker {
    used: Vec<Keyed>,
    duplicate: Vec<ContextItem>,
}

impl ContextTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `item`; `true` when it became used
    pub fn track(&mut self, item: ContextItem) -> bool {
        self.track_with_outcome(item).is_accepted()
    }

    pub fn track_with_outcome(&mut self, item: ContextItem) -> TrackOutcome {
        let candidate = Keyed::new(item);
        match decide(&candidate, &self.used, &[]) {
            Decision::Reject(reason) => {
                self.duplicate.push(candidate.item);
                match reason {
                    Rejection::Duplicate => TrackOutcome::Duplicate,
                    Rejection::UserWholeFile | Rejection::Contained => TrackOutcome::Redundant,
                }
            }
            Decision::Accept { evict } => {
                let replaced = evict.len();
                let mut superseded: Vec<ContextItem> = evict
                    .into_iter()
                    .rev()
                    .map(|index| self.used.remove(index).item)
                    .collect();
                superseded.reverse();
                self.duplicate.extend(superseded);
                self.used.push(candidate);
                if replaced == 0 {
                    TrackOutcome::Added
                } else {
                    TrackOutcome::Replaced(replaced)
                }
            }
        }
    }

    /// Drop a used item equal to `item`
    pub fn untrack(&mut self, item: &ContextItem) -> bool {
        let before = self.used.len();
        self.used.retain(|held| held.item != *item);
        before != self.used.len()
    }

    pub fn used(&self) -> impl Iterator<Item = &ContextItem> {
        self.used.iter().map(|held| &held.item)
    }

    pub fn duplicates(&self) -> &[ContextItem] {
        &self.duplicate
    }

    pub fn tracked(&self) -> TrackedItems {
        TrackedItems {
            used: self.used().cloned().collect(),
            duplicate: self.duplicate.clone(),
        }
    }

    pub fn into_tracked(self) -> TrackedItems {
        TrackedItems {
            used: self.used.into_iter().map(|held| held.item).collect(),
            duplicate: self.duplicate,
        }
    }
}
