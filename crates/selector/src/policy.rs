use context_protocol::{ContextItem, ContextItemSource};

use crate::identity::item_key;

/// An item with its identity key computed once
#[derive(Debug, Clone)]
pub(crate) struct Keyed {
    pub key: String,
    pub item: ContextItem,
}

impl Keyed {
    pub fn new(item: ContextItem) -> Self {
        Self {
            key: item_key(&item),
            item,
        }
    }
}

/// Why an item was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    /// An identical item is already held
    Duplicate,
    /// The user already included the whole resource
    UserWholeFile,
    /// A held range strictly encloses the new range
    Contained,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Decision {
    Reject(Rejection),
    /// Accept after removing these indices of `current`, ascending
    Accept { evict: Vec<usize> },
}

/// Decide whether `candidate` joins `current`.
///
/// Only items with the candidate's key take part. `history` items can block
/// the candidate but are never evicted.
pub(crate) fn decide(candidate: &Keyed, current: &[Keyed], history: &[Keyed]) -> Decision {
    let same_key = || {
        history
            .iter()
            .chain(current)
            .filter(|existing| existing.key == candidate.key)
    };

    if same_key().any(|existing| existing.item == candidate.item) {
        return Decision::Reject(Rejection::Duplicate);
    }
    if same_key().any(|existing| is_user_whole_file(&existing.item)) {
        return Decision::Reject(Rejection::UserWholeFile);
    }

    let current_same_key = || {
        current
            .iter()
            .enumerate()
            .filter(|(_, existing)| existing.key == candidate.key)
    };

    let Some(range) = candidate.item.range else {
        let evict = if is_user_whole_file(&candidate.item) {
            current_same_key().map(|(index, _)| index).collect()
        } else {
            Vec::new()
        };
        return Decision::Accept { evict };
    };

    let enclosed = same_key()
        .filter_map(|existing| existing.item.range)
        .any(|held| held.contains_lines(&range) && !range.contains_lines(&held));
    if enclosed {
        return Decision::Reject(Rejection::Contained);
    }

    let evict = current_same_key()
        .filter(|(_, existing)| {
            existing
                .item
                .range
                .is_some_and(|held| range.contains_lines(&held))
        })
        .map(|(index, _)| index)
        .collect();
    Decision::Accept { evict }
}

fn is_user_whole_file(item: &ContextItem) -> bool {
    item.is_whole_file() && item.is_from(ContextItemSource::User)
}
