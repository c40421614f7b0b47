use context_protocol::ContextItem;

use crate::policy::{decide, Decision, Keyed};

/// Context items chosen for one prompt, checked against items already used
/// in earlier turns.
///
/// Items for the same resource never repeat: an identical item, a range
/// inside a held range, or anything for a file the user included whole is
/// turned away, while a wider range replaces the narrower ones it covers.
#[derive(Debug, Clone, Default)]
pub struct ContextSet {
    items: Vec<Keyed>,
    history: Vec<Keyed>,
}

impl ContextSet {
    /// `history` holds items used by earlier passes; they block new items
    /// but never show up in [`ContextSet::values`].
    pub fn new(history: impl IntoIterator<Item = ContextItem>) -> Self {
        Self {
            items: Vec::new(),
            history: history.into_iter().map(Keyed::new).collect(),
        }
    }

    /// Add `item`; `true` when it was accepted
    pub fn add(&mut self, item: ContextItem) -> bool {
        self.insert(item).is_some()
    }

    /// Add `item`, returning the items it replaced, or `None` when rejected
    pub fn insert(&mut self, item: ContextItem) -> Option<Vec<ContextItem>> {
        let candidate = Keyed::new(item);
        match decide(&candidate, &self.items, &self.history) {
            Decision::Reject(reason) => {
                log::trace!("Rejected {} ({reason:?})", candidate.key);
                None
            }
            Decision::Accept { evict } => {
                let mut evicted: Vec<ContextItem> = evict
                    .into_iter()
                    .rev()
                    .map(|index| self.items.remove(index).item)
                    .collect();
                evicted.reverse();
                self.items.push(candidate);
                Some(evicted)
            }
        }
    }

    /// Items `item` would replace if added now, or `None` if it would be
    /// rejected. Leaves the set untouched.
    pub fn would_replace(&self, item: &ContextItem) -> Option<Vec<&ContextItem>> {
        let candidate = Keyed::new(item.clone());
        match decide(&candidate, &self.items, &self.history) {
            Decision::Reject(_) => None,
            Decision::Accept { evict } => {
                Some(evict.into_iter().map(|index| &self.items[index].item).collect())
            }
        }
    }

    /// Remove a current item equal to `item`. History is never touched.
    pub fn remove(&mut self, item: &ContextItem) -> bool {
        let before = self.items.len();
        self.items.retain(|held| held.item != *item);
        before != self.items.len()
    }

    pub fn contains(&self, item: &ContextItem) -> bool {
        self.items.iter().any(|held| held.item == *item)
    }

    /// Current items in insertion order
    pub fn values(&self) -> Vec<&ContextItem> {
        self.items.iter().map(|held| &held.item).collect()
    }

    pub fn into_values(self) -> Vec<ContextItem> {
        self.items.into_iter().map(|held| held.item).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
