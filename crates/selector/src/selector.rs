use context_ignore::IgnoreEngine;
use context_protocol::ContextItem;

use crate::context_set::ContextSet;
use crate::error::Result;
use crate::profile::SelectionProfile;

/// What one [`ContextSelector::try_add`] call did with its items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionOutcome {
    /// Items from this call still selected when the call returned
    pub added: Vec<ContextItem>,
    /// Items dropped by ignore rules or the budget; budget drops lose their
    /// content
    pub ignored: Vec<ContextItem>,
    /// At least one item did not fit the remaining budget
    pub limit_reached: bool,
}

/// Final gate before prompt assembly.
///
/// Screens items with the ignore engine, de-duplicates them through a
/// [`ContextSet`] and keeps the total character cost within
/// [`SelectionProfile::max_chars`]. Replaced items give their cost back.
#[derive(Debug)]
pub struct ContextSelector<'a> {
    ignore: &'a IgnoreEngine,
    profile: SelectionProfile,
    set: ContextSet,
    remaining: usize,
}

impl<'a> ContextSelector<'a> {
    pub fn new(
        ignore: &'a IgnoreEngine,
        profile: SelectionProfile,
        history: impl IntoIterator<Item = ContextItem>,
    ) -> Result<Self> {
        profile.validate()?;
        Ok(Self {
            ignore,
            remaining: profile.max_chars,
            profile,
            set: ContextSet::new(history),
        })
    }

    pub fn profile(&self) -> &SelectionProfile {
        &self.profile
    }

    /// Characters still available
    pub fn remaining_chars(&self) -> usize {
        self.remaining
    }

    /// Offer `items` in order.
    ///
    /// Ignored items and items over budget land in
    /// [`SelectionOutcome::ignored`]; items the set would reject as
    /// redundant are dropped silently.
    pub fn try_add(
        &mut self,
        items: impl IntoIterator<Item = ContextItem>,
    ) -> Result<SelectionOutcome> {
        let mut outcome = SelectionOutcome::default();

        for mut item in items {
            if self.profile.respect_ignore && self.ignore.is_ignored(&item.uri)? {
                log::debug!("Skipping ignored context item {}", item.uri);
                outcome.ignored.push(item);
                continue;
            }

            let Some(replaced) = self.set.would_replace(&item) else {
                log::trace!("Skipping redundant context item {}", item.uri);
                continue;
            };
            let refund: usize = replaced.iter().map(|held| held.char_cost()).sum();
            let cost = item.char_cost();
            if cost > self.remaining + refund {
                log::debug!(
                    "Context item {} needs {cost} chars, {} left",
                    item.uri,
                    self.remaining + refund
                );
                item.content = None;
                outcome.ignored.push(item);
                outcome.limit_reached = true;
                continue;
            }

            if self.set.insert(item.clone()).is_some() {
                self.remaining = self.remaining + refund - cost;
                outcome.added.push(item);
            }
        }

        outcome.added.retain(|item| self.set.contains(item));
        log::debug!(
            "Selected {} context items, ignored {}, {} chars left",
            outcome.added.len(),
            outcome.ignored.len(),
            self.remaining
        );
        Ok(outcome)
    }

    /// Selected items in insertion order
    pub fn items(&self) -> Vec<&ContextItem> {
        self.set.values()
    }

    /// Final selection; suitable as history for the next pass
    pub fn into_items(self) -> Vec<ContextItem> {
        self.set.into_values()
    }
}
