//! # Context Selector
//!
//! Reconciles context items from many retrievers into one non-redundant
//! list for a prompt.
//!
//! Items describing the same resource (same path, or same title for
//! `unified` results) are compared by line range: an identical item or a
//! range inside a held range is rejected, a wider range replaces the
//! narrower ones it covers, and a whole file mentioned by the user blocks
//! everything else for that file.
//!
//! ```text
//! candidates ──> IgnoreEngine ──(ignored)──────────────> outcome.ignored
//!                    │
//!                    ▼
//!               ContextSet (current + history)
//!                    │  reject: duplicate / contained / user whole file
//!                    │  accept: evict covered items
//!                    ▼
//!               char budget ──(over budget)────────────> outcome.ignored
//!                    │
//!                    ▼
//!               selected items ──> next pass history
//! ```
//!
//! ## Example
//!
//! ```rust
//! use context_ignore::IgnoreEngine;
//! use context_protocol::{ContextItem, RangeData};
//! use context_selector::{ContextSelector, SelectionProfile};
//! use url::Url;
//!
//! let ignore = IgnoreEngine::new();
//! let mut selector = ContextSelector::new(&ignore, SelectionProfile::default(), Vec::<ContextItem>::new())?;
//!
//! let uri = Url::parse("file:///ws/src/lib.rs").unwrap();
//! let narrow = ContextItem::file(uri.clone()).with_range(RangeData::lines(2, 5));
//! let wide = ContextItem::file(uri).with_range(RangeData::lines(0, 10));
//!
//! selector.try_add(vec![narrow, wide.clone()])?;
//! assert_eq!(selector.into_items(), vec![wide]);
//! # Ok::<(), context_selector::SelectorError>(())
//! ```

mod context_set;
mod error;
mod identity;
mod policy;
mod profile;
mod selector;
mod tracker;

pub use context_set::ContextSet;
pub use error::{Result, SelectorError};
pub use identity::item_key;
pub use profile::SelectionProfile;
pub use selector::{ContextSelector, SelectionOutcome};
pub use tracker::{ContextTracker, TrackOutcome, TrackedItems};
