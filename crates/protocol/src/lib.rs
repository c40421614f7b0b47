//! # Context Protocol
//!
//! Data shared by every stage of context selection: candidate context items,
//! their line ranges and origin tags, plus the path helpers the ignore and
//! rule engines build on.
//!
//! ```text
//! retrievers ──> ContextItem { uri, range?, source?, content? }
//!                    │
//!                    ├──> ignore rules      (drop excluded URIs)
//!                    ├──> guidance rules    (which rules apply)
//!                    └──> context set       (dedup + overlap resolution)
//! ```

mod item;
pub mod paths;
mod range;

pub use item::{ContextItem, ContextItemKind, ContextItemSource};
pub use range::{Position, RangeData};
