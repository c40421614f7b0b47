//! # Context Search
//!
//! Lexical snippet ranking for context retrieval.
//!
//! A candidate text is cut into fixed-size line windows; each window is
//! scored by bag-of-words Jaccard similarity against the text around the
//! cursor, and the best non-overlapping windows are returned.
//!
//! ```text
//! target text ──> stemmed word bag ─┐
//!                                   ├──> Jaccard score per window
//! match text  ──> line word bags ───┘        │
//!                  (sliding window)          ├──> sort by score
//!                                            └──> greedy non-overlap pick
//! ```
//!
//! ## Example
//!
//! ```rust
//! use context_search::best_jaccard_matches;
//!
//! let matches = best_jaccard_matches("foo\nbar\nbaz", "foo\nbar\nbaz", 3, 1).unwrap();
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].score, 1.0);
//! ```

mod error;
mod jaccard;
mod snippets;
mod tokenize;

pub use error::{Result, SearchError};
pub use jaccard::{best_jaccard_matches, jaccard_similarity, JaccardMatch};
pub use snippets::{rank_snippets, CandidateDocument, RankedSnippet};
pub use tokenize::{bag_size, word_occurrences, WordBag};
