//! # Context Ignore
//!
//! Decides whether a resource may be used as model context.
//!
//! Rules come from `.cody/ignore` files (gitignore syntax) found anywhere
//! inside a workspace root. Each file's patterns are scoped to the directory
//! that holds its `.cody` folder, and every workspace carries the default
//! rule `.env`.
//!
//! ```text
//! set_ignore_files(root, files)
//!     │
//!     ├──> default rule (.env)
//!     ├──> per-file lines, prefixed with the file's directory
//!     └──> compiled PathMatcher for `root`
//!
//! is_ignored(uri)
//!     ├──> inactive            -> false
//!     ├──> non-file scheme     -> true
//!     ├──> no matching root    -> default rules vs basename
//!     └──> shortest root match -> root rules vs relative path
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use context_ignore::{IgnoreEngine, IgnoreFileContent};
//! use std::path::Path;
//!
//! let mut engine = IgnoreEngine::new();
//! engine.set_ignore_files(
//!     Path::new("/ws"),
//!     vec![IgnoreFileContent::new("/ws/.cody/ignore", "secrets/\n")],
//! )?;
//! let uri = url::Url::parse("file:///ws/secrets/key.pem").unwrap();
//! assert!(engine.is_ignored(&uri)?);
//! # Ok::<(), context_ignore::IgnoreError>(())
//! ```

mod discovery;
mod engine;
mod error;
mod matcher;

pub use discovery::discover_ignore_files;
pub use engine::{IgnoreEngine, IgnoreFileContent, CODY_IGNORE_FILENAME, DEFAULT_IGNORE_RULES};
pub use error::{IgnoreError, Result};
pub use matcher::{PathMatcher, PathMatcherBuilder};
