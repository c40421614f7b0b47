//! # Context Rules
//!
//! Declarative guidance rules and the filters that decide which of them
//! apply to a file.
//!
//! Rules live in `*.rule.md` files inside `.sourcegraph/` directories at any
//! level of a workspace. A rule may narrow where it applies with
//! include/exclude filters over four dimensions:
//!
//! ```text
//! FileInfo { repo, path, languages, text_content }
//!      │
//!      ├──> repo filters          (regex search)
//!      ├──> path filters          (regex search)
//!      ├──> language filters      (exact id, any case)
//!      └──> text content filters  (regex search)
//!                 │
//!                 └──> all dimensions pass -> rule applies
//! ```
//!
//! ## Example
//!
//! ```rust
//! use context_rules::{parse_rule_file, rule_applies_to_file, FileInfo};
//! use url::Url;
//!
//! let root = Url::parse("file:///ws").unwrap();
//! let uri = Url::parse("file:///ws/.sourcegraph/go.rule.md").unwrap();
//! let rule = parse_rule_file(&uri, &root, "---\nlang: go\n---\nUse gofmt.");
//!
//! assert!(rule_applies_to_file(&rule, &FileInfo::new("repo", "main.go", "")));
//! assert!(!rule_applies_to_file(&rule, &FileInfo::new("repo", "main.rs", "")));
//! ```

mod error;
mod filters;
mod language;
mod loader;
mod parse;
mod paths;
mod types;

pub use error::{Result, RuleError};
pub use filters::{applicable_rules, rule_applies_to_file, CompiledRule};
pub use language::languages_for_path;
pub use loader::load_rules_for_file;
pub use parse::parse_rule_file;
pub use paths::{
    is_rule_filename, rule_display_name, rule_search_paths, RULES_DIR, RULE_FILE_SUFFIX,
};
pub use types::{FileInfo, PatternFilters, Rule};
