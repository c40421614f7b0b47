use std::path::{Component, Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::{IgnoreError, Result};

/// Match case-insensitively where the host filesystem does
const CASE_INSENSITIVE_FS: bool = cfg!(any(windows, target_os = "macos"));

/// Compiled gitignore-style patterns evaluated against relative paths.
///
/// Supports `**`, `*`, `?`, directory-only (`foo/`), root-anchored (`/foo`)
/// and negated (`!foo`) patterns; the last matching pattern wins.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    gitignore: Gitignore,
    rules: Vec<String>,
}

impl PathMatcher {
    pub fn builder(root: impl AsRef<Path>) -> PathMatcherBuilder {
        PathMatcherBuilder::new(root)
    }

    /// A matcher with no patterns; matches nothing
    pub fn empty() -> Self {
        Self {
            gitignore: Gitignore::empty(),
            rules: Vec::new(),
        }
    }

    /// True when `relative_path`, or one of its parent directories, is
    /// excluded by the patterns.
    pub fn is_match(&self, relative_path: &Path) -> bool {
        let relative = relative_only(relative_path);
        if relative.as_os_str().is_empty() {
            return false;
        }
        self.gitignore
            .matched_path_or_any_parents(&relative, false)
            .is_ignore()
    }

    /// Patterns in the order they were added
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

pub struct PathMatcherBuilder {
    inner: GitignoreBuilder,
    rules: Vec<String>,
}

impl PathMatcherBuilder {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let mut inner = GitignoreBuilder::new(root);
        if let Err(err) = inner.case_insensitive(CASE_INSENSITIVE_FS) {
            log::warn!("Failed to configure ignore case sensitivity: {err}");
        }
        Self {
            inner,
            rules: Vec::new(),
        }
    }

    /// Add one gitignore line. Lines that fail to parse are logged and
    /// skipped so one bad pattern does not disable the rest of the file.
    pub fn add_rule(&mut self, rule: &str) -> &mut Self {
        match self.inner.add_line(None, rule) {
            Ok(_) => self.rules.push(rule.to_string()),
            Err(err) => log::warn!("Skipping invalid ignore pattern {rule:?}: {err}"),
        }
        self
    }

    pub fn add_rules<'a>(&mut self, rules: impl IntoIterator<Item = &'a str>) -> &mut Self {
        for rule in rules {
            self.add_rule(rule);
        }
        self
    }

    pub fn build(&self) -> Result<PathMatcher> {
        let gitignore = self
            .inner
            .build()
            .map_err(|err| IgnoreError::invalid_argument(format!("ignore rules: {err}")))?;
        Ok(PathMatcher {
            gitignore,
            rules: self.rules.clone(),
        })
    }
}

/// Keep only the normal components so the matcher never sees a rooted path
fn relative_only(path: &Path) -> PathBuf {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}
