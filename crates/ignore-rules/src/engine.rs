use std::collections::HashMap;
use std::path::{Path, PathBuf};

use context_protocol::paths::{
    depth, is_equal_or_descendant, normalize_path, relative_posix, strip_prefix_case_insensitive,
};
use url::Url;

use crate::error::{IgnoreError, Result};
use crate::matcher::PathMatcher;

/// Location of an ignore file relative to the directory it governs
pub const CODY_IGNORE_FILENAME: &str = ".cody/ignore";

/// Rules every workspace gets, even without ignore files
pub const DEFAULT_IGNORE_RULES: &[&str] = &[".env"];

/// Raw content of one `.cody/ignore` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreFileContent {
    /// Absolute path ending in `.cody/ignore`
    pub file_path: PathBuf,
    pub content: String,
}

impl IgnoreFileContent {
    pub fn new(file_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            content: content.into(),
        }
    }
}

/// Workspace-scoped ignore decisions.
///
/// Owned by the host and passed by reference; one rule set per workspace
/// root, rebuilt wholesale on every [`IgnoreEngine::set_ignore_files`].
#[derive(Debug)]
pub struct IgnoreEngine {
    active: bool,
    workspace_ignores: HashMap<PathBuf, PathMatcher>,
    default_ignores: PathMatcher,
}

impl IgnoreEngine {
    pub fn new() -> Self {
        Self {
            active: true,
            workspace_ignores: HashMap::new(),
            default_ignores: default_matcher(Path::new("")),
        }
    }

    /// Global switch; while inactive nothing is ignored
    pub fn set_active_state(&mut self, enabled: bool) {
        if self.active != enabled {
            log::debug!("Ignore rules {}", if enabled { "enabled" } else { "disabled" });
        }
        self.active = enabled;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Replace every rule for `workspace_root` with the rules from `files`.
    ///
    /// Validation happens before any state changes, so a rejected call
    /// leaves the previous rules in place.
    pub fn set_ignore_files(
        &mut self,
        workspace_root: &Path,
        files: impl IntoIterator<Item = IgnoreFileContent>,
    ) -> Result<()> {
        ensure_absolute("workspace_root", workspace_root)?;
        let files: Vec<IgnoreFileContent> = files.into_iter().collect();
        for file in &files {
            ensure_ignore_file(&file.file_path)?;
        }

        let root = normalize_path(workspace_root);
        let mut builder = PathMatcher::builder(&root);
        builder.add_rules(DEFAULT_IGNORE_RULES.iter().copied());

        for file in &files {
            let Some(folder) = governed_folder(&file.file_path) else {
                continue;
            };
            if !is_equal_or_descendant(&root, &folder) {
                log::warn!(
                    "Ignore file {} is outside workspace {}; skipping",
                    file.file_path.display(),
                    root.display()
                );
                continue;
            }
            let relative_folder = relative_posix(&root, &folder).unwrap_or_default();
            for rule in scoped_rules(&file.content, &relative_folder) {
                builder.add_rule(&rule);
            }
        }

        let matcher = builder.build()?;
        log::debug!(
            "Loaded {} ignore rules from {} files for {}",
            matcher.len(),
            files.len(),
            root.display()
        );
        self.workspace_ignores.insert(root, matcher);
        Ok(())
    }

    /// Forget every rule for `workspace_root`
    pub fn clear_ignore_files(&mut self, workspace_root: &Path) {
        let root = normalize_path(workspace_root);
        if self.workspace_ignores.remove(&root).is_some() {
            log::debug!("Cleared ignore rules for {}", root.display());
        }
    }

    /// Whether `uri` must be kept out of model context.
    ///
    /// Non-`file` URIs are always ignored while the engine is active.
    pub fn is_ignored(&self, uri: &Url) -> Result<bool> {
        if !self.active {
            return Ok(false);
        }
        if uri.scheme() != "file" {
            return Ok(true);
        }
        let path = uri.to_file_path().map_err(|()| {
            IgnoreError::invalid_argument(format!("uri {uri} is not an absolute file path"))
        })?;
        if path.file_name().is_none() {
            return Err(IgnoreError::invalid_argument(format!(
                "uri {uri} does not name a file"
            )));
        }
        self.is_path_ignored(&path)
    }

    /// Same decision as [`IgnoreEngine::is_ignored`] for a filesystem path
    pub fn is_path_ignored(&self, path: &Path) -> Result<bool> {
        if !self.active {
            return Ok(false);
        }
        ensure_absolute("path", path)?;

        let Some((root, relative)) = self.find_workspace_root(path) else {
            // Without a root only basename rules can apply; folder-scoped
            // patterns have nothing to be relative to.
            let Some(name) = path.file_name() else {
                return Ok(false);
            };
            return Ok(self.default_ignores.is_match(Path::new(name)));
        };

        let ignored = self
            .workspace_ignores
            .get(root)
            .is_some_and(|matcher| matcher.is_match(&relative));
        if ignored {
            log::trace!("{} ignored by rules of {}", path.display(), root.display());
        }
        Ok(ignored)
    }

    /// Registered workspace roots, in no particular order
    pub fn workspace_roots(&self) -> impl Iterator<Item = &Path> {
        self.workspace_ignores.keys().map(PathBuf::as_path)
    }

    /// The shortest registered root containing `path`, with `path` made
    /// relative to it. Nested roots are separate workspace folders, so the
    /// outermost one already carries their ignore files.
    fn find_workspace_root(&self, path: &Path) -> Option<(&PathBuf, PathBuf)> {
        self.workspace_ignores
            .keys()
            .filter_map(|root| {
                strip_prefix_case_insensitive(root, path).map(|relative| (root, relative))
            })
            .min_by_key(|(root, _)| (depth(root), root.as_os_str().len()))
    }
}

impl Default for IgnoreEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn one ignore file into rules scoped to `relative_folder`
fn scoped_rules(content: &str, relative_folder: &str) -> Vec<String> {
    let mut rules = Vec::new();
    for line in content.split('\n') {
        let mut line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let negated = line.starts_with('!');
        if negated {
            line = &line[1..];
        }
        let mut rule = if relative_folder.is_empty() {
            line.to_string()
        } else {
            format!("{relative_folder}/{}", line.trim_start_matches('/'))
        };
        if negated {
            rule.insert(0, '!');
        }
        rules.push(rule);
    }
    rules
}

/// `/ws/a/.cody/ignore` governs `/ws/a`
fn governed_folder(file_path: &Path) -> Option<PathBuf> {
    file_path.parent()?.parent().map(normalize_path)
}

fn default_matcher(root: &Path) -> PathMatcher {
    let mut builder = PathMatcher::builder(root);
    builder.add_rules(DEFAULT_IGNORE_RULES.iter().copied());
    builder.build().unwrap_or_else(|err| {
        log::error!("Default ignore rules failed to compile: {err}");
        PathMatcher::empty()
    })
}

fn ensure_absolute(name: &str, path: &Path) -> Result<()> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(IgnoreError::invalid_argument(format!(
            "{name} must be absolute, got {}",
            path.display()
        )))
    }
}

fn ensure_ignore_file(path: &Path) -> Result<()> {
    ensure_absolute("ignore file path", path)?;
    if path.ends_with(CODY_IGNORE_FILENAME) {
        Ok(())
    } else {
        Err(IgnoreError::invalid_argument(format!(
            "ignore file path must end with {CODY_IGNORE_FILENAME}, got {}",
            path.display()
        )))
    }
}
