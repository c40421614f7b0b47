use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::engine::{IgnoreFileContent, CODY_IGNORE_FILENAME};
use crate::error::{IgnoreError, Result};

/// Directories that never hold ignore files worth reading
const SKIPPED_SCOPES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "target",
    ".venv",
    "__pycache__",
    ".next",
    ".turbo",
];

/// Collect every `.cody/ignore` file under `root`, sorted by path, ready for
/// [`crate::IgnoreEngine::set_ignore_files`].
pub fn discover_ignore_files(root: &Path) -> Result<Vec<IgnoreFileContent>> {
    if !root.is_absolute() {
        return Err(IgnoreError::invalid_argument(format!(
            "workspace root must be absolute, got {}",
            root.display()
        )));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_scope(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Failed to read entry while looking for ignore files: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() || !entry.path().ends_with(CODY_IGNORE_FILENAME) {
            continue;
        }
        let content = match std::fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("Skipping unreadable ignore file {}: {err}", entry.path().display());
                continue;
            }
        };
        files.push(IgnoreFileContent::new(entry.path(), content));
    }

    files.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    log::debug!("Found {} ignore files under {}", files.len(), root.display());
    Ok(files)
}

fn is_skipped_scope(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_SCOPES.iter().any(|skip| skip.eq_ignore_ascii_case(name)))
}
