use std::io::ErrorKind;
use std::path::Path;

use url::Url;

use crate::error::{Result, RuleError};
use crate::parse::parse_rule_file;
use crate::paths::{is_rule_filename, rule_search_paths};
use crate::types::Rule;

/// Read every rule that may apply to `file` from the `.sourcegraph`
/// directories between it and `root`, nearest directory first.
///
/// Missing directories are skipped. Unreadable directories and rule files
/// are logged and skipped.
pub fn load_rules_for_file(file: &Path, root: &Path) -> Result<Vec<Rule>> {
    let file_uri = file_url(file)?;
    let root_uri = file_url(root)?;

    let mut rules = Vec::new();
    for search_path in rule_search_paths(&file_uri, &root_uri) {
        let Ok(dir) = search_path.to_file_path() else {
            continue;
        };
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => continue,
            Err(err) => {
                log::debug!("Failed to read rules directory {}: {err}", dir.display());
                continue;
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| is_rule_filename(name))
            .collect();
        names.sort();

        for name in names {
            let path = dir.join(&name);
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(err) => {
                    log::debug!("Failed to read rule file {}: {err}", path.display());
                    continue;
                }
            };
            let Ok(rule_uri) = Url::from_file_path(&path) else {
                continue;
            };
            rules.push(parse_rule_file(&rule_uri, &root_uri, &content));
        }
    }

    log::debug!("Loaded {} rules for {}", rules.len(), file.display());
    Ok(rules)
}

fn file_url(path: &Path) -> Result<Url> {
    Url::from_file_path(path).map_err(|()| {
        RuleError::InvalidArgument(format!("path must be absolute, got {}", path.display()))
    })
}
