use context_protocol::paths::relative_posix;
use url::Url;

/// Suffix every rule file carries
pub const RULE_FILE_SUFFIX: &str = ".rule.md";

/// Directory name that holds rule files at any level of a workspace
pub const RULES_DIR: &str = ".sourcegraph";

pub fn is_rule_filename(name: &str) -> bool {
    name.ends_with(RULE_FILE_SUFFIX)
}

/// Directories that may hold rules for `file_uri`, nearest first.
///
/// One `<dir>/.sourcegraph/` entry per ancestor of the file up to and
/// including `root_uri`. Entries end with `/` so rule names can be joined
/// onto them. Empty when the file is not strictly inside the root.
pub fn rule_search_paths(file_uri: &Url, root_uri: &Url) -> Vec<Url> {
    if file_uri.scheme() != root_uri.scheme() || file_uri.host_str() != root_uri.host_str() {
        return Vec::new();
    }
    let root = root_uri.path().trim_end_matches('/');
    let file = file_uri.path().trim_end_matches('/');
    let inside = file
        .strip_prefix(root)
        .is_some_and(|rest| rest.len() > 1 && rest.starts_with('/'));
    if !inside {
        return Vec::new();
    }

    let mut search_paths = Vec::new();
    let mut current = file;
    while current.len() > root.len() {
        let Some(slash) = current.rfind('/') else {
            break;
        };
        current = &current[..slash];
        let mut search_path = file_uri.clone();
        search_path.set_path(&format!("{current}/{RULES_DIR}/"));
        search_path.set_query(None);
        search_path.set_fragment(None);
        search_paths.push(search_path);
    }
    search_paths
}

/// Root-relative rule name with `.sourcegraph/` segments and the
/// `.rule.md` suffix removed, e.g. `src/.sourcegraph/testing.rule.md`
/// becomes `src/testing`.
pub fn rule_display_name(rule_uri: &Url, root_uri: &Url) -> String {
    let relative = relative_rule_path(rule_uri, root_uri);
    let without_dir = relative.replace(&format!("{RULES_DIR}/"), "");
    without_dir
        .strip_suffix(RULE_FILE_SUFFIX)
        .unwrap_or(&without_dir)
        .to_string()
}

fn relative_rule_path(rule_uri: &Url, root_uri: &Url) -> String {
    if let (Ok(rule), Ok(root)) = (rule_uri.to_file_path(), root_uri.to_file_path()) {
        if let Some(relative) = relative_posix(&root, &rule) {
            return relative;
        }
    }
    let root = root_uri.path().trim_end_matches('/');
    let path = rule_uri.path();
    path.strip_prefix(root)
        .unwrap_or(path)
        .trim_start_matches('/')
        .to_string()
}
