use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding normal component. Separators are platform-native.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Relative path from `root` to `path` with `/` separators.
///
/// Returns `Some("")` when both are the same directory and `None` when no
/// relative path exists (e.g. different drive prefixes).
pub fn relative_posix(root: &Path, path: &Path) -> Option<String> {
    let root = normalize_path(root);
    let path = normalize_path(path);
    let rel = pathdiff::diff_paths(&path, &root)?;
    let rel = rel.to_string_lossy().replace('\\', "/");
    Some(rel.trim_end_matches('/').to_string())
}

/// Component-wise, case-insensitive "`path` is `root` or lies under it"
pub fn is_equal_or_descendant(root: &Path, path: &Path) -> bool {
    strip_prefix_case_insensitive(root, path).is_some()
}

/// Like [`Path::strip_prefix`] but compares components case-insensitively
pub fn strip_prefix_case_insensitive(root: &Path, path: &Path) -> Option<PathBuf> {
    let root = normalize_path(root);
    let path = normalize_path(path);
    let mut path_components = path.components();
    for root_component in root.components() {
        let path_component = path_components.next()?;
        if !components_equal(root_component, path_component) {
            return None;
        }
    }
    Some(path_components.collect())
}

/// Number of components after normalization; used to rank ancestor roots
pub fn depth(path: &Path) -> usize {
    normalize_path(path).components().count()
}

fn components_equal(a: Component<'_>, b: Component<'_>) -> bool {
    let a = a.as_os_str().to_string_lossy();
    let b = b.as_os_str().to_string_lossy();
    a == b || a.to_lowercase() == b.to_lowercase()
}
