use std::path::Path;

/// Editor language ids for a file, detected from its extension.
///
/// Headers shared by C and C++ report both; unknown extensions report none.
pub fn languages_for_path(path: impl AsRef<Path>) -> &'static [&'static str] {
    let Some(ext) = path.as_ref().extension().and_then(|ext| ext.to_str()) else {
        return &[];
    };
    match ext.to_lowercase().as_str() {
        "rs" => &["rust"],
        "py" | "pyw" => &["python"],
        "js" | "mjs" | "cjs" => &["javascript"],
        "jsx" => &["javascriptreact"],
        "ts" | "mts" | "cts" => &["typescript"],
        "tsx" => &["typescriptreact"],
        "go" => &["go"],
        "java" => &["java"],
        "c" => &["c"],
        "h" => &["c", "cpp"],
        "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => &["cpp"],
        "cs" => &["csharp"],
        "rb" => &["ruby"],
        "swift" => &["swift"],
        "kt" | "kts" => &["kotlin"],
        "php" => &["php"],
        "scala" => &["scala"],
        "md" | "markdown" => &["markdown"],
        "json" => &["json"],
        "yaml" | "yml" => &["yaml"],
        "toml" => &["toml"],
        "sh" | "bash" => &["shellscript"],
        _ => &[],
    }
}
