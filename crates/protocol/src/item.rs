use serde::{Deserialize, Serialize};
use url::Url;

use crate::range::RangeData;

/// Where a context item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextItemSource {
    /// Explicitly @-mentioned by the user
    User,
    Editor,
    Selection,
    Search,
    Embeddings,
    /// Remote/federated search result; identified by title, not URI
    Unified,
    Terminal,
    Uri,
    History,
    Initial,
    Priority,
    Agentic,
}

impl ContextItemSource {
    /// Sources whose items can repeat a URI with different ephemeral content
    #[must_use]
    pub const fn has_ephemeral_content(self) -> bool {
        matches!(self, Self::Terminal | Self::Uri)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextItemKind {
    #[default]
    File,
    Symbol,
    Repository,
    Tree,
    OpenCtx,
}

/// A candidate piece of context for a model prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextItem {
    #[serde(rename = "type", default)]
    pub kind: ContextItemKind,

    pub uri: Url,

    /// Absent means the whole resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ContextItemSource>,

    /// Display label; the identity key for `unified` items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,

    /// Size hint (characters) supplied by the retriever
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

impl ContextItem {
    /// A whole-file item with no source or content
    #[must_use]
    pub fn file(uri: Url) -> Self {
        Self {
            kind: ContextItemKind::File,
            uri,
            range: None,
            content: None,
            source: None,
            title: None,
            description: None,
            repo_name: None,
            size: None,
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: RangeData) -> Self {
        self.range = Some(range);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: ContextItemSource) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Human-readable location of the resource.
    ///
    /// `file:` URIs render as a filesystem path; everything else keeps the
    /// full URI so remote resources with equal paths stay distinct.
    #[must_use]
    pub fn display_path(&self) -> String {
        if self.uri.scheme() == "file" {
            if let Ok(path) = self.uri.to_file_path() {
                return path.display().to_string();
            }
            return self.uri.path().to_string();
        }
        self.uri.as_str().to_string()
    }

    #[must_use]
    pub fn is_whole_file(&self) -> bool {
        self.range.is_none()
    }

    #[must_use]
    pub fn is_from(&self, source: ContextItemSource) -> bool {
        self.source == Some(source)
    }

    /// Characters this item occupies once rendered into a prompt
    #[must_use]
    pub fn char_cost(&self) -> usize {
        self.size.unwrap_or_else(|| {
            self.content
                .as_deref()
                .map(|content| content.chars().count())
                .unwrap_or(0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_camel_case_payload() {
        let raw = serde_json::json!({
            "type": "file",
            "uri": "file:///src/squirrel.ts",
            "range": {"start": {"line": 0, "character": 0}, "end": {"line": 5, "character": 0}},
            "source": "embeddings",
            "repoName": "github.com/example/repo",
            "size": 10
        });
        let item: ContextItem = serde_json::from_value(raw).expect("item");
        assert_eq!(item.range, Some(RangeData::lines(0, 5)));
        assert_eq!(item.source, Some(ContextItemSource::Embeddings));
        assert_eq!(item.repo_name.as_deref(), Some("github.com/example/repo"));
        assert_eq!(item.char_cost(), 10);
    }

    #[test]
    fn display_path_keeps_remote_uri() {
        let remote = ContextItem::file(Url::parse("https://example.com/a/b.rs").expect("url"));
        assert_eq!(remote.display_path(), "https://example.com/a/b.rs");
    }

    #[cfg(unix)]
    #[test]
    fn display_path_uses_filesystem_path() {
        let local = ContextItem::file(Url::parse("file:///foo/bar%20baz.rs").expect("url"));
        assert_eq!(local.display_path(), "/foo/bar baz.rs");
    }

    #[test]
    fn char_cost_prefers_size_hint() {
        let uri = Url::parse("file:///a.rs").expect("url");
        let item = ContextItem::file(uri.clone()).with_content("héllo");
        assert_eq!(item.char_cost(), 5);
        assert_eq!(item.with_size(42).char_cost(), 42);
        assert_eq!(ContextItem::file(uri).char_cost(), 0);
    }
}
