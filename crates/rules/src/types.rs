use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use url::Url;

use crate::language::languages_for_path;

/// Include/exclude pattern lists for one filter dimension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

impl PatternFilters {
    pub fn include<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: Some(patterns.into_iter().map(Into::into).collect()),
            exclude: None,
        }
    }

    pub fn exclude<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: None,
            exclude: Some(patterns.into_iter().map(Into::into).collect()),
        }
    }

    #[must_use]
    pub fn with_exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Validate a front-matter value.
    ///
    /// Accepts a mapping with optional `include` / `exclude` lists of
    /// strings and nothing else. Any other shape yields `None`.
    pub fn from_yaml(value: &Value) -> Option<Self> {
        let mapping = value.as_mapping()?;
        let mut filters = Self::default();
        for (key, list) in mapping {
            let patterns = string_list(list)?;
            match key.as_str()? {
                "include" => filters.include = Some(patterns),
                "exclude" => filters.exclude = Some(patterns),
                _ => return None,
            }
        }
        Some(filters)
    }

    pub fn is_empty(&self) -> bool {
        self.include.as_ref().map_or(true, Vec::is_empty)
            && self.exclude.as_ref().map_or(true, Vec::is_empty)
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_sequence()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// A guidance rule loaded from a `*.rule.md` file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub uri: Url,
    /// Root-relative name, e.g. `src/testing` for `src/.sourcegraph/testing.rule.md`
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Markdown body presented to the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_filters: Option<PatternFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_filters: Option<PatternFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_filters: Option<PatternFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content_filters: Option<PatternFilters>,
}

impl Rule {
    /// A rule with no metadata and no filters; applies everywhere
    pub fn new(uri: Url, display_name: impl Into<String>) -> Self {
        Self {
            uri,
            display_name: display_name.into(),
            title: None,
            description: None,
            instruction: None,
            tags: None,
            repo_filters: None,
            path_filters: None,
            language_filters: None,
            text_content_filters: None,
        }
    }
}

/// What the rule filters see of a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInfo {
    /// Repository name, e.g. `github.com/org/repo`
    pub repo: String,
    /// Repository-relative path with `/` separators
    pub path: String,
    /// Language ids, e.g. `["rust"]`
    pub languages: Vec<String>,
    pub text_content: String,
}

impl FileInfo {
    /// Build file info, deriving `languages` from the path's extension
    pub fn new(
        repo: impl Into<String>,
        path: impl Into<String>,
        text_content: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let languages = languages_for_path(&path)
            .iter()
            .map(|lang| (*lang).to_string())
            .collect();
        Self {
            repo: repo.into(),
            path,
            languages,
            text_content: text_content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn yaml(raw: &str) -> Value {
        serde_yaml::from_str(raw).unwrap()
    }

    #[test]
    fn from_yaml_accepts_include_and_exclude() {
        let filters = PatternFilters::from_yaml(&yaml("include: [\"\\\\.rs$\"]\nexclude: [test]"));
        assert_eq!(
            filters,
            Some(PatternFilters::include(["\\.rs$"]).with_exclude(["test"]))
        );
    }

    #[test]
    fn from_yaml_rejects_bad_shapes() {
        assert_eq!(PatternFilters::from_yaml(&yaml("\"src/\"")), None);
        assert_eq!(PatternFilters::from_yaml(&yaml("include: src/")), None);
        assert_eq!(PatternFilters::from_yaml(&yaml("include: [1, 2]")), None);
        assert_eq!(PatternFilters::from_yaml(&yaml("includes: [a]")), None);
    }

    #[test]
    fn file_info_derives_languages() {
        let info = FileInfo::new("github.com/org/repo", "src/main.go", "package main");
        assert_eq!(info.languages, vec!["go".to_string()]);
    }
}
