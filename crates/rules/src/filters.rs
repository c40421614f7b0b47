use std::collections::HashSet;

use regex::Regex;

use crate::types::{FileInfo, PatternFilters, Rule};

/// Whether `rule` applies to `file`.
///
/// Repo, path and text-content filters are unanchored regex searches;
/// language filters compare ids exactly, ignoring case. Every dimension that
/// has filters must pass.
pub fn rule_applies_to_file(rule: &Rule, file: &FileInfo) -> bool {
    RegexFilter::compile(rule.repo_filters.as_ref()).matches(&file.repo)
        && RegexFilter::compile(rule.path_filters.as_ref()).matches(&file.path)
        && languages_pass(rule.language_filters.as_ref(), &file.languages)
        && RegexFilter::compile(rule.text_content_filters.as_ref()).matches(&file.text_content)
}

/// A rule with its regex filters compiled once, for repeated evaluation
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: Rule,
    repo: RegexFilter,
    path: RegexFilter,
    text_content: RegexFilter,
}

impl CompiledRule {
    pub fn new(rule: Rule) -> Self {
        Self {
            repo: RegexFilter::compile(rule.repo_filters.as_ref()),
            path: RegexFilter::compile(rule.path_filters.as_ref()),
            text_content: RegexFilter::compile(rule.text_content_filters.as_ref()),
            rule,
        }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn into_rule(self) -> Rule {
        self.rule
    }

    /// Same decision as [`rule_applies_to_file`] without recompiling
    pub fn applies_to(&self, file: &FileInfo) -> bool {
        self.repo.matches(&file.repo)
            && self.path.matches(&file.path)
            && languages_pass(self.rule.language_filters.as_ref(), &file.languages)
            && self.text_content.matches(&file.text_content)
    }
}

impl From<Rule> for CompiledRule {
    fn from(rule: Rule) -> Self {
        Self::new(rule)
    }
}

/// Rules that apply to `file`, one per URI, ordered by display name
pub fn applicable_rules<'a>(rules: &'a [CompiledRule], file: &FileInfo) -> Vec<&'a Rule> {
    let mut seen = HashSet::new();
    let mut applicable: Vec<&Rule> = rules
        .iter()
        .filter(|compiled| compiled.applies_to(file))
        .map(CompiledRule::rule)
        .filter(|rule| {
            let rule: &'a Rule = *rule;
            seen.insert(rule.uri.as_str())
        })
        .collect();
    applicable.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    log::debug!(
        "{} of {} rules apply to {}",
        applicable.len(),
        rules.len(),
        file.path
    );
    applicable
}

#[derive(Debug, Clone, Default)]
struct RegexFilter {
    /// `None` when the rule lists no include patterns
    include: Option<Vec<Regex>>,
    exclude: Vec<Regex>,
}

impl RegexFilter {
    /// Invalid patterns are logged and dropped. An include list whose
    /// patterns all fail to compile matches nothing.
    fn compile(filters: Option<&PatternFilters>) -> Self {
        let Some(filters) = filters else {
            return Self::default();
        };
        let include = filters
            .include
            .as_deref()
            .filter(|patterns| !patterns.is_empty())
            .map(compile_all);
        let exclude = filters.exclude.as_deref().map(compile_all).unwrap_or_default();
        Self { include, exclude }
    }

    fn matches(&self, value: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.iter().any(|re| re.is_match(value)) {
                return false;
            }
        }
        !self.exclude.iter().any(|re| re.is_match(value))
    }
}

fn compile_all(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(err) => {
                log::warn!("Skipping invalid rule pattern {pattern:?}: {err}");
                None
            }
        })
        .collect()
}

fn languages_pass(filters: Option<&PatternFilters>, languages: &[String]) -> bool {
    let Some(filters) = filters else {
        return true;
    };
    languages.iter().any(|language| language_passes(filters, language))
}

fn language_passes(filters: &PatternFilters, language: &str) -> bool {
    let listed = |patterns: &Option<Vec<String>>| {
        patterns
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|pattern| pattern.eq_ignore_ascii_case(language))
    };
    let include_required = filters.include.as_ref().is_some_and(|p| !p.is_empty());
    if include_required && !listed(&filters.include) {
        return false;
    }
    !listed(&filters.exclude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use url::Url;

    fn rule(name: &str) -> Rule {
        let uri = Url::parse(&format!("file:///ws/.sourcegraph/{name}.rule.md")).unwrap();
        Rule::new(uri, name)
    }

    fn file(path: &str, text: &str) -> FileInfo {
        FileInfo::new("github.com/org/repo", path, text)
    }

    #[test]
    fn rule_without_filters_applies_everywhere() {
        assert!(rule_applies_to_file(&rule("any"), &file("a.txt", "")));
        assert!(rule_applies_to_file(&rule("any"), &FileInfo::default()));
    }

    #[test]
    fn path_include_is_unanchored_search() {
        let mut r = rule("tests");
        r.path_filters = Some(PatternFilters::include(["_test\\.go$"]));
        assert!(rule_applies_to_file(&r, &file("pkg/server/handler_test.go", "")));
        assert!(!rule_applies_to_file(&r, &file("pkg/server/handler.go", "")));
    }

    #[test]
    fn exclude_wins_over_include() {
        let mut r = rule("src");
        r.path_filters = Some(PatternFilters::include(["^src/"]).with_exclude(["generated"]));
        assert!(rule_applies_to_file(&r, &file("src/lib.rs", "")));
        assert!(!rule_applies_to_file(&r, &file("src/generated/api.rs", "")));
    }

    #[test]
    fn dimensions_are_combined_with_and() {
        let mut r = rule("go-http");
        r.repo_filters = Some(PatternFilters::include(["github\\.com/org/"]));
        r.language_filters = Some(PatternFilters::include(["go"]));
        r.text_content_filters = Some(PatternFilters::include(["net/http"]));

        assert!(rule_applies_to_file(&r, &file("main.go", "import \"net/http\"")));
        assert!(!rule_applies_to_file(&r, &file("main.go", "import \"fmt\"")));
        assert!(!rule_applies_to_file(&r, &file("main.rs", "net/http")));

        let mut other_repo = file("main.go", "net/http");
        other_repo.repo = "gitlab.com/else/repo".to_string();
        assert!(!rule_applies_to_file(&r, &other_repo));

        let mut repo_and_path = rule("org-cmd");
        repo_and_path.repo_filters = Some(PatternFilters::include(["github\\.com/org/"]));
        repo_and_path.path_filters = Some(PatternFilters::include(["^cmd/"]));
        assert!(rule_applies_to_file(&repo_and_path, &file("cmd/main.go", "")));
        assert!(!rule_applies_to_file(&repo_and_path, &file("pkg/main.go", "")));
    }

    #[test]
    fn language_match_is_exact_and_case_insensitive() {
        let mut r = rule("go");
        r.language_filters = Some(PatternFilters::include(["Go"]));
        assert!(rule_applies_to_file(&r, &file("main.go", "")));

        let mut c_only = rule("c");
        c_only.language_filters = Some(PatternFilters::include(["c"]));
        assert!(!rule_applies_to_file(&c_only, &file("main.cpp", "")));
        assert!(rule_applies_to_file(&c_only, &file("main.c", "")));
    }

    #[test]
    fn language_filter_needs_a_known_language() {
        let mut r = rule("no-python");
        r.language_filters = Some(PatternFilters::exclude(["python"]));
        assert!(rule_applies_to_file(&r, &file("main.rs", "")));
        assert!(!rule_applies_to_file(&r, &file("main.py", "")));
        assert!(!rule_applies_to_file(&r, &file("Makefile", "")));
    }

    #[test]
    fn any_language_of_a_header_can_pass() {
        let mut r = rule("cpp");
        r.language_filters = Some(PatternFilters::include(["cpp"]));
        assert!(rule_applies_to_file(&r, &file("include/api.h", "")));
    }

    #[test]
    fn invalid_regex_is_skipped() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut r = rule("broken");
        r.path_filters = Some(PatternFilters::include(["(unclosed", "\\.rs$"]));
        assert!(rule_applies_to_file(&r, &file("src/lib.rs", "")));

        let mut all_bad = rule("all-bad");
        all_bad.path_filters = Some(PatternFilters::include(["(unclosed"]));
        assert!(!rule_applies_to_file(&all_bad, &file("src/lib.rs", "")));

        let mut bad_exclude = rule("bad-exclude");
        bad_exclude.path_filters = Some(PatternFilters::exclude(["[z-a]"]));
        assert!(rule_applies_to_file(&bad_exclude, &file("src/lib.rs", "")));
    }

    #[test]
    fn empty_include_list_passes() {
        let mut r = rule("empty");
        r.path_filters = Some(PatternFilters::include(Vec::<String>::new()));
        assert!(rule_applies_to_file(&r, &file("src/lib.rs", "")));
    }

    #[test]
    fn applicable_rules_dedupes_and_sorts() {
        let mut rust_only = rule("zeta");
        rust_only.language_filters = Some(PatternFilters::include(["rust"]));
        let mut python_only = rule("alpha");
        python_only.language_filters = Some(PatternFilters::include(["python"]));
        let general = rule("beta");

        let compiled: Vec<CompiledRule> = vec![
            rust_only.clone().into(),
            general.clone().into(),
            python_only.into(),
            general.clone().into(),
        ];
        let names: Vec<&str> = applicable_rules(&compiled, &file("src/lib.rs", ""))
            .into_iter()
            .map(|r| r.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["beta", "zeta"]);
    }
}
