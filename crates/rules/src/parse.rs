use serde_yaml::{Mapping, Value};
use url::Url;

use crate::error::Result;
use crate::paths::rule_display_name;
use crate::types::{PatternFilters, Rule};

/// Parse a `*.rule.md` file.
///
/// Optional YAML front matter between `---` lines supplies `title`,
/// `description`, `tags`, `lang` (a single language include filter) and the
/// `repo_filters` / `path_filters` / `language_filters` /
/// `text_content_filters` mappings. The Markdown body is the instruction.
/// Malformed front matter or fields are logged and ignored.
pub fn parse_rule_file(rule_uri: &Url, root_uri: &Url, content: &str) -> Rule {
    let mut rule = Rule::new(rule_uri.clone(), rule_display_name(rule_uri, root_uri));

    let (front_matter, body) = split_front_matter(content);
    if let Some(raw) = front_matter {
        match parse_front_matter(raw) {
            Ok(Some(mapping)) => apply_front_matter(&mut rule, &mapping),
            Ok(None) => log::warn!("Ignoring non-mapping front matter in {rule_uri}"),
            Err(err) => log::warn!("Ignoring front matter in {rule_uri}: {err}"),
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        rule.instruction = Some(body.to_string());
    }
    rule
}

/// Split `---` delimited front matter from the body. Content without a
/// closing delimiter is all body.
fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(after_open) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };
    if let Some(rest) = after_open.strip_prefix("---") {
        return (Some(""), rest);
    }
    match after_open.find("\n---") {
        Some(end) => {
            let rest = &after_open[end + "\n---".len()..];
            let body = rest.split_once('\n').map_or("", |(_, body)| body);
            (Some(&after_open[..end]), body)
        }
        None => (None, content),
    }
}

fn parse_front_matter(raw: &str) -> Result<Option<Mapping>> {
    if raw.trim().is_empty() {
        return Ok(Some(Mapping::new()));
    }
    let value: Value = serde_yaml::from_str(raw)?;
    Ok(match value {
        Value::Mapping(mapping) => Some(mapping),
        Value::Null => Some(Mapping::new()),
        _ => None,
    })
}

fn apply_front_matter(rule: &mut Rule, front_matter: &Mapping) {
    let field = |name: &str| front_matter.get(name);

    rule.title = field("title").and_then(Value::as_str).map(str::to_string);
    rule.description = field("description")
        .and_then(Value::as_str)
        .map(str::to_string);
    rule.tags = field("tags").and_then(|tags| {
        tags.as_sequence().map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
    });

    rule.repo_filters = filters_field(rule, field("repo_filters"), "repo_filters");
    rule.path_filters = filters_field(rule, field("path_filters"), "path_filters");
    rule.language_filters = filters_field(rule, field("language_filters"), "language_filters");
    rule.text_content_filters =
        filters_field(rule, field("text_content_filters"), "text_content_filters");

    if let Some(lang) = field("lang").and_then(Value::as_str) {
        let filters = rule.language_filters.get_or_insert_with(PatternFilters::default);
        filters.include = Some(vec![lang.to_string()]);
    }
}

fn filters_field(rule: &Rule, value: Option<&Value>, name: &str) -> Option<PatternFilters> {
    let value = value?;
    let filters = PatternFilters::from_yaml(value);
    if filters.is_none() {
        log::warn!("Ignoring malformed {name} in {}", rule.uri);
    }
    filters
}
