#![cfg(unix)]

use std::path::Path;

use context_ignore::{IgnoreEngine, IgnoreFileContent};
use context_protocol::{ContextItem, ContextItemSource, RangeData};
use context_search::{rank_snippets, CandidateDocument};
use context_selector::{ContextSelector, SelectionProfile, SelectorError};
use pretty_assertions::assert_eq;
use url::Url;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn uri(path: &str) -> Url {
    Url::from_file_path(path).expect("file url")
}

fn ranged(path: &str, start: u32, end: u32, content: &str) -> ContextItem {
    ContextItem::file(uri(path))
        .with_range(RangeData::lines(start, end))
        .with_content(content)
}

fn workspace_engine() -> IgnoreEngine {
    let mut engine = IgnoreEngine::new();
    engine
        .set_ignore_files(
            Path::new("/ws"),
            vec![IgnoreFileContent::new("/ws/.cody/ignore", "secrets/\n")],
        )
        .expect("ignore files");
    engine
}

fn no_history() -> Vec<ContextItem> {
    Vec::new()
}

fn profile(max_chars: usize) -> SelectionProfile {
    SelectionProfile {
        max_chars,
        ..SelectionProfile::default()
    }
}

#[test]
fn ignored_items_are_reported_not_selected() {
    init_logging();
    let engine = workspace_engine();
    let mut selector = ContextSelector::new(&engine, profile(1_000), no_history()).expect("selector");

    let keep = ranged("/ws/src/lib.rs", 0, 3, "fn main() {}");
    let secret = ranged("/ws/secrets/key.pem", 0, 1, "-----BEGIN");
    let env = ContextItem::file(uri("/ws/.env")).with_content("TOKEN=1");
    let remote = ContextItem::file(Url::parse("https://example.com/a.rs").expect("url"));

    let outcome = selector
        .try_add(vec![keep.clone(), secret.clone(), env.clone(), remote.clone()])
        .expect("try_add");

    assert_eq!(outcome.added, vec![keep.clone()]);
    assert_eq!(outcome.ignored, vec![secret, env, remote]);
    assert!(!outcome.limit_reached);
    assert_eq!(selector.into_items(), vec![keep]);
}

#[test]
fn ignore_rules_can_be_bypassed() {
    let engine = workspace_engine();
    let lenient = SelectionProfile {
        respect_ignore: false,
        ..profile(1_000)
    };
    let mut selector = ContextSelector::new(&engine, lenient, no_history()).expect("selector");
    let secret = ranged("/ws/secrets/key.pem", 0, 1, "-----BEGIN");
    let outcome = selector.try_add(vec![secret.clone()]).expect("try_add");
    assert_eq!(outcome.added, vec![secret]);
}

#[test]
fn budget_overflow_drops_content_and_continues() {
    let engine = workspace_engine();
    let mut selector = ContextSelector::new(&engine, profile(10), no_history()).expect("selector");

    let big = ranged("/ws/a.rs", 0, 3, "0123456789abc");
    let small = ranged("/ws/b.rs", 0, 3, "0123");
    let sized = ContextItem::file(uri("/ws/c.rs")).with_size(6);

    let outcome = selector
        .try_add(vec![big.clone(), small.clone(), sized.clone()])
        .expect("try_add");

    assert!(outcome.limit_reached);
    assert_eq!(outcome.added, vec![small.clone(), sized.clone()]);
    assert_eq!(outcome.ignored.len(), 1);
    assert_eq!(outcome.ignored[0].uri, big.uri);
    assert_eq!(outcome.ignored[0].content, None);
    assert_eq!(selector.remaining_chars(), 0);
}

#[test]
fn replacement_refunds_the_replaced_cost() {
    let engine = workspace_engine();
    let mut selector = ContextSelector::new(&engine, profile(10), no_history()).expect("selector");

    let narrow = ranged("/ws/a.rs", 2, 3, "12345678");
    let wide = ranged("/ws/a.rs", 0, 5, "1234567890");

    let first = selector.try_add(vec![narrow.clone()]).expect("first");
    assert_eq!(first.added, vec![narrow]);
    assert_eq!(selector.remaining_chars(), 2);

    let second = selector.try_add(vec![wide.clone()]).expect("second");
    assert!(!second.limit_reached);
    assert_eq!(second.added, vec![wide.clone()]);
    assert_eq!(selector.remaining_chars(), 0);
    assert_eq!(selector.into_items(), vec![wide]);
}

#[test]
fn redundant_items_are_skipped_silently() {
    let engine = workspace_engine();
    let mut selector = ContextSelector::new(&engine, profile(1_000), no_history()).expect("selector");

    let wide = ranged("/ws/a.rs", 0, 10, "wide");
    let inner = ranged("/ws/a.rs", 2, 4, "inner");
    let outcome = selector
        .try_add(vec![wide.clone(), inner, wide.clone()])
        .expect("try_add");

    assert_eq!(outcome.added, vec![wide]);
    assert!(outcome.ignored.is_empty());
    assert_eq!(selector.remaining_chars(), 1_000 - 4);
}

#[test]
fn items_replaced_within_a_call_are_not_reported_as_added() {
    let engine = workspace_engine();
    let mut selector = ContextSelector::new(&engine, profile(1_000), no_history()).expect("selector");

    let narrow = ranged("/ws/a.rs", 2, 3, "narrow");
    let user = ContextItem::file(uri("/ws/a.rs")).with_source(ContextItemSource::User);
    let outcome = selector
        .try_add(vec![narrow, user.clone()])
        .expect("try_add");
    assert_eq!(outcome.added, vec![user]);
}

#[test]
fn previous_pass_seeds_history() {
    let engine = workspace_engine();
    let mut first = ContextSelector::new(&engine, profile(1_000), no_history()).expect("selector");
    let wide = ranged("/ws/a.rs", 0, 10, "wide");
    first.try_add(vec![wide.clone()]).expect("first pass");
    let history = first.into_items();

    let mut second = ContextSelector::new(&engine, profile(1_000), history).expect("selector");
    let outcome = second
        .try_add(vec![wide, ranged("/ws/a.rs", 3, 4, "inner")])
        .expect("second pass");
    assert!(outcome.added.is_empty());
    assert!(second.items().is_empty());
}

#[test]
fn ranked_snippets_flow_into_selection() {
    let engine = workspace_engine();
    let documents = vec![
        CandidateDocument::new(
            uri("/ws/src/config.rs"),
            "fn load_config(path: &Path) -> Config {\n    parse_config(read(path))\n}\n\nfn unrelated() {}",
        ),
        CandidateDocument::new(uri("/ws/secrets/config.rs"), "load config secret"),
    ];
    let snippets = rank_snippets("load config from path", &documents, 3, 1, 10).expect("rank");
    let items: Vec<ContextItem> = snippets
        .into_iter()
        .map(|snippet| snippet.into_context_item(ContextItemSource::Search))
        .collect();

    let mut selector = ContextSelector::new(&engine, profile(1_000), no_history()).expect("selector");
    let outcome = selector.try_add(items).expect("try_add");

    assert_eq!(outcome.added.len(), 1);
    assert_eq!(outcome.added[0].uri, uri("/ws/src/config.rs"));
    assert_eq!(outcome.added[0].range, Some(RangeData::lines(0, 2)));
    assert_eq!(outcome.ignored.len(), 1);
}

#[test]
fn invalid_profile_is_rejected() {
    let engine = IgnoreEngine::new();
    let err = ContextSelector::new(&engine, profile(0), no_history()).unwrap_err();
    assert!(matches!(err, SelectorError::InvalidArgument(_)));
}
