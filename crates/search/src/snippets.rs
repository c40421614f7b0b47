use context_protocol::{ContextItem, ContextItemSource, RangeData};
use url::Url;

use crate::error::Result;
use crate::jaccard::{best_jaccard_matches, JaccardMatch};

/// A document whose windows compete for the target text
#[derive(Debug, Clone)]
pub struct CandidateDocument {
    pub uri: Url,
    pub text: String,
}

impl CandidateDocument {
    pub fn new(uri: Url, text: impl Into<String>) -> Self {
        Self {
            uri,
            text: text.into(),
        }
    }
}

/// A Jaccard window tagged with the document it came from
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSnippet {
    pub uri: Url,
    pub matched: JaccardMatch,
}

impl RankedSnippet {
    /// Ranged context item covering the matched lines; lines past
    /// `u32::MAX` saturate
    pub fn into_context_item(self, source: ContextItemSource) -> ContextItem {
        let range = RangeData::lines(
            saturating_line(self.matched.start_line),
            saturating_line(self.matched.end_line),
        );
        ContextItem::file(self.uri)
            .with_range(range)
            .with_source(source)
            .with_content(self.matched.content)
    }
}

fn saturating_line(line: usize) -> u32 {
    u32::try_from(line).unwrap_or(u32::MAX)
}

/// Rank windows across `documents` against `target_text`.
///
/// Each document contributes at most `max_matches_per_document` windows;
/// the merged list is ordered by descending score, earlier documents first
/// on ties, and truncated to `limit`.
pub fn rank_snippets(
    target_text: &str,
    documents: &[CandidateDocument],
    window_size: usize,
    max_matches_per_document: usize,
    limit: usize,
) -> Result<Vec<RankedSnippet>> {
    let mut ranked = Vec::new();
    for document in documents {
        let matches = best_jaccard_matches(
            target_text,
            &document.text,
            window_size,
            max_matches_per_document,
        )?;
        ranked.extend(matches.into_iter().map(|matched| RankedSnippet {
            uri: document.uri.clone(),
            matched,
        }));
    }

    ranked.sort_by(|a, b| b.matched.score.total_cmp(&a.matched.score));
    ranked.truncate(limit);
    log::debug!(
        "Ranked {} snippets from {} documents",
        ranked.len(),
        documents.len()
    );
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(path: &str, text: &str) -> CandidateDocument {
        CandidateDocument::new(Url::parse(&format!("file://{path}")).unwrap(), text)
    }

    #[test]
    fn merges_documents_by_score() {
        let docs = vec![
            doc("/ws/a.rs", "unrelated\nwords\nhere"),
            doc("/ws/b.rs", "parse config\nload config file"),
        ];
        let ranked = rank_snippets("load the config file", &docs, 2, 1, 10).unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].uri.path(), "/ws/b.rs");
        assert!(ranked[0].matched.score > ranked[1].matched.score);
    }

    #[test]
    fn ties_keep_document_order_and_limit_applies() {
        let docs = vec![doc("/ws/a.rs", "alpha"), doc("/ws/b.rs", "alpha")];
        let ranked = rank_snippets("alpha", &docs, 5, 3, 1).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].uri.path(), "/ws/a.rs");
    }

    #[test]
    fn snippet_becomes_ranged_item() {
        let docs = vec![doc("/ws/a.rs", "one\ntwo\nthree\nfour")];
        let ranked = rank_snippets("three four", &docs, 2, 1, 1).unwrap();
        let item = ranked[0].clone().into_context_item(ContextItemSource::Search);

        assert_eq!(item.range, Some(RangeData::lines(2, 3)));
        assert_eq!(item.content.as_deref(), Some("three\nfour"));
        assert_eq!(item.source, Some(ContextItemSource::Search));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn line_numbers_past_u32_saturate() {
        let snippet = RankedSnippet {
            uri: Url::parse("file:///ws/huge.log").unwrap(),
            matched: JaccardMatch {
                score: 0.5,
                content: "tail".to_string(),
                start_line: 7,
                end_line: u32::MAX as usize + 10,
            },
        };
        let item = snippet.into_context_item(ContextItemSource::Search);
        assert_eq!(item.range, Some(RangeData::lines(7, u32::MAX)));
    }

    #[test]
    fn invalid_window_propagates() {
        let docs = vec![doc("/ws/a.rs", "alpha")];
        assert!(rank_snippets("alpha", &docs, 0, 1, 1).is_err());
    }
}
