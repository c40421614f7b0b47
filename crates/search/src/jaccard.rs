use std::collections::HashMap;

use crate::error::{Result, SearchError};
use crate::tokenize::{bag_size, word_occurrences, WordBag};

/// One scored window of the match text
#[derive(Debug, Clone, PartialEq)]
pub struct JaccardMatch {
    pub score: f64,
    pub content: String,
    /// First line of the window (0-based)
    pub start_line: usize,
    /// Last line of the window (0-based, inclusive)
    pub end_line: usize,
}

/// Jaccard similarity from bag sizes and their shared count
pub fn jaccard_similarity(left: usize, right: usize, intersection: usize) -> Result<f64> {
    let total = left + right;
    if intersection > total {
        return Err(SearchError::InvariantViolation(format!(
            "intersection {intersection} exceeds combined bag size {total}"
        )));
    }
    let union = total - intersection;
    if union == 0 {
        return Ok(0.0);
    }
    Ok(intersection as f64 / union as f64)
}

/// Find the windows of `match_text` most similar to `target_text`.
///
/// `match_text` is cut into windows of `window_size` lines (a single window
/// when it is shorter). Windows are ranked by Jaccard similarity of their
/// stemmed word bags against the target, then kept greedily so that no two
/// returned windows share a line. At most `max_matches` are returned.
pub fn best_jaccard_matches(
    target_text: &str,
    match_text: &str,
    window_size: usize,
    max_matches: usize,
) -> Result<Vec<JaccardMatch>> {
    if window_size < 1 {
        return Err(SearchError::InvalidArgument(
            "window_size must be at least 1".to_string(),
        ));
    }

    let target = word_occurrences(target_text);
    let lines: Vec<&str> = match_text.split('\n').collect();
    let line_bags: Vec<WordBag> = lines.iter().map(|line| word_occurrences(line)).collect();

    let width = window_size.min(lines.len());
    let last_start = lines.len() - width;

    let mut window = WindowBag::new(&target);
    for bag in &line_bags[..width] {
        window.add(bag);
    }

    let mut scored: Vec<(f64, usize)> = Vec::new();
    for start in 0..=last_start {
        if start > 0 {
            window.remove(&line_bags[start - 1]);
            window.add(&line_bags[start + width - 1]);
        }
        if lines[start].trim().is_empty() && start != last_start {
            continue;
        }
        scored.push((window.score()?, start));
    }

    // Stable sort keeps earlier windows first among equal scores.
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut claimed = vec![false; lines.len()];
    let mut matches = Vec::new();
    for (score, start) in scored {
        if matches.len() >= max_matches {
            break;
        }
        let end = start + width;
        if claimed[start..end].iter().any(|taken| *taken) {
            continue;
        }
        claimed[start..end].iter_mut().for_each(|taken| *taken = true);
        matches.push(JaccardMatch {
            score,
            content: lines[start..end].join("\n"),
            start_line: start,
            end_line: end - 1,
        });
    }

    log::trace!(
        "Jaccard: {} lines, window {}, {} matches",
        lines.len(),
        width,
        matches.len()
    );
    Ok(matches)
}

/// Word counts of the current window plus running totals against the target
struct WindowBag<'a> {
    target: &'a WordBag,
    target_size: usize,
    words: HashMap<&'a str, usize>,
    size: usize,
    intersection: usize,
}

impl<'a> WindowBag<'a> {
    fn new(target: &'a WordBag) -> Self {
        Self {
            target,
            target_size: bag_size(target),
            words: HashMap::new(),
            size: 0,
            intersection: 0,
        }
    }

    fn add(&mut self, line: &'a WordBag) {
        for (word, count) in line {
            let current = self.words.entry(word.as_str()).or_insert(0);
            let cap = self.target.get(word).copied().unwrap_or(0);
            let before = (*current).min(cap);
            *current += count;
            self.intersection += (*current).min(cap) - before;
            self.size += count;
        }
    }

    fn remove(&mut self, line: &'a WordBag) {
        for (word, count) in line {
            let Some(current) = self.words.get_mut(word.as_str()) else {
                continue;
            };
            let cap = self.target.get(word).copied().unwrap_or(0);
            let before = (*current).min(cap);
            *current = current.saturating_sub(*count);
            self.intersection -= before - (*current).min(cap);
            self.size = self.size.saturating_sub(*count);
            if *current == 0 {
                self.words.remove(word.as_str());
            }
        }
    }

    fn score(&self) -> Result<f64> {
        jaccard_similarity(self.target_size, self.size, self.intersection)
    }
}
