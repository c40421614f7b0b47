use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};

/// Word -> occurrence count
pub type WordBag = HashMap<String, usize>;

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "did", "do", "does", "doing", "down", "during", "each",
        "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
        "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it",
        "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now",
        "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out",
        "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
        "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
        "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
        "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "you",
        "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Bag of stemmed, lowercased words in `text`, English stop words removed.
/// Words are runs of alphanumerics and `_`, so `this.value` is two words.
pub fn word_occurrences(text: &str) -> WordBag {
    let mut bag = WordBag::new();
    let words = text
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty());
    for word in words {
        let lowered = word.to_lowercase();
        if STOP_WORDS.contains(lowered.as_str()) {
            continue;
        }
        let stemmed = STEMMER.stem(&lowered).into_owned();
        *bag.entry(stemmed).or_insert(0) += 1;
    }
    bag
}

/// Total number of words in a bag, counting multiplicity
pub fn bag_size(bag: &WordBag) -> usize {
    bag.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_repeated_words() {
        let bag = word_occurrences("foo bar foo");
        assert_eq!(bag.get("foo"), Some(&2));
        assert_eq!(bag.get("bar"), Some(&1));
        assert_eq!(bag_size(&bag), 3);
    }

    #[test]
    fn stems_and_lowercases() {
        let bag = word_occurrences("Running runs RUN");
        assert_eq!(bag.get("run"), Some(&3));
    }

    #[test]
    fn drops_stop_words_and_punctuation() {
        let bag = word_occurrences("if (the user) { return this.value; }");
        assert!(!bag.contains_key("the"));
        assert!(!bag.contains_key("if"));
        assert!(!bag.contains_key("this"));
        assert!(bag.contains_key("user"));
        assert!(bag.contains_key("return"));
        assert!(bag.contains_key("valu"));
    }

    #[test]
    fn blank_text_is_empty_bag() {
        assert!(word_occurrences("   \t ").is_empty());
        assert!(word_occurrences("{ } ( ) ;").is_empty());
    }
}
