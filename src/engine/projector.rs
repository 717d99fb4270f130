use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::engine::types::{SharedResult, WordStat};

// ============================================================================
// Filter state
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Frequency,
    Alphabetical,
}

/// Transient view state. Owned by the caller; not reset automatically across
/// generations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewFilter {
    pub search_term: String,
    pub sort_key: SortKey,
}

// ============================================================================
// FrequencyViewProjector
// ============================================================================

/// Recomputes a display-ready subset of the latest result's word list on
/// filter/sort changes. Reads the shared result cell, never writes it, and
/// has no suspension point — it may run while a generation is submitting and
/// sees the previous, still-valid result.
pub struct FrequencyViewProjector {
    result: SharedResult,
}

impl FrequencyViewProjector {
    pub fn new(result: SharedResult) -> Self {
        Self { result }
    }

    /// Empty sequence when no generation has succeeded yet — never an error.
    pub fn project(&self, filter: &ViewFilter) -> Vec<WordStat> {
        let guard = self.result.read().expect("result cell poisoned");
        match guard.as_ref() {
            Some(result) => project_words(&result.words, filter),
            None => Vec::new(),
        }
    }
}

/// Pure projection: case-insensitive substring filter, then sort.
/// Idempotent — identical `(words, filter)` yields identical ordered output.
pub fn project_words(words: &[WordStat], filter: &ViewFilter) -> Vec<WordStat> {
    // `to_lowercase` is unicode-aware; source text may be non-Latin script.
    let needle = filter.search_term.to_lowercase();
    let mut view: Vec<WordStat> = words
        .iter()
        .filter(|w| needle.is_empty() || w.word.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    match filter.sort_key {
        SortKey::Frequency => {
            // Stable sort: ties keep the service's original order.
            view.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        }
        SortKey::Alphabetical => {
            view.sort_by(|a, b| compare_words(&a.word, &b.word));
        }
    }
    view
}

/// Case-insensitive lexicographic comparison with a raw-code-point tiebreak,
/// so equal-ignoring-case words still order deterministically.
fn compare_words(a: &str, b: &str) -> Ordering {
    match a.to_lowercase().cmp(&b.to_lowercase()) {
        Ordering::Equal => a.cmp(b),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{new_result_cell, GenerationResult};
    use std::sync::Arc;

    fn stat(word: &str, frequency: u64, percentage: f64) -> WordStat {
        WordStat {
            word: word.into(),
            frequency,
            percentage,
        }
    }

    fn filter(term: &str, sort_key: SortKey) -> ViewFilter {
        ViewFilter {
            search_term: term.into(),
            sort_key,
        }
    }

    #[test]
    fn test_empty_before_first_generation() {
        let projector = FrequencyViewProjector::new(new_result_cell());
        assert!(projector.project(&ViewFilter::default()).is_empty());
    }

    #[test]
    fn test_projects_latest_result_by_frequency() {
        let cell = new_result_cell();
        *cell.write().unwrap() = Some(Arc::new(GenerationResult {
            image_bytes: vec![1],
            words: vec![stat("world", 1, 33.33), stat("hello", 2, 66.67)],
        }));
        let projector = FrequencyViewProjector::new(cell);

        let view = projector.project(&filter("", SortKey::Frequency));
        assert_eq!(view[0].word, "hello");
        assert_eq!(view[1].word, "world");
    }

    #[test]
    fn test_frequency_ties_keep_service_order() {
        let words = vec![stat("b", 3, 30.0), stat("a", 3, 30.0), stat("c", 4, 40.0)];
        let view = project_words(&words, &filter("", SortKey::Frequency));
        let order: Vec<&str> = view.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_alphabetical_is_case_insensitive() {
        let words = vec![stat("banana", 1, 25.0), stat("Apple", 1, 25.0), stat("cherry", 2, 50.0)];
        let view = project_words(&words, &filter("", SortKey::Alphabetical));
        let order: Vec<&str> = view.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(order, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let words = vec![stat("Hello", 2, 50.0), stat("shell", 1, 25.0), stat("world", 1, 25.0)];
        let view = project_words(&words, &filter("HELL", SortKey::Frequency));
        let order: Vec<&str> = view.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(order, vec!["Hello", "shell"]);
    }

    #[test]
    fn test_filter_handles_multibyte_scripts() {
        let words = vec![stat("안녕하세요", 3, 60.0), stat("세계", 2, 40.0)];
        let view = project_words(&words, &filter("하세", SortKey::Frequency));
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].word, "안녕하세요");
    }

    #[test]
    fn test_idempotent() {
        let words = vec![stat("b", 1, 20.0), stat("a", 2, 40.0), stat("ab", 2, 40.0)];
        let f = filter("a", SortKey::Alphabetical);
        assert_eq!(project_words(&words, &f), project_words(&words, &f));
    }

    #[test]
    fn test_hello_world_scenario() {
        // generate({text: "hello hello world"}) →
        // project({searchTerm: "", sortKey: frequency}) = [hello, world]
        let words = vec![stat("hello", 2, 66.67), stat("world", 1, 33.33)];
        let view = project_words(&words, &filter("", SortKey::Frequency));
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].word, "hello");
        assert_eq!(view[1].word, "world");
    }
}
