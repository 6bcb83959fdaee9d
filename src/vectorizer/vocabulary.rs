use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{utils::sort::sort_by_weight_desc, vectorizer::term::FrequencyMap};

/// Default number of top terms taken from each document
pub const DEFAULT_TOP_K: usize = 20;

/// RankedList struct
/// `(term, weight)` entries of one document, heaviest first.
/// Equal weights are ordered by term so the list is reproducible.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RankedList {
    pub entries: Vec<(String, f64)>,
}

impl RankedList {
    /// Rank every entry of a frequency map
    pub fn rank(freq: &FrequencyMap) -> Self {
        let mut entries: Vec<(String, f64)> = freq
            .iter()
            .map(|(term, value)| (term.to_string(), value))
            .collect();
        sort_by_weight_desc(&mut entries);
        RankedList { entries }
    }

    /// The first `min(k, len)` terms in rank order
    pub fn select_top(&self, k: usize) -> Vec<&str> {
        self.entries
            .iter()
            .take(k)
            .map(|(term, _)| term.as_str())
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(term, weight)| (term.as_str(), *weight))
    }
}

/// Vocabulary struct
/// Ordered, duplicate-free terms that define the vector dimensions of one comparison.
/// Position `i` of every vector built against it refers to `terms[i]`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    terms: IndexSet<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Vocabulary {
            terms: IndexSet::new(),
        }
    }

    /// Merge two top-term lists into one vocabulary
    /// All of `a` in order first, then the terms of `b` not yet present.
    pub fn union<A, B>(a: &[A], b: &[B]) -> Self
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut vocab = Vocabulary::new();
        vocab.extend_top(a);
        vocab.extend_top(b);
        vocab
    }

    /// Build the shared vocabulary of two ranked lists with `k` terms per side
    /// The result holds at most `2 * k` terms.
    pub fn from_ranked(a: &RankedList, b: &RankedList, k: usize) -> Self {
        Vocabulary::union(&a.select_top(k), &b.select_top(k))
    }

    /// Append terms in order, skipping ones already present
    pub fn extend_top<T: AsRef<str>>(&mut self, terms: &[T]) -> &mut Self {
        for term in terms {
            let term = term.as_ref();
            if !self.contains(term) {
                self.terms.insert(term.to_string());
            }
        }
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    /// Dimension index of a term
    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    /// Terms in dimension order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(entries: &[(&str, f64)]) -> FrequencyMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn rank_orders_by_weight_then_term() {
        let ranked = RankedList::rank(&freq(&[("dog", 0.15), ("cat", 0.5), ("bee", 0.15)]));
        let terms: Vec<&str> = ranked.iter().map(|(t, _)| t).collect();
        assert_eq!(terms, vec!["cat", "bee", "dog"]);
    }

    #[test]
    fn select_top_is_bounded() {
        let ranked = RankedList::rank(&freq(&[("a", 3.0), ("b", 2.0), ("c", 1.0)]));
        assert_eq!(ranked.select_top(2), vec!["a", "b"]);
        assert_eq!(ranked.select_top(10), vec!["a", "b", "c"]);
        assert!(ranked.select_top(0).is_empty());
    }

    #[test]
    fn union_keeps_a_then_new_b_terms() {
        let vocab = Vocabulary::union(&["cat", "dog"], &["dog", "fish"]);
        let terms: Vec<&str> = vocab.iter().collect();
        assert_eq!(terms, vec!["cat", "dog", "fish"]);
        assert_eq!(vocab.index_of("fish"), Some(2));
    }

    #[test]
    fn vocabulary_is_at_most_twice_k() {
        let a = RankedList::rank(&freq(&[("a", 5.0), ("b", 4.0), ("c", 3.0), ("d", 2.0)]));
        let b = RankedList::rank(&freq(&[("w", 5.0), ("x", 4.0), ("y", 3.0), ("z", 2.0)]));
        for k in 1..6 {
            assert!(Vocabulary::from_ranked(&a, &b, k).len() <= 2 * k);
        }
        assert_eq!(Vocabulary::from_ranked(&a, &b, 2).len(), 4);
    }

    #[test]
    fn union_is_deterministic() {
        let a = RankedList::rank(&freq(&[("x", 1.0), ("y", 1.0), ("z", 1.0)]));
        let b = RankedList::rank(&freq(&[("z", 1.0), ("y", 1.0), ("x", 1.0)]));
        let first = Vocabulary::from_ranked(&a, &b, 2);
        let second = Vocabulary::from_ranked(&a, &b, 2);
        assert_eq!(first, second);
        let terms: Vec<&str> = first.iter().collect();
        assert_eq!(terms, vec!["x", "y"]);
    }
}
