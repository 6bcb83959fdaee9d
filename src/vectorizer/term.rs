use std::collections::HashMap;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

use crate::vectorizer::resource::StopWordSet;

/// FrequencyMap struct
/// Maps each term of one document to a non-negative real value.
///
/// The same shape carries three meanings along the pipeline:
/// - raw: occurrence counts (see `count_terms`)
/// - normalized: raw / number of distinct terms
/// - weighted: normalized * idf
///
/// Iteration order is the hash order and must never decide vector layout.
///
/// # Examples
/// ```
/// use text_similarity::FrequencyMap;
/// let mut freq = FrequencyMap::new();
/// freq.add_term("term1");
/// freq.add_term("term2");
/// freq.add_term("term1");
///
/// assert_eq!(freq.value("term1"), 2.0);
/// assert_eq!(freq.term_num(), 2);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FrequencyMap {
    values: HashMap<String, f64, RandomState>,
}

/// Implementation for building a FrequencyMap
impl FrequencyMap {
    /// Create a new FrequencyMap
    pub fn new() -> Self {
        FrequencyMap {
            values: HashMap::with_hasher(RandomState::new()),
        }
    }

    /// Create a FrequencyMap with room for `capacity` distinct terms
    pub fn with_capacity(capacity: usize) -> Self {
        FrequencyMap {
            values: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Count one occurrence of a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        match self.values.get_mut(term) {
            Some(count) => *count += 1.0,
            None => {
                self.values.insert(term.to_string(), 1.0);
            }
        }
        self
    }

    /// Count one occurrence of each term
    ///
    /// # Arguments
    /// * `terms` - Slice of terms to add
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Set the value for a term
    /// Negative and non-finite values are ignored, `-0.0` is stored as `0.0`.
    pub fn set_value(&mut self, term: &str, value: f64) -> &mut Self {
        if value.is_finite() && value >= 0.0 {
            self.values.insert(term.to_string(), value + 0.0);
        }
        self
    }

    /// Build a new map with every value passed through `f`
    pub fn map_values<F>(&self, mut f: F) -> FrequencyMap
    where
        F: FnMut(&str, f64) -> f64,
    {
        let mut out = FrequencyMap::with_capacity(self.values.len());
        for (term, &value) in &self.values {
            out.values.insert(term.clone(), f(term.as_str(), value));
        }
        out
    }
}

impl<T> From<&[T]> for FrequencyMap
where
    T: AsRef<str>,
{
    fn from(terms: &[T]) -> Self {
        let mut freq = FrequencyMap::new();
        freq.add_terms(terms);
        freq
    }
}

impl<S> FromIterator<(S, f64)> for FrequencyMap
where
    S: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut freq = FrequencyMap::new();
        for (term, value) in iter {
            freq.set_value(term.as_ref(), value);
        }
        freq
    }
}

/// Implementation for retrieving information from FrequencyMap
impl FrequencyMap {
    /// Get the value of a term, `0.0` when absent
    ///
    /// # Arguments
    /// * `term` - term
    #[inline]
    pub fn value(&self, term: &str) -> f64 {
        self.values.get(term).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn get(&self, term: &str) -> Option<f64> {
        self.values.get(term).copied()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.values.contains_key(term)
    }

    /// Get the number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all values
    /// For a raw map this is the number of counted tokens.
    #[inline]
    pub fn value_sum(&self) -> f64 {
        self.values.values().sum()
    }

    /// Get iterator over all terms and their values
    ///
    /// # Returns
    /// * `impl Iterator<Item=(&str, f64)>` - unordered
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(term, &value)| (term.as_str(), value))
    }
}

/// Count the tokens of one document into a raw FrequencyMap
/// Tokens present in `stop_words` are dropped entirely.
/// No case folding or stemming happens here.
///
/// # Arguments
/// * `tokens` - tokens in document order
/// * `stop_words` - terms to exclude
pub fn count_terms<I, T>(tokens: I, stop_words: &StopWordSet) -> FrequencyMap
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut freq = FrequencyMap::new();
    for token in tokens {
        let token = token.as_ref();
        if stop_words.contains(token) {
            continue;
        }
        freq.add_term(token);
    }
    freq
}
