use serde::{Deserialize, Serialize};

use crate::vectorizer::{term::FrequencyMap, vocabulary::Vocabulary};

/// DocumentVector struct
/// Dense values of one document laid out in vocabulary order.
/// No scaling happens here, values are copied from the frequency map.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DocumentVector {
    pub values: Vec<f64>,
}

impl DocumentVector {
    /// Build the vector of `freq` against `vocab`
    /// Terms of `vocab` missing from `freq` become `0.0`.
    pub fn build(vocab: &Vocabulary, freq: &FrequencyMap) -> Self {
        let mut values = Vec::with_capacity(vocab.len());
        for term in vocab.iter() {
            values.push(freq.value(term));
        }
        DocumentVector { values }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when every component is zero (or there are none)
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_follows_vocabulary_order() {
        let vocab = Vocabulary::union(&["cat", "dog"], &["fish"]);
        let freq: FrequencyMap = [("dog", 0.15), ("fish", 0.5), ("owl", 9.0)].into_iter().collect();
        let vec = DocumentVector::build(&vocab, &freq);
        assert_eq!(vec.values, vec![0.0, 0.15, 0.5]);
        assert!(!vec.is_zero());
    }

    #[test]
    fn build_empty_map_is_zero_vector() {
        let vocab = Vocabulary::union(&["cat"], &["dog"]);
        let vec = DocumentVector::build(&vocab, &FrequencyMap::new());
        assert_eq!(vec.len(), 2);
        assert!(vec.is_zero());
    }
}
