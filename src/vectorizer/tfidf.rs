use crate::vectorizer::{resource::IdfTable, term::FrequencyMap};

/// Normalization and weighting steps of the pipeline
/// Implement this to plug a different TF scaling into `SimilarityEngine<T, E>`.
pub trait TFIDFEngine {
    /// Rescale a raw count map into relative frequencies
    /// # Arguments
    /// * `raw` - raw counts of one document
    /// # Returns
    /// * `FrequencyMap` - normalized map, empty for an empty input
    fn normalize(raw: &FrequencyMap) -> FrequencyMap;

    /// Multiply each normalized value by its IDF weight
    /// Terms absent from `idf` get weight `0.0`.
    fn weight(normalized: &FrequencyMap, idf: &IdfTable) -> FrequencyMap {
        normalized.map_values(|term, value| value * idf.weight(term))
    }
}

/// Default TF-IDF engine
/// Divides every count by the number of distinct terms in the document.
/// This is a rank-like scaling, not occurrence probability, and is kept as the
/// reference behavior so weighted values stay reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    pub fn new() -> Self {
        DefaultTFIDFEngine
    }
}

impl TFIDFEngine for DefaultTFIDFEngine {
    fn normalize(raw: &FrequencyMap) -> FrequencyMap {
        if raw.is_empty() {
            return FrequencyMap::new();
        }
        let distinct = raw.term_num() as f64;
        raw.map_values(|_, count| count / distinct)
    }
}

/// Textbook TF engine
/// Divides every count by the total number of counted tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct OccurrenceTFIDFEngine;

impl TFIDFEngine for OccurrenceTFIDFEngine {
    fn normalize(raw: &FrequencyMap) -> FrequencyMap {
        let total = raw.value_sum();
        if raw.is_empty() || total == 0.0 {
            return FrequencyMap::new();
        }
        raw.map_values(|_, count| count / total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn raw_a() -> FrequencyMap {
        FrequencyMap::from(&["cat", "cat", "dog"][..])
    }

    #[test]
    fn normalize_divides_by_distinct_terms() {
        let normalized = DefaultTFIDFEngine::normalize(&raw_a());
        assert!((normalized.value("cat") - 1.0).abs() < EPS);
        assert!((normalized.value("dog") - 0.5).abs() < EPS);
    }

    #[test]
    fn normalize_empty_is_empty() {
        assert!(DefaultTFIDFEngine::normalize(&FrequencyMap::new()).is_empty());
        assert!(OccurrenceTFIDFEngine::normalize(&FrequencyMap::new()).is_empty());
    }

    #[test]
    fn occurrence_normalize_divides_by_total() {
        let normalized = OccurrenceTFIDFEngine::normalize(&raw_a());
        assert!((normalized.value("cat") - 2.0 / 3.0).abs() < EPS);
        assert!((normalized.value("dog") - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn weight_suppresses_terms_without_idf() {
        let idf = IdfTable::parse("cat 0.5\n");
        let weighted = DefaultTFIDFEngine::weight(&DefaultTFIDFEngine::normalize(&raw_a()), &idf);
        assert!((weighted.value("cat") - 0.5).abs() < EPS);
        assert_eq!(weighted.get("dog"), Some(0.0));
    }
}
