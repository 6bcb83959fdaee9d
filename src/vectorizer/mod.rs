pub mod compare;
pub mod resource;
pub mod term;
pub mod tfidf;
pub mod vector;
pub mod vocabulary;

use std::{fmt, marker::PhantomData, path::Path, sync::Arc};

use rayon::prelude::*;
use serde::Serialize;

use crate::{
    config::{EngineConfig, Weighting},
    document::Document,
    encoding::TextDecoder,
    error::{Result, SimilarityError},
    tokenizer::{Tokenizer, UnicodeWordTokenizer},
    vectorizer::{
        compare::{Compare, DefaultCompare},
        resource::{IdfTable, StopWordSet},
        term::{count_terms, FrequencyMap},
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        vector::DocumentVector,
        vocabulary::{RankedList, Vocabulary, DEFAULT_TOP_K},
    },
};

/// Pairwise similarity engine
///
/// Holds the two read-only tables (stopwords, IDF) and the tokenizer.
/// Every comparison builds its frequency maps, vocabulary and vectors from
/// scratch, so one engine can score any number of pairs, concurrently if
/// wanted (see `similarity_batch`).
///
/// `SimilarityEngine<T, E>` has the following generic parameters:
/// - `T`: tokenizer applied to each document line
/// - `E`: normalization / weighting engine (e.g., DefaultTFIDFEngine)
#[derive(Debug, Clone)]
pub struct SimilarityEngine<T = UnicodeWordTokenizer, E = DefaultTFIDFEngine>
where
    T: Tokenizer,
    E: TFIDFEngine,
{
    stop_words: Arc<StopWordSet>,
    idf: Arc<IdfTable>,
    tokenizer: T,
    top_k: usize,
    weighting: Weighting,
    _marker: PhantomData<E>,
}

/// Per-document stages of one comparison
#[derive(Debug, Clone, Serialize)]
pub struct DocumentAnalysis {
    pub raw: FrequencyMap,
    pub normalized: FrequencyMap,
    pub weighted: FrequencyMap,
    /// ranked list of the map selected by the weighting
    pub ranked: RankedList,
    pub vector: DocumentVector,
}

/// Every intermediate value of one comparison
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityReport {
    pub weighting: Weighting,
    pub top_k: usize,
    pub a: DocumentAnalysis,
    pub b: DocumentAnalysis,
    pub vocabulary: Vocabulary,
    pub score: f64,
}

impl<T> SimilarityEngine<T, DefaultTFIDFEngine>
where
    T: Tokenizer,
{
    /// Create an engine with the default TF-IDF engine, top-k 20 and TF-IDF weighting
    pub fn new(stop_words: StopWordSet, idf: IdfTable, tokenizer: T) -> Self {
        SimilarityEngine::with_engine(stop_words, idf, tokenizer)
    }

    /// Load both resources named by `config`
    /// Any unreadable resource fails the construction.
    pub fn from_config(config: &EngineConfig, tokenizer: T) -> Result<Self> {
        config.validate()?;
        let stop_words = StopWordSet::load(&config.stopwords_path)?;
        let idf = IdfTable::load(&config.idf_path)?;
        Ok(SimilarityEngine::new(stop_words, idf, tokenizer)
            .with_top_k(config.top_k)?
            .with_weighting(config.weighting))
    }
}

impl<T, E> SimilarityEngine<T, E>
where
    T: Tokenizer,
    E: TFIDFEngine,
{
    /// Create an engine with an explicit normalization / weighting engine
    pub fn with_engine(stop_words: StopWordSet, idf: IdfTable, tokenizer: T) -> Self {
        SimilarityEngine::from_shared(Arc::new(stop_words), Arc::new(idf), tokenizer)
    }

    /// Create an engine over tables shared with other engines
    pub fn from_shared(stop_words: Arc<StopWordSet>, idf: Arc<IdfTable>, tokenizer: T) -> Self {
        SimilarityEngine {
            stop_words,
            idf,
            tokenizer,
            top_k: DEFAULT_TOP_K,
            weighting: Weighting::default(),
            _marker: PhantomData,
        }
    }

    /// Set how many top terms each document contributes to the vocabulary
    pub fn with_top_k(mut self, top_k: usize) -> Result<Self> {
        if top_k == 0 {
            return Err(SimilarityError::InvalidTopK);
        }
        self.top_k = top_k;
        Ok(self)
    }

    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    #[inline]
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    #[inline]
    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    #[inline]
    pub fn stop_words(&self) -> &Arc<StopWordSet> {
        &self.stop_words
    }

    #[inline]
    pub fn idf(&self) -> &Arc<IdfTable> {
        &self.idf
    }
}

/// Pipeline stages
impl<T, E> SimilarityEngine<T, E>
where
    T: Tokenizer,
    E: TFIDFEngine,
{
    /// Raw counts of one token stream, stopwords removed
    pub fn frequencies<I, S>(&self, tokens: I) -> FrequencyMap
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        count_terms(tokens, &self.stop_words)
    }

    /// Normalized map of a raw map
    pub fn normalize(&self, raw: &FrequencyMap) -> FrequencyMap {
        E::normalize(raw)
    }

    /// TF-IDF map of a normalized map
    pub fn weight(&self, normalized: &FrequencyMap) -> FrequencyMap {
        E::weight(normalized, &self.idf)
    }

    /// Raw, normalized and weighted maps of one token stream
    fn stages<S: AsRef<str>>(&self, tokens: &[S]) -> (FrequencyMap, FrequencyMap, FrequencyMap) {
        let raw = self.frequencies(tokens);
        let normalized = self.normalize(&raw);
        let weighted = self.weight(&normalized);
        (raw, normalized, weighted)
    }

    fn selected<'m>(&self, raw: &'m FrequencyMap, weighted: &'m FrequencyMap) -> &'m FrequencyMap {
        match self.weighting {
            Weighting::RawFrequency => raw,
            Weighting::TfIdf => weighted,
        }
    }
}

/// Similarity entry points
impl<T, E> SimilarityEngine<T, E>
where
    T: Tokenizer,
    E: TFIDFEngine,
{
    /// Similarity of two canonical texts
    pub fn similarity(&self, doc_a: &str, doc_b: &str) -> Result<f64> {
        self.similarity_documents(&Document::from_text(doc_a), &Document::from_text(doc_b))
    }

    /// Similarity of two documents, each tokenized line by line
    pub fn similarity_documents(&self, doc_a: &Document, doc_b: &Document) -> Result<f64> {
        self.similarity_tokens(&doc_a.tokens(&self.tokenizer), &doc_b.tokens(&self.tokenizer))
    }

    /// Similarity of two token streams that skip the tokenizer
    pub fn similarity_tokens<S: AsRef<str>>(&self, tokens_a: &[S], tokens_b: &[S]) -> Result<f64> {
        let (raw_a, _, weighted_a) = self.stages(tokens_a);
        let (raw_b, _, weighted_b) = self.stages(tokens_b);
        let map_a = self.selected(&raw_a, &weighted_a);
        let map_b = self.selected(&raw_b, &weighted_b);

        let vocab = Vocabulary::from_ranked(&RankedList::rank(map_a), &RankedList::rank(map_b), self.top_k);
        let vec_a = DocumentVector::build(&vocab, map_a);
        let vec_b = DocumentVector::build(&vocab, map_b);
        self.score(&vec_a, &vec_b)
    }

    /// Read, decode and compare two document files
    pub fn similarity_files<P, Q>(&self, path_a: P, path_b: Q, decoder: &dyn TextDecoder) -> Result<f64>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let doc_a = Document::from_path(path_a, decoder)?;
        let doc_b = Document::from_path(path_b, decoder)?;
        self.similarity_documents(&doc_a, &doc_b)
    }

    /// Score many independent pairs in parallel over the shared tables
    /// Results keep the order of `pairs`.
    pub fn similarity_batch<A, B>(&self, pairs: &[(A, B)]) -> Vec<Result<f64>>
    where
        A: AsRef<str> + Sync,
        B: AsRef<str> + Sync,
        E: Send + Sync,
    {
        pairs
            .par_iter()
            .map(|(a, b)| self.similarity(a.as_ref(), b.as_ref()))
            .collect()
    }

    /// Compare two documents and keep every intermediate stage
    pub fn analyze(&self, doc_a: &Document, doc_b: &Document) -> Result<SimilarityReport> {
        let tokens_a = doc_a.tokens(&self.tokenizer);
        let tokens_b = doc_b.tokens(&self.tokenizer);
        let (raw_a, normalized_a, weighted_a) = self.stages(&tokens_a);
        let (raw_b, normalized_b, weighted_b) = self.stages(&tokens_b);

        let ranked_a = RankedList::rank(self.selected(&raw_a, &weighted_a));
        let ranked_b = RankedList::rank(self.selected(&raw_b, &weighted_b));
        let vocabulary = Vocabulary::from_ranked(&ranked_a, &ranked_b, self.top_k);
        let vector_a = DocumentVector::build(&vocabulary, self.selected(&raw_a, &weighted_a));
        let vector_b = DocumentVector::build(&vocabulary, self.selected(&raw_b, &weighted_b));
        let score = self.score(&vector_a, &vector_b)?;

        Ok(SimilarityReport {
            weighting: self.weighting,
            top_k: self.top_k,
            a: DocumentAnalysis {
                raw: raw_a,
                normalized: normalized_a,
                weighted: weighted_a,
                ranked: ranked_a,
                vector: vector_a,
            },
            b: DocumentAnalysis {
                raw: raw_b,
                normalized: normalized_b,
                weighted: weighted_b,
                ranked: ranked_b,
                vector: vector_b,
            },
            vocabulary,
            score,
        })
    }

    fn score(&self, vec_a: &DocumentVector, vec_b: &DocumentVector) -> Result<f64> {
        if vec_a.is_zero() || vec_b.is_zero() {
            log::warn!("degenerate document vector, similarity is 0");
        }
        let score = DefaultCompare::cosine_similarity(vec_a.as_slice(), vec_b.as_slice())?;
        log::debug!(
            "vocabulary {} terms ({} weighting, top {}), score {:.6}",
            vec_a.len(),
            self.weighting,
            self.top_k,
            score
        );
        Ok(score)
    }
}

impl fmt::Display for SimilarityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "weighting: {} (top {})", self.weighting, self.top_k)?;
        for (label, doc) in [("a", &self.a), ("b", &self.b)] {
            writeln!(f, "document {label}: {} distinct terms", doc.raw.term_num())?;
            write!(f, "  ranked:")?;
            for (term, weight) in doc.ranked.iter().take(self.top_k) {
                write!(f, " {term}:{weight:.6}")?;
            }
            writeln!(f)?;
        }
        write!(f, "vocabulary:")?;
        for term in self.vocabulary.iter() {
            write!(f, " {term}")?;
        }
        writeln!(f)?;
        writeln!(f, "vector a: {:?}", self.a.vector.values)?;
        writeln!(f, "vector b: {:?}", self.b.vector.values)?;
        write!(f, "similarity: {:.6}", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::WhitespaceTokenizer;

    const EPS: f64 = 1e-9;

    fn engine() -> SimilarityEngine<WhitespaceTokenizer> {
        let stop_words: StopWordSet = ["the", "a"].into_iter().collect();
        let idf: IdfTable = [("cat", 0.5), ("dog", 0.3), ("fish", 1.0)].into_iter().collect();
        SimilarityEngine::new(stop_words, idf, WhitespaceTokenizer)
    }

    #[test]
    fn reference_pair_scores_as_expected() {
        let report = engine()
            .analyze(&Document::from_text("cat cat dog the"), &Document::from_text("dog fish the"))
            .unwrap();

        assert_eq!(report.a.raw.value("cat"), 2.0);
        assert_eq!(report.a.raw.value("dog"), 1.0);
        assert!((report.a.normalized.value("dog") - 0.5).abs() < EPS);
        assert!((report.a.weighted.value("dog") - 0.15).abs() < EPS);
        assert!((report.b.weighted.value("fish") - 0.5).abs() < EPS);

        let terms: Vec<&str> = report.vocabulary.iter().collect();
        assert_eq!(terms, vec!["cat", "dog", "fish"]);
        assert!((report.score - 0.0225 / 0.2725).abs() < 1e-9);
        assert!((report.score - 0.0826).abs() < 1e-4);
    }

    #[test]
    fn similarity_matches_analyze() {
        let engine = engine();
        let score = engine.similarity("cat cat dog the", "dog fish the").unwrap();
        let report = engine
            .analyze(&Document::from("cat cat dog the"), &Document::from("dog fish the"))
            .unwrap();
        assert_eq!(score, report.score);
    }

    #[test]
    fn raw_weighting_uses_counts() {
        let engine = engine().with_weighting(Weighting::RawFrequency);
        // a = [cat:2, dog:1], b = [dog:1, fish:1] over [cat, dog, fish]
        let score = engine.similarity("cat cat dog", "dog fish").unwrap();
        let expected = 1.0 / (5.0_f64.sqrt() * 2.0_f64.sqrt());
        assert!((score - expected).abs() < EPS);
    }

    #[test]
    fn zero_top_k_is_rejected() {
        assert!(matches!(engine().with_top_k(0), Err(SimilarityError::InvalidTopK)));
    }

    #[test]
    fn all_stop_word_document_scores_zero() {
        let score = engine().similarity("the a the", "cat dog").unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn top_k_bounds_the_vocabulary() {
        let engine = engine().with_top_k(1).unwrap();
        let report = engine
            .analyze(&Document::from("cat cat dog"), &Document::from("fish dog"))
            .unwrap();
        assert!(report.vocabulary.len() <= 2);
        let terms: Vec<&str> = report.vocabulary.iter().collect();
        assert_eq!(terms, vec!["cat", "fish"]);
    }

    #[test]
    fn negative_zero_idf_ties_by_term() {
        let idf = IdfTable::parse("apple -0\n");
        let engine = SimilarityEngine::new(StopWordSet::new(), idf, WhitespaceTokenizer);
        let weighted = engine.weight(&engine.normalize(&engine.frequencies(["zebra", "apple"])));
        let ranked = RankedList::rank(&weighted);
        assert_eq!(ranked.select_top(2), vec!["apple", "zebra"]);
    }

    #[test]
    fn report_display_lists_stages() {
        let report = engine()
            .analyze(&Document::from("cat dog"), &Document::from("dog"))
            .unwrap();
        let text = report.to_string();
        assert!(text.contains("vocabulary: cat dog"));
        assert!(text.starts_with("weighting: tfidf (top 20)"));
        assert!(text.contains("similarity:"));
    }
}
