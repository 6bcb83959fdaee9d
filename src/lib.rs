/// This crate scores the similarity of two text documents with TF-IDF weighted term vectors.
pub mod vectorizer;
pub mod utils;
pub mod config;
pub mod document;
pub mod encoding;
pub mod error;
pub mod tokenizer;

/// Similarity Engine
/// The top-level struct of this crate.
/// It turns two documents into term vectors over a shared vocabulary and
/// returns the cosine of the angle between them.
///
/// Internally, it holds:
/// - The stopword set (read-only, shared)
/// - The IDF table (read-only, shared)
/// - The tokenizer used on every document line
/// - The top-K bound and the weighting choice
///
/// `SimilarityEngine<T, E>` has the following generic parameters:
/// - `T`: Tokenizer type (e.g., UnicodeWordTokenizer, or any closure)
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
///
/// Each comparison works on fresh frequency maps, vocabulary and vectors,
/// so the engine can be shared across threads and pairs scored in parallel.
///
/// # Examples
/// ```
/// use text_similarity::{IdfTable, SimilarityEngine, StopWordSet, WhitespaceTokenizer};
///
/// let stop_words = StopWordSet::parse("the\na\n");
/// let idf = IdfTable::parse("cat 0.5\ndog 0.3\nfish 1.0\n");
/// let engine = SimilarityEngine::new(stop_words, idf, WhitespaceTokenizer);
///
/// let score = engine.similarity("cat cat dog the", "dog fish the").unwrap();
/// assert!((score - 0.0826).abs() < 1e-4);
/// ```
pub use vectorizer::SimilarityEngine;

/// Similarity Report
/// Every intermediate stage of one comparison: raw, normalized and weighted
/// frequency maps, ranked lists, the shared vocabulary, both vectors and the score.
pub use vectorizer::{DocumentAnalysis, SimilarityReport};

/// Stopword set and IDF table
/// Line-oriented resources loaded once per engine and never mutated.
/// An unreadable resource is an error; malformed IDF lines are skipped.
pub use vectorizer::resource::{IdfTable, StopWordSet};

/// Frequency map
/// Term to value mapping for one document (raw, normalized or weighted).
pub use vectorizer::term::{count_terms, FrequencyMap};

/// TF IDF Calculation Engine Trait
/// Defines how raw counts are normalized and weighted.
/// `DefaultTFIDFEngine` divides by the number of distinct terms,
/// `OccurrenceTFIDFEngine` by the total token count.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, OccurrenceTFIDFEngine, TFIDFEngine};

/// Ranking and vocabulary
pub use vectorizer::vocabulary::{RankedList, Vocabulary, DEFAULT_TOP_K};

/// Dense vector aligned to a vocabulary
pub use vectorizer::vector::DocumentVector;

/// Vector comparison
pub use vectorizer::compare::{Compare, DefaultCompare};

pub use config::{EngineConfig, Weighting};
pub use document::Document;
pub use encoding::{LegacyDecoder, LossyUtf8Decoder, TextDecoder, Utf8Decoder};
pub use error::{ResourceKind, Result, SimilarityError};
pub use tokenizer::{Tokenizer, UnicodeWordTokenizer, WhitespaceTokenizer};
