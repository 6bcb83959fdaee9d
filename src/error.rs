use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Which line-oriented table a resource path was meant to populate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    StopWords,
    Idf,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::StopWords => write!(f, "stopword"),
            ResourceKind::Idf => write!(f, "idf"),
        }
    }
}

/// Errors produced while building an engine or scoring a document pair
#[derive(Debug, Error)]
pub enum SimilarityError {
    /// A stopword or IDF resource could not be opened or read.
    /// The engine is never built from a partially loaded table.
    #[error("{kind} resource unavailable: {}: {source}", .path.display())]
    ResourceUnavailable {
        kind: ResourceKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A document file could not be read
    #[error("document unavailable: {}: {source}", .path.display())]
    DocumentUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Two vectors built against different vocabularies were compared.
    /// This is a contract violation of the caller, not bad input.
    #[error("dimension mismatch: left vector has {left} dimensions, right has {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// Raw document bytes could not be decoded into the canonical encoding
    #[error("invalid encoding in {context}")]
    InvalidEncoding { context: String },

    #[error("invalid top-k: must be at least 1")]
    InvalidTopK,

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SimilarityError>;
