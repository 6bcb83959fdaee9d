//! Engine configuration
//!
//! Loaded from TOML, e.g.
//! ```toml
//! stopwords_path = "dict/stop_words.utf8"
//! idf_path = "dict/idf.utf8"
//! top_k = 20
//! weighting = "tfidf"
//! ```

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SimilarityError},
    vectorizer::vocabulary::DEFAULT_TOP_K,
};

/// File name of the stopword resource inside a dictionary directory
pub const STOP_WORDS_FILE: &str = "stop_words.utf8";
/// File name of the IDF resource inside a dictionary directory
pub const IDF_FILE: &str = "idf.utf8";

/// Which frequency map feeds ranking and vectors
/// The same variant is always used for both documents of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// raw occurrence counts
    #[serde(rename = "raw")]
    RawFrequency,
    /// normalized frequency * idf
    #[default]
    TfIdf,
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weighting::RawFrequency => write!(f, "raw"),
            Weighting::TfIdf => write!(f, "tfidf"),
        }
    }
}

impl FromStr for Weighting {
    type Err = SimilarityError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "raw" | "frequency" => Ok(Weighting::RawFrequency),
            "tfidf" | "tf-idf" => Ok(Weighting::TfIdf),
            other => Err(SimilarityError::Config(format!("unknown weighting: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub stopwords_path: PathBuf,
    pub idf_path: PathBuf,
    /// terms taken from each document's ranked list
    pub top_k: usize,
    pub weighting: Weighting,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig::from_dict_dir("dict")
    }
}

impl EngineConfig {
    /// Use the `stop_words.utf8` / `idf.utf8` pair inside `dir`
    pub fn from_dict_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        EngineConfig {
            stopwords_path: dir.join(STOP_WORDS_FILE),
            idf_path: dir.join(IDF_FILE),
            top_k: DEFAULT_TOP_K,
            weighting: Weighting::default(),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| SimilarityError::Config(e.to_string()))
    }

    /// Read a TOML config file
    /// Relative resource paths are resolved against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| SimilarityError::Config(format!("{}: {}", path.display(), e)))?;
        let mut config = EngineConfig::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            config.stopwords_path = base.join(&config.stopwords_path);
            config.idf_path = base.join(&config.idf_path);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(SimilarityError::InvalidTopK);
        }
        Ok(())
    }
}
