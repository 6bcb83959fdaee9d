use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    encoding::TextDecoder,
    error::{Result, SimilarityError},
    tokenizer::Tokenizer,
};

/// Document struct
/// Line-oriented text already converted to the canonical encoding.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub lines: Vec<String>,
}

impl Document {
    /// Split canonical text into lines
    pub fn from_text(text: &str) -> Self {
        Document {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// Decode raw bytes line by line
    /// Lines are split on `\n` and a trailing `\r` is removed before decoding.
    pub fn from_bytes(raw: &[u8], decoder: &dyn TextDecoder) -> Result<Self> {
        let mut lines = Vec::new();
        for line in raw.split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            lines.push(decoder.decode(line)?);
        }
        // a terminating newline does not open another line
        if raw.last() == Some(&b'\n') {
            lines.pop();
        }
        Ok(Document { lines })
    }

    /// Read and decode a document file
    pub fn from_path<P: AsRef<Path>>(path: P, decoder: &dyn TextDecoder) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read(path).map_err(|source| SimilarityError::DocumentUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Document::from_bytes(&raw, decoder).map_err(|err| match err {
            SimilarityError::InvalidEncoding { context } => SimilarityError::InvalidEncoding {
                context: format!("{}: {}", path.display(), context),
            },
            other => other,
        })
    }

    /// Tokenize every line and concatenate the token streams
    pub fn tokens<T: Tokenizer + ?Sized>(&self, tokenizer: &T) -> Vec<String> {
        self.lines
            .iter()
            .flat_map(|line| tokenizer.tokenize(line))
            .collect()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Document::from_text(text)
    }
}
