use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use ahash::RandomState;
use serde::{Deserialize, Serialize};

use crate::error::{ResourceKind, Result, SimilarityError};

/// StopWordSet struct
/// Read-only set of terms that are dropped before counting.
///
/// The resource format is one term per line.
/// Blank lines are skipped, they never become an empty-string entry.
///
/// # Examples
/// ```
/// use text_similarity::StopWordSet;
/// let stop_words = StopWordSet::parse("the\na\n\n");
/// assert!(stop_words.contains("the"));
/// assert!(!stop_words.contains(""));
/// assert_eq!(stop_words.len(), 2);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StopWordSet {
    terms: HashSet<String, RandomState>,
}

impl StopWordSet {
    /// Create an empty set
    pub fn new() -> Self {
        StopWordSet {
            terms: HashSet::with_hasher(RandomState::new()),
        }
    }

    /// Parse a stopword resource already held in memory
    pub fn parse(text: &str) -> Self {
        text.lines().filter_map(stop_word_line).collect()
    }

    /// Read a stopword resource line by line
    ///
    /// # Arguments
    /// * `reader` - buffered UTF-8 source
    ///
    /// A line that is not valid UTF-8 is skipped with a warning.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut set = StopWordSet::new();
        for_each_line(reader, |line_no, line| match line {
            Some(line) => {
                if let Some(term) = stop_word_line(line) {
                    set.terms.insert(term.to_string());
                }
            }
            None => log::warn!("skipping stopword line {line_no}: not valid utf-8"),
        })?;
        Ok(set)
    }

    /// Load a stopword resource from disk
    /// Failing to open or read the file is an error, never an empty set.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let set = File::open(path)
            .and_then(|file| StopWordSet::from_reader(BufReader::new(file)))
            .map_err(|source| SimilarityError::ResourceUnavailable {
                kind: ResourceKind::StopWords,
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("loaded {} stop words from {}", set.len(), path.display());
        Ok(set)
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
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
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|s| s.as_str())
    }
}

impl<S> FromIterator<S> for StopWordSet
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = StopWordSet::new();
        set.terms.extend(iter.into_iter().map(Into::into));
        set
    }
}

/// Feed each `\n`-terminated line of `reader` to `f`, 1-based line number first.
/// The line is `None` when its bytes are not valid UTF-8; a trailing `\r` is dropped.
/// Only I/O failures abort the read.
fn for_each_line<R, F>(mut reader: R, mut f: F) -> io::Result<()>
where
    R: BufRead,
    F: FnMut(usize, Option<&str>),
{
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        line_no += 1;
        let line = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        f(line_no, std::str::from_utf8(line).ok());
    }
}

#[inline]
fn stop_word_line(line: &str) -> Option<&str> {
    let term = line.trim();
    if term.is_empty() {
        None
    } else {
        Some(term)
    }
}

/// IdfTable struct
/// Read-only mapping from term to its inverse document frequency weight.
///
/// Each resource line is `<term><whitespace><weight>`.
/// Lines of any other shape (missing weight, extra fields, unparsable or
/// negative weight) are skipped and counted in `skipped_lines`.
/// When a term occurs twice the first weight is kept.
///
/// Looking up a term that is not in the table yields `0.0`,
/// so such terms carry no TF-IDF weight at all.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct IdfTable {
    weights: HashMap<String, f64, RandomState>,
    skipped_lines: usize,
}

impl IdfTable {
    /// Create an empty table
    pub fn new() -> Self {
        IdfTable {
            weights: HashMap::with_hasher(RandomState::new()),
            skipped_lines: 0,
        }
    }

    /// Parse an IDF resource already held in memory
    pub fn parse(text: &str) -> Self {
        let mut table = IdfTable::new();
        for line in text.lines() {
            table.push_line(line);
        }
        table
    }

    /// Read an IDF resource line by line
    ///
    /// # Arguments
    /// * `reader` - buffered UTF-8 source
    ///
    /// A line that is not valid UTF-8 counts as malformed.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut table = IdfTable::new();
        for_each_line(reader, |line_no, line| match line {
            Some(line) => table.push_line(line),
            None => {
                log::warn!("skipping idf line {line_no}: not valid utf-8");
                table.skipped_lines += 1;
            }
        })?;
        Ok(table)
    }

    /// Load an IDF resource from disk
    /// Failing to open or read the file is an error, never an empty table.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let table = File::open(path)
            .and_then(|file| IdfTable::from_reader(BufReader::new(file)))
            .map_err(|source| SimilarityError::ResourceUnavailable {
                kind: ResourceKind::Idf,
                path: path.to_path_buf(),
                source,
            })?;
        if table.skipped_lines > 0 {
            log::warn!(
                "skipped {} malformed lines in idf resource {}",
                table.skipped_lines,
                path.display()
            );
        }
        log::info!("loaded {} idf weights from {}", table.len(), path.display());
        Ok(table)
    }

    fn push_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        match parse_idf_line(line) {
            Some((term, weight)) => {
                self.weights.entry(term.to_string()).or_insert(weight);
            }
            None => {
                log::debug!("skipping malformed idf line: {:?}", line);
                self.skipped_lines += 1;
            }
        }
    }

    /// Insert or overwrite a single weight
    /// Negative and non-finite weights are ignored, `-0.0` is stored as `0.0`.
    pub fn insert(&mut self, term: &str, weight: f64) -> &mut Self {
        if weight.is_finite() && weight >= 0.0 {
            self.weights.insert(term.to_string(), weight + 0.0);
        }
        self
    }

    /// Get the weight of a term, `0.0` when absent
    #[inline]
    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.weights.contains_key(term)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Number of non-blank lines that did not parse as term + weight
    #[inline]
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(term, &weight)| (term.as_str(), weight))
    }
}

impl<S> FromIterator<(S, f64)> for IdfTable
where
    S: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut table = IdfTable::new();
        for (term, weight) in iter {
            table.insert(term.as_ref(), weight);
        }
        table
    }
}

fn parse_idf_line(line: &str) -> Option<(&str, f64)> {
    let mut fields = line.split_whitespace();
    let term = fields.next()?;
    let weight: f64 = fields.next()?.parse().ok()?;
    if fields.next().is_some() || !weight.is_finite() || weight < 0.0 {
        return None;
    }
    // `-0` parses to a negative zero, which sorts below 0.0 under total_cmp
    Some((term, weight + 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_skip_blank_lines() {
        let set = StopWordSet::parse("the\n\n  \na\r\n");
        assert_eq!(set.len(), 2);
        assert!(set.contains("the"));
        assert!(set.contains("a"));
        assert!(!set.contains(""));
    }

    #[test]
    fn stop_words_from_iterator() {
        let set: StopWordSet = ["de", "le"].into_iter().collect();
        assert!(set.contains("de"));
        assert!(!set.contains("la"));
    }

    #[test]
    fn idf_skips_malformed_lines() {
        let table = IdfTable::parse("cat 0.5\ndog\nfish 1.0 extra\nbird abc\nmouse -1\n\nowl\t2.25\n");
        assert_eq!(table.len(), 2);
        assert_eq!(table.skipped_lines(), 4);
        assert_eq!(table.weight("cat"), 0.5);
        assert_eq!(table.weight("owl"), 2.25);
    }

    #[test]
    fn idf_absent_term_weighs_zero() {
        let table = IdfTable::parse("cat 0.5\n");
        assert_eq!(table.weight("dog"), 0.0);
        assert!(!table.contains_term("dog"));
    }

    #[test]
    fn idf_keeps_first_duplicate() {
        let table = IdfTable::parse("cat 0.5\ncat 9.0\n");
        assert_eq!(table.weight("cat"), 0.5);
    }

    #[test]
    fn load_missing_resource_is_an_error() {
        let err = IdfTable::load("/nonexistent/idf.utf8").unwrap_err();
        match err {
            SimilarityError::ResourceUnavailable { kind, .. } => assert_eq!(kind, ResourceKind::Idf),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(StopWordSet::load("/nonexistent/stop_words.utf8").is_err());
    }

    #[test]
    fn idf_counts_non_utf8_line_as_malformed() {
        let mut raw = b"cat 0.5\n".to_vec();
        raw.extend_from_slice(&[0xb9, 0xfe]);
        raw.extend_from_slice(b" 1.0\r\ndog 0.3");
        let table = IdfTable::from_reader(&raw[..]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.skipped_lines(), 1);
        assert_eq!(table.weight("cat"), 0.5);
        assert_eq!(table.weight("dog"), 0.3);
    }

    #[test]
    fn stop_words_skip_non_utf8_line() {
        let mut raw = b"the\r\n".to_vec();
        raw.extend_from_slice(&[0xb5, 0xc4, b'\n']);
        raw.extend_from_slice(b"a\n");
        let set = StopWordSet::from_reader(&raw[..]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("the"));
        assert!(set.contains("a"));
    }

    #[test]
    fn idf_negative_zero_is_stored_as_zero() {
        let parsed = IdfTable::parse("apple -0\n");
        let inserted: IdfTable = [("apple", -0.0)].into_iter().collect();
        for table in [parsed, inserted] {
            assert_eq!(table.skipped_lines(), 0);
            let weights: Vec<(&str, f64)> = table.iter().collect();
            assert_eq!(weights.len(), 1);
            assert!(weights[0].1.is_sign_positive());
        }
    }
}
