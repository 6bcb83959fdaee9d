use unicode_segmentation::UnicodeSegmentation;

/// Splits one line of canonical text into terms.
///
/// The engine treats a tokenizer as an opaque, deterministic function per line.
/// Segmentation, part-of-speech filtering and case policy all live here,
/// never in the counting stages.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, line: &str) -> Vec<String>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    #[inline]
    fn tokenize(&self, line: &str) -> Vec<String> {
        self(line)
    }
}

/// Unicode word boundaries (UAX #29)
/// Punctuation and whitespace are dropped. Case is preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, line: &str) -> Vec<String> {
        line.unicode_words().map(str::to_string).collect()
    }
}

/// Split on whitespace only
/// Useful when the input is already segmented, one term per gap.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unicode_words_drop_punctuation() {
        let tokens = UnicodeWordTokenizer.tokenize("The cat, the dog.");
        assert_eq!(tokens, vec!["The", "cat", "the", "dog"]);
    }

    #[test]
    fn whitespace_keeps_punctuation() {
        let tokens = WhitespaceTokenizer.tokenize("  cat,  dog. ");
        assert_eq!(tokens, vec!["cat,", "dog."]);
    }

    #[test]
    fn closures_are_tokenizers() {
        let by_comma = |line: &str| -> Vec<String> {
            line.split(',').map(|s| s.trim().to_string()).collect()
        };
        assert_eq!(by_comma.tokenize("a, b"), vec!["a", "b"]);
    }
}
