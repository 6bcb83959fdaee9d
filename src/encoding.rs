use encoding_rs::Encoding;

use crate::error::{Result, SimilarityError};

/// Converts raw document bytes into the canonical encoding the tokenizer expects.
///
/// The core only ever sees `&str`; `LegacyDecoder` covers GBK and the other
/// WHATWG-labelled encodings.
pub trait TextDecoder: Send + Sync {
    fn decode(&self, raw: &[u8]) -> Result<String>;
}

/// Strict UTF-8, invalid bytes are an error
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Decoder;

impl TextDecoder for Utf8Decoder {
    fn decode(&self, raw: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(raw).map_err(|e| SimilarityError::InvalidEncoding {
            context: format!("utf-8 input at byte {}", e.valid_up_to()),
        })?;
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
    }
}

/// UTF-8 with invalid sequences replaced by U+FFFD
#[derive(Debug, Clone, Copy, Default)]
pub struct LossyUtf8Decoder;

impl TextDecoder for LossyUtf8Decoder {
    fn decode(&self, raw: &[u8]) -> Result<String> {
        let text = String::from_utf8_lossy(raw);
        Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).to_string())
    }
}

/// Legacy multi-byte or 8-bit encoding, converted to UTF-8
///
/// # Examples
/// ```
/// use text_similarity::{LegacyDecoder, TextDecoder};
/// let gbk = LegacyDecoder::for_label("gbk").unwrap();
/// assert_eq!(gbk.decode(&[0xc3, 0xa8]).unwrap(), "猫");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LegacyDecoder {
    encoding: &'static Encoding,
}

impl LegacyDecoder {
    pub fn new(encoding: &'static Encoding) -> Self {
        LegacyDecoder { encoding }
    }

    /// Look an encoding up by its WHATWG label, e.g. `gbk`, `gb18030`, `shift_jis`
    pub fn for_label(label: &str) -> Result<Self> {
        Encoding::for_label(label.trim().as_bytes())
            .map(LegacyDecoder::new)
            .ok_or_else(|| SimilarityError::Config(format!("unknown encoding label: {label}")))
    }

    #[inline]
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }
}

impl TextDecoder for LegacyDecoder {
    fn decode(&self, raw: &[u8]) -> Result<String> {
        let text = self
            .encoding
            .decode_without_bom_handling_and_without_replacement(raw)
            .ok_or_else(|| SimilarityError::InvalidEncoding {
                context: format!("{} input", self.encoding.name()),
            })?;
        Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).to_string())
    }
}
