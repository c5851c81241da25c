use crate::error::DecodeError;
use flate2::read::{GzDecoder, ZlibDecoder};
use std::io::Read;

const BROTLI_BUFFER_SIZE: usize = 4096;

/// Content codings the measurer knows how to undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCoding {
    Gzip,
    Deflate,
    Brotli,
}

impl ContentCoding {
    /// Parses a `Content-Encoding` header value, `None` for anything unsupported.
    pub fn from_header(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gzip" | "x-gzip" => Some(ContentCoding::Gzip),
            "deflate" => Some(ContentCoding::Deflate),
            "br" => Some(ContentCoding::Brotli),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ContentCoding::Gzip => "gzip",
            ContentCoding::Deflate => "deflate",
            ContentCoding::Brotli => "br",
        }
    }
}

pub fn decode(coding: ContentCoding, body: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut decoded = Vec::with_capacity(body.len() * 4);
    // HTTP "deflate" is the zlib format, not a raw deflate stream.
    let result = match coding {
        ContentCoding::Gzip => GzDecoder::new(body).read_to_end(&mut decoded),
        ContentCoding::Deflate => ZlibDecoder::new(body).read_to_end(&mut decoded),
        ContentCoding::Brotli => {
            brotli::Decompressor::new(body, BROTLI_BUFFER_SIZE).read_to_end(&mut decoded)
        }
    };

    result
        .map(|_| decoded)
        .map_err(|source| DecodeError::Corrupted {
            coding: coding.name(),
            source,
        })
}

/// Byte length of the body once read as UTF-8 text, invalid sequences
/// counting as replacement characters.
pub fn decoded_text_len(bytes: &[u8]) -> u64 {
    String::from_utf8_lossy(bytes).len() as u64
}
