use std::io::Read;

use encoding_rs::{Encoding, UTF_8};
use reqwest::header::{CONTENT_ENCODING, CONTENT_TYPE, HeaderMap};
use serde_json::Value;

use crate::error::FetchError;

const BROTLI_BUFFER_SIZE: usize = 4096;

/// Which step of the fallback chain produced the JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// The body bytes were JSON as received.
    Direct,
    /// The body was brotli-compressed and announced as such.
    Brotli,
    /// The body was text in the charset named by `Content-Type`, or UTF-8.
    DeclaredCharset,
    /// The body was UTF-8 once invalid byte sequences were dropped.
    LossyUtf8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub value: Value,
    pub strategy: DecodeStrategy,
}

impl Decoded {
    fn new(value: Value, strategy: DecodeStrategy) -> Self {
        Self { value, strategy }
    }
}

/// Parses a response body as JSON, trying each strategy in turn.
///
/// 1. the raw bytes
/// 2. brotli decompression, only if `Content-Encoding` mentions `br`
/// 3. text decoded with the declared charset (UTF-8 by default)
/// 4. UTF-8 with invalid sequences dropped
///
/// Returns [`FetchError::Decode`] when all of them fail.
pub fn decode_json(body: &[u8], headers: &HeaderMap) -> Result<Decoded, FetchError> {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        return Ok(Decoded::new(value, DecodeStrategy::Direct));
    }

    if declares_brotli(headers) {
        if let Some(value) = brotli_decompress(body).and_then(|b| parse_bytes(&b)) {
            return Ok(Decoded::new(value, DecodeStrategy::Brotli));
        }
    }

    if let Some(value) = declared_text(body, headers).and_then(|t| parse_str(&t)) {
        return Ok(Decoded::new(value, DecodeStrategy::DeclaredCharset));
    }

    if let Some(value) = parse_str(&utf8_ignoring_invalid(body)) {
        return Ok(Decoded::new(value, DecodeStrategy::LossyUtf8));
    }

    Err(FetchError::Decode)
}

fn parse_bytes(bytes: &[u8]) -> Option<Value> {
    serde_json::from_slice(bytes).ok()
}

fn parse_str(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

pub fn declares_brotli(headers: &HeaderMap) -> bool {
    headers
        .get_all(CONTENT_ENCODING)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.to_ascii_lowercase().contains("br"))
}

fn brotli_decompress(body: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::new();
    brotli::Decompressor::new(body, BROTLI_BUFFER_SIZE)
        .read_to_end(&mut out)
        .ok()?;
    Some(out)
}

/// The lowercased `charset` parameter of `Content-Type`, if any.
pub fn declared_charset(headers: &HeaderMap) -> Option<String> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"').to_ascii_lowercase())
        } else {
            None
        }
    })
}

/// Decodes the body the way an HTTP client's `text()` would: with the
/// declared charset, UTF-8 when none is declared or the label is unknown, and
/// a byte-order mark taking precedence over both. Malformed input gives `None`
/// so the lossy step stays the last resort.
fn declared_text(body: &[u8], headers: &HeaderMap) -> Option<String> {
    let encoding = declared_charset(headers)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _, had_errors) = encoding.decode(body);
    if had_errors {
        None
    } else {
        Some(text.into_owned())
    }
}

fn utf8_ignoring_invalid(body: &[u8]) -> String {
    body.utf8_chunks().map(|chunk| chunk.valid()).collect()
}
