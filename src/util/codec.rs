//! Base64 codec for shareable state hashes.
//!
//! Hashes are standard base64 over the UTF-8 bytes of a JSON document, so a
//! hash produced here matches `btoa(unescape(encodeURIComponent(json)))` in the
//! browser and non-ASCII text survives the round trip.
//!
//! TRADE-OFFS
//! ==========
//! Encoding always emits the padded standard alphabet. Decoding is lenient and
//! also accepts the URL-safe alphabet with or without padding, because hashes
//! are pasted back from URLs that may have been rewritten along the way.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error returned by [`decode`] and [`decode_json`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The hash is not valid base64 in either supported alphabet.
    #[error("invalid base64 hash: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded bytes are not UTF-8.
    #[error("hash is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    /// The decoded text is not the expected JSON document.
    #[error("hash payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode arbitrary text into a base64 hash.
#[must_use]
pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode a hash produced by [`encode`] back into text.
///
/// # Errors
///
/// Returns [`DecodeError::Base64`] for malformed input and
/// [`DecodeError::Utf8`] when the payload is not UTF-8 text.
pub fn decode(hash: &str) -> Result<String, DecodeError> {
    let normalized: String = hash
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let bytes = STANDARD_NO_PAD.decode(normalized)?;
    Ok(String::from_utf8(bytes)?)
}

/// Serialize `value` to JSON and encode it as a hash.
///
/// # Errors
///
/// Returns the serializer error when `value` cannot be represented as JSON.
pub fn encode_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    Ok(encode(&json))
}

/// Decode a hash and parse its JSON payload.
///
/// # Errors
///
/// Returns any [`DecodeError`] raised while decoding or parsing.
pub fn decode_json<T: DeserializeOwned>(hash: &str) -> Result<T, DecodeError> {
    let text = decode(hash)?;
    Ok(serde_json::from_str(&text)?)
}
