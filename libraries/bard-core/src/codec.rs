//! Binary codec for persisted payloads
//!
//! Every payload the asset store persists is transport-safe ASCII:
//! - Binary assets (audio, images) are the standard base64 of their raw bytes.
//! - Text documents are encoded Unicode-safe: UTF-8 bytes, then base64.
//!
//! Older campaign files were written by an encoder that armored each
//! character directly as one byte (Latin-1), and some were stored as plain
//! JSON. Decoding therefore walks three strategies in order and lets the
//! caller's parser pick the first candidate it accepts:
//!
//! 1. Unicode-safe: base64 → UTF-8
//! 2. Legacy: base64 → Latin-1
//! 3. Plain text: the blob itself, if it looks like JSON (`{` or `[`)

use crate::error::{BardError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Decode strategy that produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// base64 → UTF-8 (current encoder)
    UnicodeSafe,
    /// base64 → Latin-1 (pre-Unicode encoder)
    Legacy,
    /// Stored unencoded
    PlainText,
}

impl DecodeStrategy {
    /// All strategies in the order they are attempted
    pub const ORDER: [DecodeStrategy; 3] = [
        DecodeStrategy::UnicodeSafe,
        DecodeStrategy::Legacy,
        DecodeStrategy::PlainText,
    ];

    /// Produce this strategy's candidate text for `blob`, if it applies
    fn candidate(self, blob: &str) -> Option<String> {
        match self {
            DecodeStrategy::UnicodeSafe => {
                let bytes = STANDARD.decode(blob).ok()?;
                String::from_utf8(bytes).ok()
            }
            DecodeStrategy::Legacy => {
                let bytes = STANDARD.decode(blob).ok()?;
                Some(bytes.into_iter().map(char::from).collect())
            }
            DecodeStrategy::PlainText => {
                looks_like_json(blob).then(|| blob.to_string())
            }
        }
    }
}

/// Encode arbitrary Unicode text
pub fn encode_text(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Encode text the way the pre-Unicode encoder did
///
/// Returns `None` when `text` contains a code point above U+00FF, which that
/// encoder could not represent.
pub fn legacy_encode_text(text: &str) -> Option<String> {
    let bytes = text
        .chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect::<Option<Vec<u8>>>()?;
    Some(STANDARD.encode(bytes))
}

/// Encode raw bytes (byte-preserving, never the text path)
pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a base64 payload back to raw bytes
pub fn decode_bytes(blob: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(blob)
        .map_err(|e| BardError::corrupt_asset(format!("invalid base64 payload: {e}")))
}

/// Decode a text payload, accepting the first strategy that yields any text
pub fn decode_text(blob: &str) -> Result<String> {
    decode_with(blob, |text| Some(text.to_string()))
}

/// Decode a text payload through the three-tier fallback
///
/// `accept` is the caller's parser; the first candidate for which it returns
/// `Some` wins. Fails with [`BardError::CorruptAsset`] when no strategy
/// produces an accepted value.
pub fn decode_with<T, F>(blob: &str, accept: F) -> Result<T>
where
    F: FnMut(&str) -> Option<T>,
{
    decode_detailed(blob, accept).map(|(value, _)| value)
}

/// Like [`decode_with`], also reporting which strategy succeeded
pub fn decode_detailed<T, F>(blob: &str, mut accept: F) -> Result<(T, DecodeStrategy)>
where
    F: FnMut(&str) -> Option<T>,
{
    for strategy in DecodeStrategy::ORDER {
        let Some(candidate) = strategy.candidate(blob) else {
            continue;
        };
        if let Some(value) = accept(&candidate) {
            if strategy != DecodeStrategy::UnicodeSafe {
                tracing::debug!(?strategy, "payload decoded with fallback strategy");
            }
            return Ok((value, strategy));
        }
    }

    Err(BardError::corrupt_asset(format!(
        "no decode strategy accepted payload ({} bytes)",
        blob.len()
    )))
}

/// Build an embeddable resource locator for a stored payload
///
/// The payload is used as-is; consumers can hand the result straight to a
/// media element or decoder.
pub fn data_url(mime_type: &str, payload: &str) -> String {
    format!("data:{mime_type};base64,{payload}")
}

/// Split a data URL back into its MIME type and payload
pub fn parse_data_url(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime_type = header.strip_suffix(";base64")?;
    Some((mime_type, payload))
}

fn looks_like_json(blob: &str) -> bool {
    matches!(blob.trim_start().chars().next(), Some('{' | '['))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_json(text: &str) -> Option<serde_json::Value> {
        serde_json::from_str(text).ok()
    }

    #[test]
    fn unicode_round_trip() {
        for text in ["", "plain", "Ærøskøbing", "🐉 dragon's hoard", "e\u{301}", "日本語"] {
            let blob = encode_text(text);
            assert!(blob.is_ascii());
            assert_eq!(decode_text(&blob).unwrap(), text);
        }
    }

    #[test]
    fn legacy_payload_falls_back_to_latin1() {
        let original = r#"{"name":"Café du Monde"}"#;
        let blob = legacy_encode_text(original).unwrap();

        // The Unicode-safe reverse cannot read a lone 0xE9 byte.
        let (value, strategy) = decode_detailed(&blob, parse_json).unwrap();
        assert_eq!(strategy, DecodeStrategy::Legacy);
        assert_eq!(value["name"], "Café du Monde");
    }

    #[test]
    fn legacy_encoder_rejects_wide_characters() {
        assert!(legacy_encode_text("🐉").is_none());
        assert!(legacy_encode_text("ÿ").is_some());
    }

    #[test]
    fn plain_json_is_accepted() {
        let (value, strategy) = decode_detailed("  [1, 2, 3]", parse_json).unwrap();
        assert_eq!(strategy, DecodeStrategy::PlainText);
        assert_eq!(value, serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn garbage_is_corrupt() {
        let err = decode_with("not base64 and not json!", parse_json).unwrap_err();
        assert!(matches!(err, BardError::CorruptAsset(_)));
    }

    #[test]
    fn valid_base64_with_unparseable_content_is_corrupt() {
        let blob = encode_text("this is not json");
        assert!(matches!(
            decode_with(&blob, parse_json),
            Err(BardError::CorruptAsset(_))
        ));
    }

    #[test]
    fn bytes_round_trip() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(decode_bytes(&encode_bytes(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn data_url_embeds_payload_undecoded() {
        let url = data_url("audio/mpeg", "SUQz");
        assert_eq!(url, "data:audio/mpeg;base64,SUQz");
        assert_eq!(parse_data_url(&url), Some(("audio/mpeg", "SUQz")));
        assert_eq!(parse_data_url("https://example.com"), None);
    }
}
