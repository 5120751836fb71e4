//! Result codec — assessment result to URL-safe token and back.
//!
//! Token format:
//! ```text
//! base64url( gzip( utf8( JSON(AssessmentResult) ) ) )
//! ```
//! `+` becomes `-`, `/` becomes `_`, and `=` padding is stripped. Decoding
//! restores padding before the standard base64 decode.
//!
//! The token is meant to sit after `#` in a URL so it never reaches a
//! server.

use std::io::{Read, Write};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{AssessmentError, Result};
use crate::summary::Assessments;

use super::types::*;

/// Largest decompressed payload `decode` accepts (8 MiB).
pub const MAX_DECODED_BYTES: u64 = 8 * 1024 * 1024;

/// Encodes and decodes result tokens.
#[derive(Debug, Clone, Copy)]
pub struct ResultCodec {
    compact: bool,
    level: Compression,
    max_decoded_bytes: u64,
}

impl Default for ResultCodec {
    fn default() -> Self {
        Self {
            compact: true,
            level: Compression::default(),
            max_decoded_bytes: MAX_DECODED_BYTES,
        }
    }
}

impl ResultCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep empty skill ratings in the payload.
    pub fn without_compaction(mut self) -> Self {
        self.compact = false;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Compression::new(level.min(9));
        self
    }

    /// Cap on the decompressed JSON size; larger tokens decode to `None`.
    pub fn with_max_decoded_bytes(mut self, limit: u64) -> Self {
        self.max_decoded_bytes = limit;
        self
    }

    /// Encode a result into a URL-safe token.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::SerializationError` or
    /// `AssessmentError::Compression`; neither occurs for well-formed input.
    pub fn encode(&self, result: &AssessmentResult) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(&result.compacted())
        } else {
            serde_json::to_string(result)
        }
        .map_err(|e| AssessmentError::SerializationError(e.to_string()))?;

        let mut encoder = GzEncoder::new(Vec::new(), self.level);
        encoder
            .write_all(json.as_bytes())
            .map_err(|e| AssessmentError::Compression(e.to_string()))?;
        let compressed = encoder
            .finish()
            .map_err(|e| AssessmentError::Compression(e.to_string()))?;

        let standard =
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, compressed);
        Ok(standard
            .replace('+', "-")
            .replace('/', "_")
            .trim_end_matches('=')
            .to_string())
    }

    /// Decode a token, returning `None` if anything about it is invalid.
    ///
    /// Callers fall back to locally stored ratings when this returns `None`.
    pub fn decode(&self, token: &str) -> Option<AssessmentResult> {
        if token.trim().is_empty() {
            return None;
        }
        match try_decode(token, self.max_decoded_bytes) {
            Ok(result) => {
                match result.version_status() {
                    VersionStatus::Current => {}
                    VersionStatus::Missing => {
                        log::warn!("version information missing in assessment result");
                    }
                    VersionStatus::Unrecognized(v) => {
                        log::warn!("unrecognized assessment result version '{v}', decoding as-is");
                    }
                }
                Some(result)
            }
            Err(e) => {
                log::warn!("failed to decode assessment result: {e}");
                None
            }
        }
    }
}

fn try_decode(token: &str, max_decoded_bytes: u64) -> Result<AssessmentResult> {
    let mut standard: String = token
        .trim()
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while standard.len() % 4 != 0 {
        standard.push('=');
    }

    let compressed =
        base64::Engine::decode(&base64::engine::general_purpose::STANDARD, &standard)
            .map_err(|e| AssessmentError::SerializationError(format!("invalid base64: {e}")))?;

    let mut decoder = flate2::bufread::GzDecoder::new(&compressed[..]);
    let mut json = String::new();
    (&mut decoder)
        .take(max_decoded_bytes.saturating_add(1))
        .read_to_string(&mut json)
        .map_err(|e| AssessmentError::Compression(e.to_string()))?;
    if json.len() as u64 > max_decoded_bytes {
        return Err(AssessmentError::Compression(format!(
            "decompressed result exceeds {max_decoded_bytes} bytes"
        )));
    }
    let trailing = decoder.into_inner();
    if !trailing.is_empty() {
        return Err(AssessmentError::Compression(format!(
            "{} trailing bytes after gzip stream",
            trailing.len()
        )));
    }

    serde_json::from_str(&json)
        .map_err(|e| AssessmentError::SerializationError(format!("invalid result JSON: {e}")))
}

// ---------------------------------------------------------------------------
// Convenience
// ---------------------------------------------------------------------------

/// Encode with the default (compacting) codec.
pub fn encode_result(result: &AssessmentResult) -> Result<String> {
    ResultCodec::default().encode(result)
}

/// Decode with the default codec.
pub fn decode_result(token: &str) -> Option<AssessmentResult> {
    ResultCodec::default().decode(token)
}

/// Build a shareable URL. The token travels in the fragment.
pub fn permalink_url(base_url: &str, assessments: Assessments) -> Result<String> {
    let result = AssessmentResult::new(assessments);
    let token = encode_result(&result)?;
    Ok(format!("{}/results#{token}", base_url.trim_end_matches('/')))
}

/// The token part of a permalink, or the input itself if it has no `#`.
pub fn extract_token(url_or_token: &str) -> &str {
    match url_or_token.split_once('#') {
        Some((_, fragment)) => fragment,
        None => url_or_token,
    }
}

/// Serialized JSON size in KiB, rounded to two decimals.
pub fn result_size_kb(result: &AssessmentResult) -> f64 {
    let bytes = serde_json::to_string(result).map(|s| s.len()).unwrap_or(0);
    (bytes as f64 / 1024.0 * 100.0).round() / 100.0
}
