//! Permalinks — assessment results packed into shareable tokens.
//!
//! The permalink module provides:
//! - The versioned `AssessmentResult` wire structure
//! - Compaction of empty skill ratings before encoding
//! - The gzip + base64url result codec with `None`-on-failure decoding
//! - Permalink URL building and token extraction

pub mod codec;
pub mod types;

pub use types::{AssessmentResult, VersionStatus, RESULT_VERSION};

pub use codec::{
    decode_result, encode_result, extract_token, permalink_url, result_size_kb, ResultCodec,
    MAX_DECODED_BYTES,
};
