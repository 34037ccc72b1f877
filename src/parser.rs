//! JSON decoding of transcript documents.

use crate::error::Result;
use crate::transcript::Transcript;

/// Decodes a JSON-encoded [`Transcript`] from raw bytes.
///
/// # Errors
///
/// Returns [`crate::Error::Parse`] if the bytes are not a valid transcript
/// document, including unknown rigor tags.
pub fn parse_transcript(bytes: &[u8]) -> Result<Transcript> {
    Ok(serde_json::from_slice(bytes)?)
}
