//! Parameter encoding helpers.
use base64::{Engine, prelude::BASE64_STANDARD};

/// Encodes a raw authorization request parameter as standard, padded
/// base64.
pub fn encode_param(raw: &str) -> String {
	BASE64_STANDARD.encode(raw.as_bytes())
}
