use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use thiserror::Error;

/// Standard alphabet, canonical padding, non-zero trailing bits accepted.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("decoded bytes are not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

fn is_base64_symbol(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'+' || b == b'/'
}

/// Reduces `body` to the symbols before the first `=`, followed by as much
/// padding as the last quantum needs (or as much as the body supplies, if
/// less). Bytes outside the alphabet are dropped and anything after the
/// first padded quantum is ignored.
fn canonical_input(body: &[u8]) -> Vec<u8> {
    let mut symbols = body
        .iter()
        .copied()
        .filter(|&b| is_base64_symbol(b) || b == b'=')
        .peekable();

    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    while let Some(b) = symbols.next_if(|&b| b != b'=') {
        out.push(b);
    }

    let needed = (4 - out.len() % 4) % 4;
    let supplied = symbols.take_while(|&b| b == b'=').take(needed).count();
    out.resize(out.len() + supplied, b'=');
    out
}

/// Decodes a base64 body into UTF-8 text. Non-alphabet bytes are skipped,
/// padding is required, and data after the first padded quantum is ignored.
pub fn decode_body(body: &[u8]) -> Result<String, DecodeError> {
    let bytes = LENIENT.decode(canonical_input(body))?;
    Ok(String::from_utf8(bytes)?)
}

/// First `n` chars of `s`.
pub fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
