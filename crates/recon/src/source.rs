//! Best-effort decoding of source bytes.

use std::borrow::Cow;

/// Decoded text of one source.
#[derive(Debug)]
pub struct DecodedSource<'a> {
    pub text: Cow<'a, str>,
    /// Malformed byte sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Decode as UTF-8, dropping a BOM and replacing malformed sequences.
/// Never fails.
pub fn decode_source(bytes: &[u8]) -> DecodedSource<'_> {
    let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    DecodedSource { text, had_errors }
}
