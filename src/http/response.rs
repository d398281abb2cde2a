//! Text access for a collected response body.

use crate::base::neterror::NetError;
use crate::http::gzip::inflate_gzip;
use crate::http::textdecoder::{DecodedText, TextDecoder};
use http::header::CONTENT_ENCODING;
use http::HeaderMap;

/// True when the `Content-Encoding` header lists `gzip` (or `x-gzip`).
pub fn is_gzip_encoded(headers: &HeaderMap) -> bool {
    headers
        .get_all(CONTENT_ENCODING)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .any(|coding| coding.eq_ignore_ascii_case("gzip") || coding.eq_ignore_ascii_case("x-gzip"))
}

/// Undo gzip content encoding (when declared) and decode the body as text.
///
/// Only the gzip step can fail; text decoding itself always produces a value.
pub fn decode_response_body(
    decoder: &TextDecoder,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<DecodedText, NetError> {
    if is_gzip_encoded(headers) {
        let inflated = inflate_gzip(body)?;
        return Ok(decoder.decode(&inflated, headers));
    }
    Ok(decoder.decode(body, headers))
}
