//! gzip content decoding.
//! Mirrors Chromium's GzipSourceStream for the plain `gzip` framing.

use crate::base::neterror::NetError;
use bytes::Bytes;
use flate2::read::GzDecoder;
use std::io::Read;

/// gzip magic number (RFC 1952, section 2.3.1).
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Inflate a single-member gzip stream.
///
/// The stream must carry the full gzip header, a DEFLATE payload and the
/// CRC32/ISIZE trailer. Anything else (raw DEFLATE, zlib framing, truncated
/// or corrupt data) fails with [`NetError::ContentDecodingFailed`].
pub fn inflate_gzip(content: &[u8]) -> Result<Bytes, NetError> {
    if !is_gzip(content) {
        tracing::debug!(len = content.len(), "gzip magic missing");
        return Err(NetError::ContentDecodingFailed);
    }

    let mut decoder = GzDecoder::new(content);
    // gzip ratios are commonly 4-10x; start from a modest guess.
    let mut out = Vec::with_capacity(content.len().saturating_mul(4));
    decoder.read_to_end(&mut out).map_err(|e| {
        tracing::debug!(error = %e, "gzip inflate failed");
        NetError::ContentDecodingFailed
    })?;

    tracing::debug!(compressed = content.len(), inflated = out.len(), "gzip inflated");
    Ok(Bytes::from(out))
}

/// True when `content` starts with the gzip magic number.
pub fn is_gzip(content: &[u8]) -> bool {
    content.starts_with(&GZIP_MAGIC)
}
