//! Charset label resolution.
//!
//! Most labels go straight to `encoding_rs`. Three families are handled
//! here instead, because the WHATWG table folds them into something looser
//! than what the server declared:
//!
//! - generic `utf-16` picks its byte order from a BOM, and the BOM is not
//!   part of the text;
//! - the ASCII labels reject every byte at or above 0x80;
//! - the ISO-8859-1 labels map each byte to the code point of the same value,
//!   C1 controls included.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};
use std::borrow::Cow;

/// A resolved charset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// Decoded through `encoding_rs` as labelled.
    Whatwg(&'static Encoding),
    /// UTF-16 with byte order from the BOM; little-endian without one.
    Utf16,
    /// 7-bit US-ASCII.
    Ascii,
    /// ISO-8859-1 proper.
    Latin1,
}

impl Charset {
    /// Resolve a charset label. Unknown labels yield `None`.
    pub fn for_label(label: &str) -> Option<Self> {
        let normalized = label
            .trim_matches(|c: char| c.is_ascii_whitespace())
            .to_ascii_lowercase();

        match normalized.as_str() {
            "utf-16" | "utf16" | "csunicode" | "iso-10646-ucs-2" | "ucs-2" | "unicode" => {
                Some(Charset::Utf16)
            }
            "ascii" | "us-ascii" | "us" | "ansi_x3.4-1968" | "iso646-us" | "iso-ir-6"
            | "cp367" | "ibm367" | "csascii" | "646" => Some(Charset::Ascii),
            "iso-8859-1" | "iso8859-1" | "iso_8859-1" | "iso_8859-1:1987" | "iso88591"
            | "latin1" | "latin-1" | "l1" | "iso-ir-100" | "cp819" | "ibm819"
            | "csisolatin1" | "8859" => Some(Charset::Latin1),
            _ => Encoding::for_label(normalized.as_bytes()).map(Charset::Whatwg),
        }
    }

    /// Canonical name, as recorded in decode traces.
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Whatwg(encoding) => encoding.name(),
            Charset::Utf16 => "UTF-16",
            Charset::Ascii => "US-ASCII",
            Charset::Latin1 => "ISO-8859-1",
        }
    }

    /// The `encoding_rs` encoding, for charsets decoded through it.
    pub fn encoding(&self) -> Option<&'static Encoding> {
        match self {
            Charset::Whatwg(encoding) => Some(*encoding),
            Charset::Utf16 | Charset::Ascii | Charset::Latin1 => None,
        }
    }

    /// Decode without substitution; `None` if any sequence is invalid.
    pub fn decode_exact(&self, content: &[u8]) -> Option<String> {
        match self {
            Charset::Whatwg(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(content)
                .map(Cow::into_owned),
            Charset::Utf16 => {
                let (encoding, body) = sniff_utf16(content);
                encoding
                    .decode_without_bom_handling_and_without_replacement(body)
                    .map(Cow::into_owned)
            }
            Charset::Ascii => content
                .is_ascii()
                .then(|| encoding_rs::mem::decode_latin1(content).into_owned()),
            Charset::Latin1 => Some(encoding_rs::mem::decode_latin1(content).into_owned()),
        }
    }

    /// Decode with U+FFFD substitution. The flag reports whether any
    /// substitution happened.
    pub fn decode_lossy(&self, content: &[u8]) -> (String, bool) {
        match self {
            Charset::Whatwg(encoding) => {
                let (text, had_errors) = encoding.decode_without_bom_handling(content);
                (text.into_owned(), had_errors)
            }
            Charset::Utf16 => {
                let (encoding, body) = sniff_utf16(content);
                let (text, had_errors) = encoding.decode_without_bom_handling(body);
                (text.into_owned(), had_errors)
            }
            Charset::Ascii => {
                let text = content
                    .iter()
                    .map(|&b| if b.is_ascii() { b as char } else { '\u{FFFD}' })
                    .collect();
                (text, !content.is_ascii())
            }
            Charset::Latin1 => (encoding_rs::mem::decode_latin1(content).into_owned(), false),
        }
    }
}

impl From<&'static Encoding> for Charset {
    fn from(encoding: &'static Encoding) -> Self {
        Charset::Whatwg(encoding)
    }
}

/// Pick UTF-16 byte order from a leading BOM and strip it.
fn sniff_utf16(content: &[u8]) -> (&'static Encoding, &[u8]) {
    match Encoding::for_bom(content) {
        Some((encoding, bom_len)) if encoding == UTF_16LE || encoding == UTF_16BE => {
            (encoding, &content[bom_len..])
        }
        _ => (UTF_16LE, content),
    }
}
