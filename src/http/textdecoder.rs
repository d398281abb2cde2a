//! Best-effort conversion of response bytes into text.
//!
//! Charset resolution runs as a fixed ladder:
//!
//! 1. exact decode with the `Content-Type` charset,
//! 2. lossy decode (U+FFFD substitution) with that charset, or with the
//!    configured fallback encoding when the headers name none,
//! 3. raw passthrough when no encoding applies at all.
//!
//! A second, header-independent path reads `<meta ... charset=...>`
//! declarations out of the document itself. It only ever tries the first
//! declaration and hands back the original bytes if that one fails.

use crate::http::charset::Charset;
use crate::http::contenttype::extract_content_type_charset;
use bytes::Bytes;
use encoding_rs::Encoding;
use http::HeaderMap;
use regex::bytes::{CaptureMatches, Regex};
use std::sync::LazyLock;

static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i-u)<meta.*?charset=["']*(.+?)["'>]"#).expect("meta charset pattern")
});

/// How an attempt tried to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptMode {
    Exact,
    Lossy,
}

/// One entry of the decode trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub label: String,
    pub mode: AttemptMode,
    pub succeeded: bool,
}

/// Outcome of a decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Every byte was valid in the chosen encoding.
    Exact(String),
    /// Invalid sequences were replaced with U+FFFD.
    Lossy(String),
    /// No encoding applied; the original bytes, untouched.
    Raw(Bytes),
}

/// Decoded body plus the charset that produced it and the attempt trace.
#[derive(Debug, Clone)]
pub struct DecodedText {
    decoded: Decoded,
    charset: Option<Charset>,
    tried: Vec<Attempt>,
}

impl DecodedText {
    fn new(decoded: Decoded, charset: Option<Charset>, tried: Vec<Attempt>) -> Self {
        Self {
            decoded,
            charset,
            tried,
        }
    }

    pub fn decoded(&self) -> &Decoded {
        &self.decoded
    }

    /// The text, unless this is a raw passthrough.
    pub fn as_text(&self) -> Option<&str> {
        match &self.decoded {
            Decoded::Exact(text) | Decoded::Lossy(text) => Some(text),
            Decoded::Raw(_) => None,
        }
    }

    /// The text; a raw passthrough is read as UTF-8 with replacement.
    pub fn into_string(self) -> String {
        match self.decoded {
            Decoded::Exact(text) | Decoded::Lossy(text) => text,
            Decoded::Raw(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// The result as bytes: UTF-8 text, or the untouched original content.
    pub fn into_bytes(self) -> Bytes {
        match self.decoded {
            Decoded::Exact(text) | Decoded::Lossy(text) => Bytes::from(text),
            Decoded::Raw(bytes) => bytes,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self.decoded, Decoded::Exact(_))
    }

    pub fn is_lossy(&self) -> bool {
        matches!(self.decoded, Decoded::Lossy(_))
    }

    pub fn is_raw(&self) -> bool {
        matches!(self.decoded, Decoded::Raw(_))
    }

    /// Charset that produced the text; `None` for raw passthrough.
    pub fn charset(&self) -> Option<Charset> {
        self.charset
    }

    /// The `encoding_rs` encoding behind [`charset`](Self::charset), when
    /// there is one.
    pub fn encoding(&self) -> Option<&'static Encoding> {
        self.charset.and_then(|charset| charset.encoding())
    }

    /// Every attempt made, in order.
    pub fn tried(&self) -> &[Attempt] {
        &self.tried
    }
}

/// Charset declarations found in `<meta>` tags, in document order.
///
/// Scanning is lazy and the sequence can be walked any number of times.
#[derive(Debug, Clone, Copy)]
pub struct MetaCharsets<'a> {
    content: &'a [u8],
}

impl<'a> MetaCharsets<'a> {
    pub fn iter(&self) -> MetaCharsetIter<'a> {
        MetaCharsetIter {
            inner: META_CHARSET_RE.captures_iter(self.content),
        }
    }

    pub fn first(&self) -> Option<String> {
        self.iter().next()
    }
}

impl<'a> IntoIterator for MetaCharsets<'a> {
    type Item = String;
    type IntoIter = MetaCharsetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &MetaCharsets<'a> {
    type Item = String;
    type IntoIter = MetaCharsetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct MetaCharsetIter<'a> {
    inner: CaptureMatches<'static, 'a>,
}

impl Iterator for MetaCharsetIter<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let caps = self.inner.next()?;
        let label = caps.get(1)?;
        Some(String::from_utf8_lossy(label.as_bytes()).into_owned())
    }
}

/// Scan `content` for `<meta ... charset=...>` declarations.
pub fn extract_meta_charsets(content: &[u8]) -> MetaCharsets<'_> {
    MetaCharsets { content }
}

/// Configurable text decoder.
///
/// The default configuration has no fallback encoding, so a response whose
/// headers name no charset comes back as [`Decoded::Raw`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDecoder {
    fallback: Option<Charset>,
}

impl TextDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoding for the lossy step when the headers resolve no usable charset.
    pub fn fallback_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.fallback = Some(Charset::Whatwg(encoding));
        self
    }

    /// Decode a response body using its headers.
    pub fn decode(&self, content: &[u8], headers: &HeaderMap) -> DecodedText {
        let mut tried = Vec::new();

        let declared = extract_content_type_charset(headers);
        let resolved = declared.as_deref().and_then(|label| {
            let charset = Charset::for_label(label);
            if charset.is_none() {
                tracing::debug!(charset = %label, "unknown charset label");
            }
            charset
        });

        if let Some(label) = declared.as_deref() {
            let exact = resolved.and_then(|charset| charset.decode_exact(content));
            tried.push(Attempt {
                label: label.to_string(),
                mode: AttemptMode::Exact,
                succeeded: exact.is_some(),
            });
            if let Some(text) = exact {
                return DecodedText::new(Decoded::Exact(text), resolved, tried);
            }
            if resolved.is_some() {
                tracing::debug!(charset = %label, "exact decode failed, retrying lossy");
            }
        }

        let Some(charset) = resolved.or(self.fallback) else {
            tracing::debug!(len = content.len(), "no usable charset, passing content through");
            return DecodedText::new(Decoded::Raw(Bytes::copy_from_slice(content)), None, tried);
        };

        let (text, had_errors) = charset.decode_lossy(content);
        if had_errors {
            tracing::debug!(charset = charset.name(), "lossy decode substituted invalid sequences");
        }
        tried.push(Attempt {
            label: declared
                .filter(|_| resolved.is_some())
                .unwrap_or_else(|| charset.name().to_string()),
            mode: AttemptMode::Lossy,
            succeeded: true,
        });
        DecodedText::new(Decoded::Lossy(text), Some(charset), tried)
    }

    /// Decode using only `<meta>` charset declarations in the body.
    ///
    /// Only the first declaration is tried. If it is unknown or the bytes are
    /// not valid in it, the original content is returned without looking at
    /// later declarations.
    pub fn decode_html(&self, content: &[u8]) -> DecodedText {
        let mut tried = Vec::new();

        if let Some(label) = extract_meta_charsets(content).first() {
            let exact = Charset::for_label(&label)
                .and_then(|charset| charset.decode_exact(content).map(|text| (text, charset)));
            tried.push(Attempt {
                label: label.clone(),
                mode: AttemptMode::Exact,
                succeeded: exact.is_some(),
            });
            match exact {
                Some((text, charset)) => {
                    return DecodedText::new(Decoded::Exact(text), Some(charset), tried);
                }
                None => tracing::debug!(charset = %label, "meta charset failed, returning original content"),
            }
        }

        DecodedText::new(Decoded::Raw(Bytes::copy_from_slice(content)), None, tried)
    }
}

/// Decode `content` with the charset from `headers`, never failing.
pub fn decode_best_effort(content: &[u8], headers: &HeaderMap) -> DecodedText {
    TextDecoder::new().decode(content, headers)
}

/// Decode `content` using its first `<meta>` charset declaration.
pub fn decode_from_html_hints(content: &[u8]) -> DecodedText {
    TextDecoder::new().decode_html(content)
}
