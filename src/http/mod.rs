pub mod charset;
pub mod contenttype;
pub mod gzip;
pub mod response;
pub mod textdecoder;

// Re-exports for convenience
pub use charset::Charset;
pub use contenttype::{extract_content_type_charset, ContentTypeValue};
pub use gzip::inflate_gzip;
pub use response::decode_response_body;
pub use textdecoder::{
    decode_best_effort, decode_from_html_hints, extract_meta_charsets, Decoded, DecodedText,
    MetaCharsets, TextDecoder,
};
