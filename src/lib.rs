//! # respkit
//!
//! Response post-processing for a Chromium-style HTTP client.
//!
//! `respkit` turns collected response bodies into text and moves cookie
//! values between plain maps and cookie stores. It performs no I/O of its
//! own: headers, body bytes and stores all come from the caller.
//!
//! ## Features
//!
//! - **Text decoding**: `Content-Type` charset, then lossy substitution, then
//!   raw passthrough
//! - **HTML hints**: `<meta charset>` based decoding for documents served
//!   without a usable header
//! - **gzip**: single-member gzip inflation with trailer verification
//! - **Cookie mapping**: flat `name -> value` maps to and from a cookie store
//!
//! ## Quick Start
//!
//! ```rust
//! use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
//! use respkit::http::decode_best_effort;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
//!
//! let text = decode_best_effort("hello".as_bytes(), &headers);
//! assert_eq!(text.as_text(), Some("hello"));
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`cookies`] - Cookie store capability, jar and value mapping
//! - [`http`] - Charset resolution, text decoding and gzip inflation

pub mod base;
pub mod cookies;
pub mod http;
