//! `Content-Type` header parsing.

use http::header::CONTENT_TYPE;
use http::HeaderMap;

/// A `Content-Type` value split into its essence and parameters.
///
/// Parameter names are lower-cased; parameter values keep their case and
/// have surrounding double quotes removed. Order of appearance is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypeValue {
    essence: String,
    params: Vec<(String, String)>,
}

impl ContentTypeValue {
    /// Parse a raw header value such as `text/html; charset="utf-8"`.
    ///
    /// Returns `None` when there is no type at all. Anything after that is
    /// read leniently: parameters without `=` are skipped.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = split_params(raw).into_iter();
        let essence = parts.next()?.trim().to_string();
        if essence.is_empty() {
            return None;
        }

        let mut params: Vec<(String, String)> = Vec::new();
        for part in parts {
            let Some((name, value)) = part.split_once('=') else {
                continue;
            };
            let name = name.trim().to_ascii_lowercase();
            let value = unquote(value.trim());

            // Later duplicates replace earlier ones, keeping the first position.
            if let Some((_, v)) = params.iter_mut().find(|(n, _)| *n == name) {
                *v = value;
            } else {
                params.push((name, value));
            }
        }

        Some(Self { essence, params })
    }

    /// Primary `type/subtype` as written.
    pub fn essence(&self) -> &str {
        &self.essence
    }

    /// Case-insensitive parameter lookup.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// The `charset` parameter with any remaining single or double quotes
    /// trimmed from both ends.
    pub fn charset(&self) -> Option<&str> {
        self.param("charset")
            .map(|c| c.trim_matches(|ch: char| ch == '"' || ch == '\''))
    }
}

/// Returns the `charset` declared by the `Content-Type` header, if any.
///
/// A missing header, a value that is not visible ASCII, or an unparseable
/// value all resolve to `None`.
pub fn extract_content_type_charset(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let content_type = ContentTypeValue::parse(raw)?;
    content_type.charset().map(str::to_string)
}

/// Split on `;` outside of double-quoted strings.
fn split_params(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, ch) in raw.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                parts.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&raw[start..]);
    parts
}

/// Strip one pair of surrounding double quotes and undo `\"` / `\\` escapes.
fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value[1..value.len() - 1]
            .replace("\\\\", "\\")
            .replace("\\\"", "\"")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers_with(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn test_parse_essence_and_params() {
        let ct = ContentTypeValue::parse("text/html; charset=UTF-8; q=0.5").unwrap();
        assert_eq!(ct.essence(), "text/html");
        assert_eq!(ct.param("charset"), Some("UTF-8"));
        assert_eq!(ct.param("Q"), Some("0.5"));
        assert_eq!(ct.params().count(), 2);
    }

    #[test]
    fn test_parse_quoted_value_with_semicolon() {
        let ct = ContentTypeValue::parse(r#"multipart/form-data; boundary="a;b"; charset=x"#)
            .unwrap();
        assert_eq!(ct.param("boundary"), Some("a;b"));
        assert_eq!(ct.charset(), Some("x"));
    }

    #[test]
    fn test_parse_param_name_lowercased() {
        let ct = ContentTypeValue::parse("text/plain; CharSet=Shift_JIS").unwrap();
        assert_eq!(ct.params().next(), Some(("charset", "Shift_JIS")));
    }

    #[test]
    fn test_parse_skips_bare_params() {
        let ct = ContentTypeValue::parse("text/plain; foo; charset=utf-8;").unwrap();
        assert_eq!(ct.params().count(), 1);
        assert_eq!(ct.charset(), Some("utf-8"));
    }

    #[test]
    fn test_parse_empty_is_none() {
        assert!(ContentTypeValue::parse("").is_none());
        assert!(ContentTypeValue::parse("  ; charset=utf-8").is_none());
    }

    #[test]
    fn test_extract_charset_preserves_case() {
        let headers = headers_with("text/html; charset=UTF-8");
        assert_eq!(
            extract_content_type_charset(&headers),
            Some("UTF-8".to_string())
        );
    }

    #[test]
    fn test_extract_charset_strips_quotes() {
        let headers = headers_with(r#"text/html; charset="ISO-8859-1""#);
        assert_eq!(
            extract_content_type_charset(&headers).as_deref(),
            Some("ISO-8859-1")
        );

        let headers = headers_with("text/html; charset='koi8-r'");
        assert_eq!(extract_content_type_charset(&headers).as_deref(), Some("koi8-r"));
    }

    #[test]
    fn test_extract_charset_missing() {
        assert!(extract_content_type_charset(&HeaderMap::new()).is_none());
        assert!(extract_content_type_charset(&headers_with("application/json")).is_none());
    }

    #[test]
    fn test_extract_charset_opaque_header_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_bytes(b"text/html; charset=\xff").unwrap(),
        );
        assert!(extract_content_type_charset(&headers).is_none());
    }
}
