use time::OffsetDateTime;

/// Represents a cookie.
/// Modeled after Chromium's `net::CanonicalCookie`, trimmed to the
/// attributes a value mapping needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    /// Empty means no domain restriction.
    pub domain: String,
    pub path: String,
    pub version: u8,
    pub creation_time: OffsetDateTime,
    pub expiration_time: Option<OffsetDateTime>,
    pub secure: bool,
    pub http_only: bool,
    /// Session-only: dropped when the session ends.
    pub discard: bool,
    pub host_only: bool,
}

/// Attribute defaults for cookies built from a plain name/value pair.
///
/// Build a fresh value per conversion with [`CookieDefaults::new`]; it is
/// never shared between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieDefaults {
    pub version: u8,
    pub domain: String,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    pub discard: bool,
    pub expiration_time: Option<OffsetDateTime>,
}

impl CookieDefaults {
    pub fn new() -> Self {
        Self {
            version: 0,
            domain: String::new(),
            path: "/".to_string(),
            secure: false,
            http_only: true,
            discard: true,
            expiration_time: None,
        }
    }
}

impl Default for CookieDefaults {
    fn default() -> Self {
        Self::new()
    }
}

impl CanonicalCookie {
    /// Build a cookie from a name/value pair and a set of defaults.
    pub fn from_defaults(
        name: impl Into<String>,
        value: impl Into<String>,
        defaults: CookieDefaults,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            host_only: defaults.domain.is_empty(),
            domain: defaults.domain,
            path: defaults.path,
            version: defaults.version,
            creation_time: OffsetDateTime::now_utc(),
            expiration_time: defaults.expiration_time,
            secure: defaults.secure,
            http_only: defaults.http_only,
            discard: defaults.discard,
        }
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        if let Some(expiry) = self.expiration_time {
            expiry < current_time
        } else {
            false // Session cookies never expire by time.
        }
    }

    /// Render as a `name=value` pair for a `Cookie` request header.
    pub fn to_pair(&self) -> String {
        cookie::Cookie::new(self.name.as_str(), self.value.as_str())
            .stripped()
            .to_string()
    }
}
