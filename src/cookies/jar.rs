use crate::base::neterror::NetError;
use crate::cookies::canonicalcookie::CanonicalCookie;
use crate::cookies::store::CookieStore;
use dashmap::DashMap;
use std::sync::Arc;
use time::OffsetDateTime;

/// In-memory cookie container.
/// Modeled after Chromium's `net::CookieMonster`, without its matching and
/// eviction policy.
///
/// Clones share the same underlying storage.
#[derive(Clone)]
pub struct CookieJar {
    // Store: Map<Domain, List<Cookie>>
    store: Arc<DashMap<String, Vec<CanonicalCookie>>>,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CookieJar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieJar")
            .field("cookies", &self.total_cookie_count())
            .finish()
    }
}

impl CookieJar {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }

    pub fn set_canonical_cookie(&self, cookie: CanonicalCookie) {
        let mut entry = self.store.entry(cookie.domain.clone()).or_default();

        // Remove existing if name/domain/path match
        entry.retain(|c| c.name != cookie.name || c.path != cookie.path);
        entry.push(cookie);
    }

    /// Parse a `Set-Cookie` header value received from `origin_host` and
    /// store the result.
    ///
    /// Without a `Domain` attribute the cookie is host-only for the origin.
    /// `Max-Age` takes precedence over `Expires`.
    pub fn add_set_cookie(&self, origin_host: &str, cookie_line: &str) -> Result<(), NetError> {
        use cookie::Cookie;

        let parsed = match Cookie::parse(cookie_line) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(error = %e, "rejected Set-Cookie line");
                return Err(match e {
                    cookie::ParseError::EmptyName => NetError::CookieEmptyName,
                    _ => NetError::CookieParseFailed,
                });
            }
        };

        let now = OffsetDateTime::now_utc();

        // Domain logic
        let (domain, host_only) = if let Some(d) = parsed.domain() {
            // Chromium strips leading dot.
            (d.trim_start_matches('.').to_lowercase(), false)
        } else {
            (origin_host.to_lowercase(), true)
        };

        let path = parsed.path().unwrap_or("/").to_string();

        let expiration_time = match parsed.max_age() {
            Some(max_age) => now.checked_add(max_age),
            None => parsed.expires().and_then(|e| e.datetime()),
        };

        self.set_canonical_cookie(CanonicalCookie {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain,
            path,
            version: 0,
            creation_time: now,
            expiration_time,
            secure: parsed.secure().unwrap_or(false),
            http_only: parsed.http_only().unwrap_or(false),
            discard: expiration_time.is_none(),
            host_only,
        });
        Ok(())
    }

    /// Render every cookie as a `Cookie` request header value.
    pub fn cookie_header(&self) -> String {
        self.iter_all_cookies()
            .map(|c| c.to_pair())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Get total cookie count.
    pub fn total_cookie_count(&self) -> usize {
        self.store.iter().map(|e| e.value().len()).sum()
    }

    /// Clear all cookies.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Iterate over all cookies.
    pub fn iter_all_cookies(&self) -> impl Iterator<Item = CanonicalCookie> + '_ {
        self.store.iter().flat_map(|entry| entry.value().clone())
    }

    /// True when both handles point at the same underlying storage.
    pub fn ptr_eq(&self, other: &CookieJar) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }
}

impl CookieStore for CookieJar {
    fn set_cookie(&self, cookie: CanonicalCookie) {
        self.set_canonical_cookie(cookie);
    }

    fn iter_all_cookies(&self) -> impl Iterator<Item = CanonicalCookie> + '_ {
        CookieJar::iter_all_cookies(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::canonicalcookie::CookieDefaults;

    fn make_test_cookie(name: &str, domain: &str, path: &str, value: &str) -> CanonicalCookie {
        let mut defaults = CookieDefaults::new();
        defaults.domain = domain.to_string();
        defaults.path = path.to_string();
        CanonicalCookie::from_defaults(name, value, defaults)
    }

    #[test]
    fn test_same_name_domain_path_replaces() {
        let jar = CookieJar::new();
        jar.set_canonical_cookie(make_test_cookie("a", "example.com", "/", "1"));
        jar.set_canonical_cookie(make_test_cookie("a", "example.com", "/", "2"));

        assert_eq!(jar.total_cookie_count(), 1);
        assert_eq!(jar.iter_all_cookies().next().unwrap().value, "2");
    }

    #[test]
    fn test_distinct_partitions_kept() {
        let jar = CookieJar::new();
        jar.set_canonical_cookie(make_test_cookie("a", "example.com", "/", "1"));
        jar.set_canonical_cookie(make_test_cookie("a", "example.com", "/app", "2"));
        jar.set_canonical_cookie(make_test_cookie("a", "other.org", "/", "3"));

        assert_eq!(jar.total_cookie_count(), 3);
    }

    #[test]
    fn test_add_set_cookie_host_only() {
        let jar = CookieJar::new();
        jar.add_set_cookie("Example.COM", "sid=xyz; Path=/; Secure; HttpOnly")
            .unwrap();

        let cookie = jar.iter_all_cookies().next().unwrap();
        assert_eq!(cookie.domain, "example.com");
        assert!(cookie.host_only);
        assert!(cookie.secure);
        assert!(cookie.http_only);
        assert!(cookie.discard);
    }

    #[test]
    fn test_add_set_cookie_domain_and_max_age() {
        let jar = CookieJar::new();
        jar.add_set_cookie("a.example.com", "pref=1; Domain=.example.com; Max-Age=60")
            .unwrap();

        let cookie = jar.iter_all_cookies().next().unwrap();
        assert_eq!(cookie.domain, "example.com");
        assert!(!cookie.host_only);
        assert!(!cookie.discard);
        assert!(cookie.expiration_time.is_some());
    }

    #[test]
    fn test_add_set_cookie_rejects_garbage() {
        let jar = CookieJar::new();
        assert_eq!(
            jar.add_set_cookie("example.com", "=value"),
            Err(NetError::CookieEmptyName)
        );
        assert_eq!(
            jar.add_set_cookie("example.com", "no-pair-here"),
            Err(NetError::CookieParseFailed)
        );
        assert_eq!(jar.total_cookie_count(), 0);
    }

    #[test]
    fn test_cookie_header() {
        let jar = CookieJar::new();
        jar.set_canonical_cookie(make_test_cookie("a", "", "/", "1"));
        jar.set_canonical_cookie(make_test_cookie("b", "", "/", "2"));

        let header = jar.cookie_header();
        assert!(header == "a=1; b=2" || header == "b=2; a=1");
    }

    #[test]
    fn test_clones_share_storage() {
        let jar = CookieJar::new();
        let handle = jar.clone();
        handle.set_canonical_cookie(make_test_cookie("a", "", "/", "1"));

        assert_eq!(jar.total_cookie_count(), 1);
        assert!(jar.ptr_eq(&handle));
        assert!(!jar.ptr_eq(&CookieJar::new()));

        jar.clear();
        assert_eq!(handle.total_cookie_count(), 0);
    }
}
