//! Conversion between a flat `name -> value` map and a cookie store.
//!
//! The two directions are not inverses. A store may hold several cookies
//! with the same name under different domains or paths; reading it into a
//! map keeps whichever of them the store yields last.

use crate::cookies::canonicalcookie::{CanonicalCookie, CookieDefaults};
use crate::cookies::jar::CookieJar;
use crate::cookies::store::CookieStore;
use std::collections::HashMap;

/// Flat cookie name to value mapping.
pub type CookieMap = HashMap<String, String>;

/// Input accepted by [`store_from_cookie_map`].
#[derive(Debug)]
pub enum CookieSource<S = CookieJar> {
    /// Already a store; passed through untouched.
    Store(S),
    /// Plain values to load into a new store.
    Map(CookieMap),
}

impl From<CookieMap> for CookieSource<CookieJar> {
    fn from(map: CookieMap) -> Self {
        CookieSource::Map(map)
    }
}

impl From<CookieJar> for CookieSource<CookieJar> {
    fn from(jar: CookieJar) -> Self {
        CookieSource::Store(jar)
    }
}

/// Read every cookie in `store` into a map. Later cookies overwrite earlier
/// ones with the same name.
pub fn cookie_map_from_store<S: CookieStore>(store: &S) -> CookieMap {
    let mut map = CookieMap::new();
    for cookie in store.iter_all_cookies() {
        if map.contains_key(&cookie.name) {
            tracing::trace!(name = %cookie.name, "cookie name collision, keeping later value");
        }
        map.insert(cookie.name, cookie.value);
    }
    map
}

/// Turn `source` into a store.
///
/// A store is returned as-is, not copied. A map is loaded into a new empty
/// store through [`merge_cookie_map`].
pub fn store_from_cookie_map<S: CookieStore>(source: CookieSource<S>) -> S {
    match source {
        CookieSource::Store(store) => store,
        CookieSource::Map(map) => merge_cookie_map(S::default(), &map),
    }
}

/// Insert every entry of `map` into `store` as a session cookie with default
/// attributes, then hand the store back.
pub fn merge_cookie_map<S, K, V>(store: S, map: &HashMap<K, V>) -> S
where
    S: CookieStore,
    K: AsRef<str>,
    V: AsRef<str>,
{
    for (name, value) in map {
        let name: &str = name.as_ref();
        let value: &str = value.as_ref();
        let cookie = CanonicalCookie::from_defaults(name, value, CookieDefaults::new());
        store.set_cookie(cookie);
    }
    tracing::debug!(count = map.len(), "merged cookie map into store");
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(pairs: &[(&str, &str)]) -> CookieMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_map_to_store_and_back() {
        let map = map_of(&[("a", "1"), ("b", "2")]);
        let jar: CookieJar = store_from_cookie_map(map.clone().into());

        assert_eq!(jar.total_cookie_count(), 2);
        assert_eq!(cookie_map_from_store(&jar), map);
    }

    #[test]
    fn test_store_built_with_defaults() {
        let jar: CookieJar = store_from_cookie_map(map_of(&[("sid", "abc")]).into());
        let cookie = jar.iter_all_cookies().next().unwrap();

        assert_eq!(cookie, CanonicalCookie {
            creation_time: cookie.creation_time,
            ..CanonicalCookie::from_defaults("sid", "abc", CookieDefaults::new())
        });
    }

    #[test]
    fn test_store_passthrough_is_same_instance() {
        let jar = CookieJar::new();
        let handle = jar.clone();

        let returned = store_from_cookie_map(CookieSource::Store(jar));
        assert!(returned.ptr_eq(&handle));
    }

    #[test]
    fn test_merge_into_existing_overwrites_by_name() {
        let jar = CookieJar::new();
        let jar = merge_cookie_map(jar, &map_of(&[("a", "1")]));
        let jar = merge_cookie_map(jar, &HashMap::from([("a", "2"), ("b", "3")]));

        assert_eq!(jar.total_cookie_count(), 2);
        assert_eq!(cookie_map_from_store(&jar), map_of(&[("a", "2"), ("b", "3")]));
    }

    #[test]
    fn test_empty_map_gives_empty_store() {
        let jar: CookieJar = store_from_cookie_map(CookieMap::new().into());
        assert_eq!(jar.total_cookie_count(), 0);
        assert!(cookie_map_from_store(&jar).is_empty());
    }
}
