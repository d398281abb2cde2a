//! The capability a cookie container must offer to be mapped.

use crate::cookies::canonicalcookie::CanonicalCookie;

/// A mutable container of cookies keyed by (domain, path, name).
///
/// `Default` constructs an empty store. Insertion goes through `&self`, so
/// implementations carry their own interior mutability; callers that share
/// a store across threads are responsible for how they share it.
pub trait CookieStore: Default {
    /// Insert a cookie, replacing any cookie with the same domain, path and name.
    fn set_cookie(&self, cookie: CanonicalCookie);

    /// Every cookie currently held, across all domain/path partitions.
    fn iter_all_cookies(&self) -> impl Iterator<Item = CanonicalCookie> + '_;
}
