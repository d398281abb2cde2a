//! Cookie stores and value mapping.
//!
//! - **Storage**: the [`CookieStore`](store::CookieStore) capability and an
//!   in-memory implementation, [`CookieJar`](jar::CookieJar)
//! - **Mapping**: flat `name -> value` maps to and from a store
//!   ([`mapping`])
//!
//! Stores are always constructed by the caller and passed explicitly; there is
//! no process-wide jar.
//!
//! # Seeding a store before a request
//!
//! ```rust
//! use respkit::cookies::jar::CookieJar;
//! use respkit::cookies::mapping::{store_from_cookie_map, CookieMap};
//!
//! let mut values = CookieMap::new();
//! values.insert("session".to_string(), "abc123".to_string());
//!
//! let jar: CookieJar = store_from_cookie_map(values.into());
//! assert_eq!(jar.cookie_header(), "session=abc123");
//! ```
//!
//! # Harvesting values after a response
//!
//! ```rust
//! use respkit::cookies::jar::CookieJar;
//! use respkit::cookies::mapping::cookie_map_from_store;
//!
//! let jar = CookieJar::new();
//! jar.add_set_cookie("example.com", "theme=dark; Path=/")?;
//!
//! let values = cookie_map_from_store(&jar);
//! assert_eq!(values["theme"], "dark");
//! # Ok::<(), respkit::base::neterror::NetError>(())
//! ```
//!
//! # Chromium References
//!
//! - Cookie representation: `net/cookies/canonical_cookie.h`
//! - Cookie monster: `net/cookies/cookie_monster.cc`

pub mod canonicalcookie;
pub mod jar;
pub mod mapping;
pub mod store;

pub use canonicalcookie::{CanonicalCookie, CookieDefaults};
pub use jar::CookieJar;
pub use mapping::{
    cookie_map_from_store, merge_cookie_map, store_from_cookie_map, CookieMap, CookieSource,
};
pub use store::CookieStore;
