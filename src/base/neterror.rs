use thiserror::Error;

/// Error codes surfaced by response post-processing.
/// Values mirror Chromium's `net_error_list.h` where a matching entry exists.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum NetError {
    // Content decoding errors
    #[error("Content decoding failed")]
    ContentDecodingFailed,

    // Cookie errors (custom codes starting at -900)
    #[error("Cookie could not be parsed")]
    CookieParseFailed,
    #[error("Cookie has an empty name")]
    CookieEmptyName,

    #[error("Unknown error: {0}")]
    Unknown(i32),
}

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::ContentDecodingFailed => -330,
            NetError::CookieParseFailed => -905,
            NetError::CookieEmptyName => -906,
            NetError::Unknown(code) => *code,
        }
    }
}

impl From<i32> for NetError {
    fn from(code: i32) -> Self {
        match code {
            -330 => NetError::ContentDecodingFailed,
            -905 => NetError::CookieParseFailed,
            -906 => NetError::CookieEmptyName,
            _ => NetError::Unknown(code),
        }
    }
}
