use std::fmt::{Display, Formatter};

/// Directive sent as `cache-control` on full responses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CachePolicy {
    NoStore,
    NoCache,
    MaxAge(u32),
}

impl Display for CachePolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CachePolicy::NoStore => write!(f, "no-store"),
            CachePolicy::NoCache => write!(f, "no-cache"),
            CachePolicy::MaxAge(seconds) => write!(f, "max-age={}", seconds),
        }
    }
}
