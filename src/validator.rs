use actix_web::http::header::{self, HeaderMap, HeaderName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::ClockResolution;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidatorKind {
    Absent,
    EntityTag,
    ModificationTime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    EntityTag(String),
    ModificationTime(String),
}

impl Validator {
    pub fn derive(kind: ValidatorKind, time: &str) -> Option<Validator> {
        match kind {
            ValidatorKind::Absent => None,
            ValidatorKind::EntityTag => Some(Validator::EntityTag(entity_tag(time))),
            ValidatorKind::ModificationTime => Some(Validator::ModificationTime(time.to_string())),
        }
    }

    pub fn header_name(&self) -> HeaderName {
        match self {
            Validator::EntityTag(_) => header::ETAG,
            Validator::ModificationTime(_) => header::LAST_MODIFIED,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Validator::EntityTag(value) | Validator::ModificationTime(value) => value.as_str(),
        }
    }
}

/// Lowercase hex MD5 of the time string. Sent unquoted.
pub fn entity_tag(time: &str) -> String {
    format!("{:x}", md5::compute(time))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchRule {
    Never,
    ExactEntityTag,
    NotNewerThan,
}

/// How `if-modified-since` is compared against the current time string.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum LastModifiedComparison {
    /// Plain string ordering of the raw header value.
    Lexical,
    /// Header parsed as a date and compared as an instant.
    Temporal,
}

impl Default for LastModifiedComparison {
    fn default() -> Self {
        LastModifiedComparison::Lexical
    }
}

/// Validators a client sent back. Headers that are not visible ASCII are
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionalRequest {
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
}

impl ConditionalRequest {
    pub fn from_headers(headers: &HeaderMap) -> ConditionalRequest {
        let read = |name: &HeaderName| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(String::from)
        };
        ConditionalRequest {
            if_none_match: read(&header::IF_NONE_MATCH),
            if_modified_since: read(&header::IF_MODIFIED_SINCE),
        }
    }
}

pub struct Comparison {
    pub last_modified: LastModifiedComparison,
    pub resolution: ClockResolution,
}

impl Comparison {
    pub fn matches(
        &self,
        rule: MatchRule,
        validator: Option<&Validator>,
        request: &ConditionalRequest,
        now: DateTime<Utc>,
    ) -> bool {
        match (rule, validator) {
            (MatchRule::Never, _) | (_, None) => false,
            (MatchRule::ExactEntityTag, Some(validator)) => request
                .if_none_match
                .as_deref()
                .map_or(false, |tag| tag == validator.value()),
            (MatchRule::NotNewerThan, Some(validator)) => match request.if_modified_since.as_deref() {
                Some(since) => self.not_newer_than(since, validator.value(), now),
                None => false,
            },
        }
    }

    fn not_newer_than(&self, since: &str, current: &str, now: DateTime<Utc>) -> bool {
        match self.last_modified {
            LastModifiedComparison::Lexical => since <= current,
            LastModifiedComparison::Temporal => match self.resolution.parse(since) {
                Some(since) => since <= self.resolution.truncate(now),
                None => {
                    log::debug!("Ignoring unparseable if-modified-since: {}", since);
                    false
                }
            },
        }
    }
}
