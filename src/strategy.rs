use std::fmt::{Display, Formatter};

use crate::policy::CachePolicy;
use crate::validator::{MatchRule, ValidatorKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    NoStore,
    ETag,
    LastModified,
    MaxAge,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::NoStore,
        Strategy::ETag,
        Strategy::LastModified,
        Strategy::MaxAge,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Strategy::NoStore => "/no-store",
            Strategy::ETag => "/etag",
            Strategy::LastModified => "/last-modified",
            Strategy::MaxAge => "/max-age",
        }
    }

    /// Position in the walkthrough, starting at 1.
    pub fn step(&self) -> usize {
        match self {
            Strategy::NoStore => 1,
            Strategy::ETag => 2,
            Strategy::LastModified => 3,
            Strategy::MaxAge => 4,
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            Strategy::NoStore => "no-store.html",
            Strategy::ETag => "etag.html",
            Strategy::LastModified => "last-modified.html",
            Strategy::MaxAge => "max-age.html",
        }
    }

    pub fn from_step(step: usize) -> Option<Strategy> {
        Strategy::ALL.iter().copied().find(|strategy| strategy.step() == step)
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path().trim_start_matches('/'))
    }
}

/// What a strategy sends and how it decides between 200 and 304.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyRule {
    pub policy: Option<CachePolicy>,
    pub validator: ValidatorKind,
    pub matching: MatchRule,
}

#[derive(Debug, Clone)]
pub struct StrategyTable {
    no_store: StrategyRule,
    etag: StrategyRule,
    last_modified: StrategyRule,
    max_age: StrategyRule,
}

impl StrategyTable {
    pub fn new(max_age: u32) -> StrategyTable {
        StrategyTable {
            no_store: StrategyRule {
                policy: Some(CachePolicy::NoStore),
                validator: ValidatorKind::Absent,
                matching: MatchRule::Never,
            },
            etag: StrategyRule {
                policy: Some(CachePolicy::NoCache),
                validator: ValidatorKind::EntityTag,
                matching: MatchRule::ExactEntityTag,
            },
            last_modified: StrategyRule {
                policy: None,
                validator: ValidatorKind::ModificationTime,
                matching: MatchRule::NotNewerThan,
            },
            max_age: StrategyRule {
                policy: Some(CachePolicy::MaxAge(max_age)),
                validator: ValidatorKind::EntityTag,
                matching: MatchRule::ExactEntityTag,
            },
        }
    }

    pub fn rule(&self, strategy: Strategy) -> &StrategyRule {
        match strategy {
            Strategy::NoStore => &self.no_store,
            Strategy::ETag => &self.etag,
            Strategy::LastModified => &self.last_modified,
            Strategy::MaxAge => &self.max_age,
        }
    }

    /// Page heading for a strategy, `max-age=N` carrying the configured value.
    pub fn title(&self, strategy: Strategy) -> String {
        match self.rule(strategy).policy {
            Some(policy @ CachePolicy::MaxAge(_)) => policy.to_string(),
            _ => strategy.to_string(),
        }
    }
}

impl Default for StrategyTable {
    fn default() -> Self {
        StrategyTable::new(30)
    }
}
