use std::sync::Arc;

use actix_web::http::header::{self, HeaderName};
use log::debug;

use crate::clock::{Clock, ClockResolution};
use crate::strategy::{Strategy, StrategyTable};
use crate::validator::{Comparison, ConditionalRequest, LastModifiedComparison, Validator};

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// 200 with a body generated at `time`.
    Full {
        time: String,
        headers: Vec<(HeaderName, String)>,
    },
    /// 304, nothing else.
    NotModified,
}

pub struct ValidationEngine {
    table: StrategyTable,
    clock: Arc<dyn Clock + Send + Sync>,
    comparison: Comparison,
}

impl ValidationEngine {
    pub fn new(
        table: StrategyTable,
        clock: Arc<dyn Clock + Send + Sync>,
        resolution: ClockResolution,
        last_modified: LastModifiedComparison,
    ) -> ValidationEngine {
        ValidationEngine {
            table,
            clock,
            comparison: Comparison {
                last_modified,
                resolution,
            },
        }
    }

    pub fn table(&self) -> &StrategyTable {
        &self.table
    }

    pub fn evaluate(&self, strategy: Strategy, request: &ConditionalRequest) -> Decision {
        let rule = self.table.rule(strategy);
        let now = self.clock.now();
        let time = self.comparison.resolution.format(now);
        let validator = Validator::derive(rule.validator, &time);

        if self.comparison.matches(rule.matching, validator.as_ref(), request, now) {
            debug!("{}: client validator still current, answering 304", strategy);
            return Decision::NotModified;
        }

        let mut headers = Vec::with_capacity(2);
        if let Some(policy) = rule.policy {
            headers.push((header::CACHE_CONTROL, policy.to_string()));
        }
        if let Some(validator) = validator {
            headers.push((validator.header_name(), validator.value().to_string()));
        }
        debug!("{}: sending full representation generated at {}", strategy, time);

        Decision::Full { time, headers }
    }
}
