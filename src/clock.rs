use chrono::{DateTime, NaiveDateTime, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const MILLISECONDS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Granularity of the time strings validators are derived from.
///
/// Anything finer than `Seconds` makes two requests practically never produce
/// the same validator, so conditional requests stop matching.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum ClockResolution {
    Seconds,
    Milliseconds,
}

impl ClockResolution {
    pub fn truncate(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            ClockResolution::Seconds => instant.trunc_subsecs(0),
            ClockResolution::Milliseconds => instant.trunc_subsecs(3),
        }
    }

    pub fn format(&self, instant: DateTime<Utc>) -> String {
        let pattern = match self {
            ClockResolution::Seconds => SECONDS_FORMAT,
            ClockResolution::Milliseconds => MILLISECONDS_FORMAT,
        };
        self.truncate(instant).format(pattern).to_string()
    }

    /// Parses a time string produced by `format`, falling back to RFC 2822
    /// (which covers the HTTP-date form browsers send back).
    pub fn parse(&self, value: &str) -> Option<DateTime<Utc>> {
        let value = value.trim();
        let own_format = match self {
            ClockResolution::Seconds => SECONDS_FORMAT,
            ClockResolution::Milliseconds => MILLISECONDS_FORMAT,
        };
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, own_format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, SECONDS_FORMAT) {
            return Some(Utc.from_utc_datetime(&naive));
        }
        DateTime::parse_from_rfc2822(value)
            .ok()
            .map(|instant| instant.with_timezone(&Utc))
    }
}

impl Default for ClockResolution {
    fn default() -> Self {
        ClockResolution::Seconds
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use chrono::{DateTime, Duration, Utc};

    use super::Clock;

    pub struct ManualClock {
        instant: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        pub fn new(instant: DateTime<Utc>) -> ManualClock {
            ManualClock {
                instant: Mutex::new(instant),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut instant = self.instant.lock().unwrap();
            *instant = *instant + by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.instant.lock().unwrap()
        }
    }
}
