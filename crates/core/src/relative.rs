//! Relative time humanization.
//!
//! Turns the signed distance between a reference instant and a target
//! instant into a phrase such as `in 3 weeks`, `a day ago` or `now`.
//!
//! ```
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use dtstamp_core::relative_time;
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
//! assert_eq!(relative_time(&now, &(now + TimeDelta::weeks(3))), "in 3 weeks");
//! assert_eq!(relative_time(&now, &(now - TimeDelta::hours(1))), "an hour ago");
//! assert_eq!(relative_time(&now, &now), "now");
//! ```

use std::fmt;

use chrono::{DateTime, TimeDelta, TimeZone};
use serde::Serialize;

const SECONDS_PER_DAY: i64 = 86_400;

/// Which side of the reference instant the target lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Future,
    Past,
    /// Same whole second as the reference.
    Now,
}

/// Unit a phrase is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    fn word(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Seconds never reach this: that bucket has no count.
    fn singular(self) -> String {
        match self {
            Self::Hour => "an hour".to_string(),
            unit => format!("a {}", unit.word()),
        }
    }
}

/// A humanized time distance.
///
/// `count` is `None` for the "a few seconds" bucket and for [`Direction::Now`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Phrase {
    pub count: Option<i64>,
    pub unit: TimeUnit,
    pub direction: Direction,
}

impl Phrase {
    /// Humanize the distance from `reference` to `target`.
    #[must_use]
    pub fn between<Tz: TimeZone>(reference: &DateTime<Tz>, target: &DateTime<Tz>) -> Self {
        // Equality is at whole-second resolution.
        if reference.timestamp() == target.timestamp() {
            return Self {
                count: None,
                unit: TimeUnit::Second,
                direction: Direction::Now,
            };
        }

        let direction = if target > reference {
            Direction::Future
        } else {
            Direction::Past
        };

        let delta = target.clone().signed_duration_since(reference.clone());
        let magnitude = if delta < TimeDelta::zero() { -delta } else { delta };
        // Biased up by one second so values a hair under a boundary land in
        // the next unit. Load-bearing for the boundary behaviour; revisit if
        // the humanization rules are ever redefined.
        let total = magnitude.num_seconds() + 1;
        let days = total.div_euclid(SECONDS_PER_DAY);
        let seconds = total.rem_euclid(SECONDS_PER_DAY);

        let (count, unit) = if days >= 365 {
            (Some(round_div(days, 365)), TimeUnit::Year)
        } else if days >= 30 {
            (Some(round_div(days, 30)), TimeUnit::Month)
        } else if days >= 7 {
            (Some(round_div(days, 7)), TimeUnit::Week)
        } else if days >= 1 {
            (Some(days), TimeUnit::Day)
        } else if seconds >= 3600 {
            (Some(round_div(seconds, 3600)), TimeUnit::Hour)
        } else if seconds >= 60 {
            (Some(round_div(seconds, 60)), TimeUnit::Minute)
        } else {
            (None, TimeUnit::Second)
        };

        Self {
            count,
            unit,
            direction,
        }
    }

    /// The phrase without direction wrapping, e.g. `3 weeks` or `an hour`.
    #[must_use]
    pub fn magnitude(&self) -> String {
        match (self.direction, self.count) {
            (Direction::Now, _) => "now".to_string(),
            (_, None) => "a few seconds".to_string(),
            (_, Some(1)) => self.unit.singular(),
            (_, Some(n)) => format!("{} {}s", n, self.unit.word()),
        }
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Now => f.write_str("now"),
            Direction::Future => write!(f, "in {}", self.magnitude()),
            Direction::Past => write!(f, "{} ago", self.magnitude()),
        }
    }
}

/// Humanize `target` relative to `reference`, e.g. `in 3 weeks` or `a day ago`.
///
/// Never fails: every pair of instants maps to a phrase.
#[must_use]
pub fn relative_time<Tz: TimeZone>(reference: &DateTime<Tz>, target: &DateTime<Tz>) -> String {
    Phrase::between(reference, target).to_string()
}

/// `round(n / d)` with ties going to the even neighbour. Inputs are non-negative.
fn round_div(n: i64, d: i64) -> i64 {
    let quotient = n / d;
    let remainder = n % d;
    match (remainder * 2).cmp(&d) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient % 2),
    }
}
