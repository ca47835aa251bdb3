//! Natural language date/time parsing.
//!
//! Understands expressions like:
//! - Relative words: `now`, `today`, `tomorrow`, `yesterday`
//! - Unix epochs and ISO 8601: `1704067200`, `2024-01-15 10:30`
//! - Time of day: `15:00`, `3:30pm`, `9am`
//! - Relative periods: `next week`, `last month`, `next year`
//! - Weekdays: `friday`, `next monday`, `last tue`
//! - Relative offsets: `in 2 days`, `3 hours ago`, `a week from now`
//! - Month + day: `dec 15`, `15th march 2025`, `dec 15 3pm`

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone, Weekday};
use regex::Regex;
use tracing::{debug, trace};

use super::{absolute, DateParser, ParsedDate};

const MONTH: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

/// Largest offset accepted for "in N units" (about 30,000 years).
const MAX_OFFSET_SECONDS: i64 = 1_000_000_000_000;

fn patterns() -> &'static DatePatterns {
    static PATTERNS: OnceLock<DatePatterns> = OnceLock::new();
    PATTERNS.get_or_init(DatePatterns::new)
}

struct DatePatterns {
    // 15:00, 15:00:30, 3:30pm, 9am
    clock: Regex,

    // "in 2 days", "3 weeks ago", "a month from now"
    in_n_units: Regex,
    n_units_ago: Regex,
    a_unit_ago: Regex,
    a_unit_from_now: Regex,

    // "15 dec", "dec 15", "march 15th 2025 3pm"
    day_month: Regex,
    month_day: Regex,

    // "tomorrow 3pm", "next friday at 9:30"
    day_at_time: Regex,
}

impl DatePatterns {
    fn new() -> Self {
        const UNITS: &str = r"(seconds?|secs?|minutes?|mins?|hours?|hrs?|days?|weeks?|months?|years?)";

        Self {
            clock: Regex::new(r"^(\d{1,2})(?::(\d{2}))?(?::(\d{2}))?\s*(am|pm)?$")
                .expect("clock regex"),

            in_n_units: Regex::new(&format!(r"^in\s+(\d+)\s+{UNITS}$")).expect("offset regex"),
            n_units_ago: Regex::new(&format!(r"^(\d+)\s+{UNITS}\s+ago$")).expect("offset regex"),
            a_unit_ago: Regex::new(&format!(r"^(a|an|one)\s+{UNITS}\s+ago$"))
                .expect("offset regex"),
            a_unit_from_now: Regex::new(&format!(r"^(a|an|one)\s+{UNITS}\s+from\s+now$"))
                .expect("offset regex"),

            day_month: Regex::new(
                &r"^(\d{1,2})(?:st|nd|rd|th)?\s+(?:of\s+)?(MONTH)\.?(?:,?\s+(\d{4}))?(?:,?\s+(?:at\s+)?(.+))?$"
                    .replace("MONTH", MONTH),
            )
            .expect("day-month regex"),
            month_day: Regex::new(
                &r"^(MONTH)\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(\d{4}))?(?:,?\s+(?:at\s+)?(.+))?$"
                    .replace("MONTH", MONTH),
            )
            .expect("month-day regex"),

            day_at_time: Regex::new(r"^(.+?)\s+(?:at\s+)?(\d{1,2}(?::\d{2}){0,2}\s*(?:am|pm)?)$")
                .expect("day-at-time regex"),
        }
    }
}

/// The built-in parser: a handful of absolute formats plus common English phrases.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalDateParser;

impl NaturalDateParser {
    /// Parse a clock time: 15:00, 15:00:30, 3:30pm, 9am.
    ///
    /// A bare number without minutes or am/pm is not a time.
    fn parse_clock(input: &str) -> Option<NaiveTime> {
        let caps = patterns().clock.captures(input.trim())?;
        let mut hour: u32 = caps[1].parse().ok()?;
        let min: u32 = match caps.get(2) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        let sec: u32 = match caps.get(3) {
            Some(s) => s.as_str().parse().ok()?,
            None => 0,
        };

        match caps.get(4).map(|m| m.as_str()) {
            Some(ampm) => {
                if !(1..=12).contains(&hour) {
                    return None;
                }
                // Convert to 24-hour
                if ampm == "pm" && hour != 12 {
                    hour += 12;
                } else if ampm == "am" && hour == 12 {
                    hour = 0;
                }
            }
            None if caps.get(2).is_none() => return None,
            None => {}
        }

        NaiveTime::from_hms_opt(hour, min, sec)
    }

    fn at_local(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Local>> {
        Local.from_local_datetime(&date.and_time(time)).earliest()
    }

    fn start_of(date: NaiveDate) -> Option<DateTime<Local>> {
        Self::at_local(date, NaiveTime::from_hms_opt(0, 0, 0)?)
    }

    /// Parse relative words: now, today, tomorrow, yesterday
    fn parse_relative_word(lower: &str, now: &DateTime<Local>) -> Option<ParsedDate> {
        let today = now.date_naive();

        match lower {
            "now" => Some(ParsedDate::new(*now, "Current time")),
            "today" => Some(ParsedDate::new(
                Self::start_of(today)?,
                "Today (start of day)",
            )),
            "tomorrow" => Some(ParsedDate::new(
                Self::start_of(today.succ_opt()?)?,
                "Tomorrow (start of day)",
            )),
            "yesterday" => Some(ParsedDate::new(
                Self::start_of(today.pred_opt()?)?,
                "Yesterday (start of day)",
            )),
            _ => None,
        }
    }

    /// Parse a time of day, resolved to today.
    fn parse_time_of_day(lower: &str, now: &DateTime<Local>) -> Option<ParsedDate> {
        let time = Self::parse_clock(lower)?;
        let dt = Self::at_local(now.date_naive(), time)?;
        Some(ParsedDate::new(dt, format!("Today at {}", time.format("%H:%M:%S"))))
    }

    /// Parse relative periods: next week, last month, next year
    fn parse_relative_period(lower: &str, now: &DateTime<Local>) -> Option<ParsedDate> {
        let (offset, desc) = match lower {
            "next week" => (TimeDelta::weeks(1), "Next week"),
            "last week" => (TimeDelta::weeks(-1), "Last week"),
            "next month" => (TimeDelta::days(30), "Next month"), // Approximate
            "last month" => (TimeDelta::days(-30), "Last month"),
            "next year" => (TimeDelta::days(365), "Next year"),
            "last year" => (TimeDelta::days(-365), "Last year"),
            _ => return None,
        };

        let target = now.date_naive().checked_add_signed(offset)?;
        Some(ParsedDate::new(Self::start_of(target)?, desc))
    }

    /// Parse weekdays: friday, next monday, last tuesday, this wed
    fn parse_weekday(lower: &str, now: &DateTime<Local>) -> Option<ParsedDate> {
        let today = now.date_naive();

        let (prefix, weekday_str) = if let Some(rest) = lower.strip_prefix("next ") {
            ("next", rest)
        } else if let Some(rest) = lower.strip_prefix("last ") {
            ("last", rest)
        } else if let Some(rest) = lower.strip_prefix("this ") {
            ("this", rest)
        } else {
            ("", lower)
        };

        let target_weekday = match weekday_str.trim() {
            "monday" | "mon" => Weekday::Mon,
            "tuesday" | "tue" | "tues" => Weekday::Tue,
            "wednesday" | "wed" => Weekday::Wed,
            "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
            "friday" | "fri" => Weekday::Fri,
            "saturday" | "sat" => Weekday::Sat,
            "sunday" | "sun" => Weekday::Sun,
            _ => return None,
        };

        let diff = i64::from(target_weekday.num_days_from_monday())
            - i64::from(today.weekday().num_days_from_monday());

        let days_offset = match prefix {
            // Occurrence in the following week
            "next" => (if diff <= 0 { diff + 7 } else { diff }) + 7,
            "last" => {
                if diff >= 0 {
                    diff - 7
                } else {
                    diff
                }
            }
            "this" => diff,
            // Next occurrence, a week out if it's today
            _ => {
                if diff <= 0 {
                    diff + 7
                } else {
                    diff
                }
            }
        };

        let target = today.checked_add_signed(TimeDelta::days(days_offset))?;
        let desc = match prefix {
            "" => format!("Next {}", target_weekday),
            p => format!("{}{} {}", p[..1].to_uppercase(), &p[1..], target_weekday),
        };
        Some(ParsedDate::new(Self::start_of(target)?, desc))
    }

    /// Seconds in one of a unit word ("min", "hours", ...).
    fn unit_seconds(unit: &str) -> Option<i64> {
        let secs = if unit.starts_with("sec") {
            1
        } else if unit.starts_with("min") {
            60
        } else if unit.starts_with("h") {
            3600
        } else if unit.starts_with("day") {
            86_400
        } else if unit.starts_with("week") {
            7 * 86_400
        } else if unit.starts_with("month") {
            30 * 86_400 // Approximate
        } else if unit.starts_with("year") {
            365 * 86_400
        } else {
            return None;
        };
        Some(secs)
    }

    fn offset(unit: &str, n: i64) -> Option<TimeDelta> {
        let secs = Self::unit_seconds(unit)?.checked_mul(n)?;
        if secs.abs() > MAX_OFFSET_SECONDS {
            debug!(secs, "offset out of range");
            return None;
        }
        Some(TimeDelta::seconds(secs))
    }

    /// Parse relative offsets: "in 2 days", "3 weeks ago"
    fn parse_relative_offset(lower: &str, now: &DateTime<Local>) -> Option<ParsedDate> {
        let patterns = patterns();

        let (n, unit, sign, desc) = if let Some(caps) = patterns.in_n_units.captures(lower) {
            let n: i64 = caps[1].parse().ok()?;
            (n, caps[2].to_string(), 1, format!("In {} {}", n, &caps[2]))
        } else if let Some(caps) = patterns.n_units_ago.captures(lower) {
            let n: i64 = caps[1].parse().ok()?;
            (n, caps[2].to_string(), -1, format!("{} {} ago", n, &caps[2]))
        } else if let Some(caps) = patterns.a_unit_ago.captures(lower) {
            (1, caps[2].to_string(), -1, format!("A {} ago", &caps[2]))
        } else if let Some(caps) = patterns.a_unit_from_now.captures(lower) {
            (1, caps[2].to_string(), 1, format!("A {} from now", &caps[2]))
        } else {
            return None;
        };

        let offset = Self::offset(&unit, n.checked_mul(sign)?)?;
        Some(ParsedDate::new(now.checked_add_signed(offset)?, desc))
    }

    /// Convert month name to number (1-12)
    fn month_name_to_number(name: &str) -> Option<u32> {
        match name {
            s if s.starts_with("jan") => Some(1),
            s if s.starts_with("feb") => Some(2),
            s if s.starts_with("mar") => Some(3),
            s if s.starts_with("apr") => Some(4),
            "may" => Some(5),
            s if s.starts_with("jun") => Some(6),
            s if s.starts_with("jul") => Some(7),
            s if s.starts_with("aug") => Some(8),
            s if s.starts_with("sep") => Some(9),
            s if s.starts_with("oct") => Some(10),
            s if s.starts_with("nov") => Some(11),
            s if s.starts_with("dec") => Some(12),
            _ => None,
        }
    }

    /// Parse month + day: "15 dec", "dec 15", "march 15th 2025 3pm"
    ///
    /// Without a year the next occurrence (today included) is used.
    fn parse_month_day(lower: &str, now: &DateTime<Local>) -> Option<ParsedDate> {
        let patterns = patterns();

        let (day, month_str, year, time) = if let Some(caps) = patterns.day_month.captures(lower) {
            (
                caps[1].parse::<u32>().ok()?,
                caps[2].to_string(),
                caps.get(3).map(|m| m.as_str().to_string()),
                caps.get(4).map(|m| m.as_str().to_string()),
            )
        } else if let Some(caps) = patterns.month_day.captures(lower) {
            (
                caps[2].parse::<u32>().ok()?,
                caps[1].to_string(),
                caps.get(3).map(|m| m.as_str().to_string()),
                caps.get(4).map(|m| m.as_str().to_string()),
            )
        } else {
            return None;
        };

        let month = Self::month_name_to_number(&month_str)?;
        let time = match time {
            Some(t) => Self::parse_clock(&t)?,
            None => NaiveTime::from_hms_opt(0, 0, 0)?,
        };

        let today = now.date_naive();
        let date = match year {
            Some(y) => NaiveDate::from_ymd_opt(y.parse().ok()?, month, day)?,
            None => match NaiveDate::from_ymd_opt(today.year(), month, day) {
                Some(d) if d >= today => d,
                // Passed already this year, or Feb 29 in a non-leap year
                _ => NaiveDate::from_ymd_opt(today.year() + 1, month, day)?,
            },
        };

        let dt = Self::at_local(date, time)?;
        Some(ParsedDate::new(dt, date.format("%B %-d, %Y").to_string()))
    }
}

impl NaturalDateParser {
    /// Parse a day phrase followed by a clock time: "tomorrow 3pm", "friday at 9:30"
    fn parse_day_at_time(lower: &str, now: &DateTime<Local>) -> Option<ParsedDate> {
        let caps = patterns().day_at_time.captures(lower)?;
        let time = Self::parse_clock(&caps[2])?;
        let day = &caps[1];

        let parsed = Self::parse_relative_word(day, now)
            .or_else(|| Self::parse_weekday(day, now))
            .filter(|_| day != "now")?;

        let dt = Self::at_local(parsed.datetime.date_naive(), time)?;
        let desc = parsed
            .description
            .trim_end_matches(" (start of day)")
            .to_string();
        Some(ParsedDate::new(dt, format!("{} at {}", desc, time.format("%H:%M"))))
    }
}

impl DateParser for NaturalDateParser {
    fn parse(&self, input: &str, now: &DateTime<Local>) -> Option<ParsedDate> {
        let lower = input.trim().to_lowercase();
        let lower = lower.as_str();

        // Try each parser in order of specificity
        let result = Self::parse_relative_word(lower, now)
            .or_else(|| absolute::parse_epoch(lower))
            .or_else(|| absolute::parse_iso(input))
            .or_else(|| Self::parse_time_of_day(lower, now))
            .or_else(|| Self::parse_relative_period(lower, now))
            .or_else(|| Self::parse_weekday(lower, now))
            .or_else(|| Self::parse_relative_offset(lower, now))
            .or_else(|| Self::parse_month_day(lower, now))
            .or_else(|| Self::parse_day_at_time(lower, now));

        match &result {
            Some(parsed) => debug!(input, description = %parsed.description, "parsed date"),
            None => trace!(input, "no date parser matched"),
        }
        result
    }
}
